//! External command description and execution

use std::ffi::OsString;
use std::fmt;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;

use crate::domain::Secret;
use crate::error::{Result, command};

/// One command-line argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Arg {
    Plain(String),
    Secret(Secret),
}

impl Arg {
    fn to_os_string(&self) -> OsString {
        match self {
            Arg::Plain(s) => OsString::from(s),
            Arg::Secret(s) => OsString::from(s.expose()),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Plain(s) => f.write_str(s),
            Arg::Secret(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Plain(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Plain(value)
    }
}

impl From<&Path> for Arg {
    fn from(value: &Path) -> Self {
        Arg::Plain(value.display().to_string())
    }
}

/// A child process to run. `Display` masks secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalCommand {
    pub program: PathBuf,
    pub args: Vec<Arg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdin: Option<Arg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_dir: Option<PathBuf>,
    /// Failure is logged and ignored instead of aborting the run
    pub best_effort: bool,
}

impl ExternalCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
            current_dir: None,
            best_effort: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn secret_arg(mut self, secret: &Secret) -> Self {
        self.args.push(Arg::Secret(secret.clone()));
        self
    }

    pub fn stdin_secret(mut self, input: Secret) -> Self {
        self.stdin = Some(Arg::Secret(input));
        self
    }

    pub fn stdin_text(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(Arg::Plain(input.into()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn best_effort(mut self) -> Self {
        self.best_effort = true;
        self
    }

    /// Program name without directories, used in progress messages
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map_or_else(
                || self.program.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            )
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs external commands
pub trait CommandRunner {
    fn run(&mut self, cmd: &ExternalCommand) -> Result<()>;
}

/// Runs commands as real child processes.
///
/// Stdout lines are logged at INFO and stderr lines at WARN, tagged with the
/// program name.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, cmd: &ExternalCommand) -> Result<()> {
        let shown = cmd.to_string();
        let program = cmd.program_name();
        tracing::info!("command: {}", shown);

        let mut process = Command::new(&cmd.program);
        process
            .args(cmd.args.iter().map(Arg::to_os_string))
            .stdin(if cmd.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &cmd.current_dir {
            process.current_dir(dir);
        }

        let mut child = process
            .spawn()
            .map_err(|e| command::spawn_failed(&shown, e.to_string()))?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let written = std::thread::scope(|scope| {
            let writer = scope.spawn(|| -> std::io::Result<()> {
                if let (Some(input), Some(mut handle)) = (&cmd.stdin, stdin) {
                    handle.write_all(input.to_os_string().as_encoded_bytes())?;
                }
                Ok(())
            });
            if let Some(out) = stdout {
                scope.spawn(|| forward_lines(out, &program, false));
            }
            if let Some(err) = stderr {
                scope.spawn(|| forward_lines(err, &program, true));
            }
            writer.join()
        });

        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                tracing::debug!("{} closed stdin early", program);
            }
            Ok(Err(e)) => {
                return Err(command::spawn_failed(&shown, format!("writing stdin: {e}")));
            }
            Err(_) => return Err(command::spawn_failed(&shown, "stdin writer panicked")),
        }

        let status = child
            .wait()
            .map_err(|e| command::spawn_failed(&shown, e.to_string()))?;

        if !status.success() {
            tracing::debug!("command: {} terminated with {}", shown, status);
            return Err(command::failed(shown, status.to_string()));
        }

        Ok(())
    }
}

fn forward_lines<R: Read>(reader: R, program: &str, is_stderr: bool) {
    for line in BufReader::new(reader).lines() {
        match line {
            Ok(line) if is_stderr => tracing::warn!(target: "child", "[{}] {}", program, line),
            Ok(line) => tracing::info!(target: "child", "[{}] {}", program, line),
            Err(e) => {
                tracing::error!("error reading output of {}: {}", program, e);
                break;
            }
        }
    }
}

/// Whether `binary` can be spawned (on PATH or as a path)
pub fn does_binary_exist(binary: impl AsRef<std::ffi::OsStr>) -> bool {
    Command::new(binary)
        .stdout(Stdio::null())
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|mut child| child.wait())
        .is_ok()
}

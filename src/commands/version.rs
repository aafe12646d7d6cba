//! Version command implementation

use crate::error::Result;

/// Run version command
pub fn run() -> Result<()> {
    print!("{}", version_text());
    Ok(())
}

fn version_text() -> String {
    let profile = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };
    format!(
        "deis-deploy {}\n\nBuild info:\n  Minimum Rust version: {}\n  Platform: {}-{}\n  Profile: {}\n",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_RUST_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
        profile
    )
}

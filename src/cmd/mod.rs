//! External tool invocation
//!
//! Registry and PaaS work is delegated to the `docker` and `deis` command-line
//! clients. This module describes those invocations as [`ExternalCommand`]s and
//! runs them through a [`CommandRunner`].

pub mod command;
pub mod deis;
pub mod docker;

pub use command::{CommandRunner, ExternalCommand, SystemRunner, does_binary_exist};
pub use deis::Deis;
pub use docker::Docker;

//! Command implementations for deis-deploy CLI

pub mod build;
pub mod completions;
pub mod deploy;
pub mod helpers;
pub mod plan;
pub mod version;

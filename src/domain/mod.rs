//! Domain models for deis-deploy
//!
//! Pure types describing deploy targets, applications and regions.
//! These types are free of I/O and carry the target table invariants.

pub mod secret;
pub mod target;

pub use secret::Secret;
pub use target::{AppRole, AppSlot, Deployment, Target, demo_app_name};

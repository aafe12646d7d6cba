//! Deploy pipeline
//!
//! A deploy is first turned into a [`Plan`], a flat ordered list of [`Step`]s
//! built without any I/O, and then run by the [`Executor`].

pub mod executor;
pub mod plan;
pub mod step;

pub use executor::{ExecutionReport, Executor};
pub use plan::Plan;
pub use step::Step;

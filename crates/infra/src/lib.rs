//! Infrastructure layer: catalog storage, catalog use cases and plan execution.

pub mod catalog;
pub mod plan_runner;

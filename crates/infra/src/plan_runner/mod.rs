//! Runs the allocator against the current catalog.

mod runner;

pub use runner::PlanRunner;

//! Production planning.
//!
//! Holds the bill-of-materials edges (`Requirement`) and the greedy allocator that
//! turns a catalog snapshot into a `ProductionPlan`. Everything here is synchronous
//! and free of IO: callers supply a consistent snapshot and get a plan value back.

pub mod allocator;
pub mod ledger;
pub mod plan;
pub mod requirement;

pub use allocator::{compute_plan, SkipReason};
pub use ledger::StockLedger;
pub use plan::{PlanLine, ProductionPlan};
pub use requirement::{Requirement, RequirementInput};

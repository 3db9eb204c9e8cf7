//! Products domain module.
//!
//! This crate contains business rules for finished products (code, name, unit price),
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::{Product, ProductInput};
pub use prodplan_core::ProductId;

//! Inventory domain module.
//!
//! This crate contains business rules for raw materials and their stock on hand,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod raw_material;

pub use prodplan_core::RawMaterialId;
pub use raw_material::{RawMaterial, RawMaterialInput};

//! `prodplan-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model, and exact-decimal value objects used for
//! prices and material quantities.

pub mod decimal;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use decimal::{floor_div, Money, Quantity};
pub use entity::{CatalogEntity, Entity};
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, RawMaterialId, RequirementId};
pub use value_object::ValueObject;

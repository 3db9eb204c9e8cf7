//! Catalog of products, raw materials and their requirement edges.

pub mod service;
pub mod state;
pub mod store;

pub use service::CatalogService;
pub use state::{Catalog, CatalogSnapshot, RequirementDetails};
pub use store::{CatalogStore, InMemoryCatalogStore};

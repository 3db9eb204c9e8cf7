//! Service wiring shared by every handler.

use std::sync::Arc;

use prodplan_infra::catalog::{CatalogService, InMemoryCatalogStore};
use prodplan_infra::plan_runner::PlanRunner;

pub type SharedStore = Arc<InMemoryCatalogStore>;

/// Catalog CRUD and plan computation over one shared store.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub catalog: CatalogService<SharedStore>,
    pub planner: PlanRunner<SharedStore>,
}

impl AppServices {
    pub fn new(store: SharedStore) -> Self {
        Self {
            catalog: CatalogService::new(store.clone()),
            planner: PlanRunner::new(store),
        }
    }

    /// Fresh, empty in-memory catalog.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryCatalogStore::new()))
    }
}

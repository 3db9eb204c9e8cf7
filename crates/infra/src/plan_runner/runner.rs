use std::time::Instant;

use tracing::info;

use prodplan_planning::{compute_plan, ProductionPlan};

use crate::catalog::{Catalog, CatalogStore};

/// Computes production plans from a consistent catalog snapshot.
///
/// The snapshot is taken under the store's read lock; the allocator itself runs
/// outside it, so catalog writes are never blocked on a plan computation.
#[derive(Debug, Clone)]
pub struct PlanRunner<S> {
    store: S,
}

impl<S: CatalogStore> PlanRunner<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn run(&self) -> ProductionPlan {
        let started = Instant::now();
        let snapshot = self.store.read(Catalog::snapshot);

        let plan = compute_plan(
            &snapshot.products,
            &snapshot.raw_materials,
            &snapshot.requirements,
        );

        info!(
            products = snapshot.products.len(),
            raw_materials = snapshot.raw_materials.len(),
            requirements = snapshot.requirements.len(),
            planned_items = plan.items.len(),
            total_units = plan.total_units(),
            total_value = %plan.total_value,
            elapsed_us = started.elapsed().as_micros() as u64,
            "production plan computed"
        );

        plan
    }
}

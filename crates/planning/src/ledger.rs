use std::collections::HashMap;

use rust_decimal::Decimal;

use prodplan_core::{Entity, RawMaterialId};
use prodplan_inventory::RawMaterial;

/// Remaining raw-material stock during one plan computation.
///
/// Built from a snapshot, mutated while products are committed, then dropped. It is
/// never written back to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockLedger {
    remaining: HashMap<RawMaterialId, Decimal>,
}

impl StockLedger {
    pub fn from_materials(materials: &[RawMaterial]) -> Self {
        let remaining = materials
            .iter()
            .map(|m| (m.id(), m.stock_quantity().amount()))
            .collect();
        Self { remaining }
    }

    /// Remaining stock; materials missing from the snapshot count as zero.
    pub fn available(&self, id: RawMaterialId) -> Decimal {
        self.remaining.get(&id).copied().unwrap_or(Decimal::ZERO)
    }

    /// Consume stock. Only inconsistent input (duplicate edges) can drive it negative.
    pub fn deduct(&mut self, id: RawMaterialId, amount: Decimal) {
        *self.remaining.entry(id).or_insert(Decimal::ZERO) -= amount;
    }
}

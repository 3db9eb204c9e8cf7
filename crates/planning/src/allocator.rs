//! Greedy production allocator.
//!
//! Model:
//! - Visit products by descending unit price (stable: equal prices keep input order).
//! - A product's capacity is the minimum over its requirements of
//!   `floor(remaining stock / quantity required)` (the bottleneck).
//! - Commit that many units, deduct the consumed stock, move on.
//! - Line and plan values must stay exact at two decimals: when the bottleneck would
//!   push the plan past `Money::MAX`, the product gets the largest unit count that
//!   still fits.
//!
//! This favors high-value products first. It is a heuristic, not an optimal
//! multi-dimensional knapsack: a cheaper product can end up starved by an expensive
//! one even when the opposite order would yield more total value.

use std::collections::HashMap;

use rust_decimal::Decimal;

use prodplan_core::{floor_div, CatalogEntity, Entity, Money, ProductId};
use prodplan_inventory::RawMaterial;
use prodplan_products::Product;

use crate::ledger::StockLedger;
use crate::plan::{PlanLine, ProductionPlan};
use crate::requirement::Requirement;

/// Why a product contributed no line to a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The product has no requirement edges, so it is not configured for production.
    NoRequirements,
    /// Some requirement has a zero or negative quantity.
    NonPositiveRequirement,
    /// The bottleneck material leaves room for zero units.
    NoCapacity,
    /// The plan value is already too close to `Money::MAX` for a single unit.
    ValueLimit,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoRequirements => "no_requirements",
            SkipReason::NonPositiveRequirement => "non_positive_requirement",
            SkipReason::NoCapacity => "no_capacity",
            SkipReason::ValueLimit => "value_limit",
        }
    }
}

/// Compute a production plan from a consistent catalog snapshot.
///
/// Pure and deterministic: the inputs are not modified, stock deductions live in a
/// ledger local to this call. Products that cannot be produced are left out of the
/// plan rather than reported as errors.
pub fn compute_plan(
    products: &[Product],
    raw_materials: &[RawMaterial],
    requirements: &[Requirement],
) -> ProductionPlan {
    let mut ordered: Vec<&Product> = products.iter().collect();
    // `sort_by` is stable, which decides who wins contested stock at equal prices.
    ordered.sort_by(|a, b| b.price().cmp(&a.price()));

    let mut by_product: HashMap<ProductId, Vec<&Requirement>> = HashMap::new();
    for req in requirements {
        by_product.entry(req.product_id()).or_default().push(req);
    }

    let mut ledger = StockLedger::from_materials(raw_materials);
    let mut items = Vec::new();
    let mut total_value = Money::ZERO;

    for product in ordered {
        let reqs = by_product
            .get(&product.id())
            .map(Vec::as_slice)
            .unwrap_or_default();

        let planned = bottleneck(reqs, &ledger)
            .and_then(|capacity| within_value_limit(product, capacity, total_value));
        let (units, line_value, next_total) = match planned {
            Ok(planned) => planned,
            Err(reason) => {
                tracing::debug!(
                    product_id = %product.id(),
                    product_code = product.code(),
                    reason = reason.as_str(),
                    "product excluded from production plan"
                );
                continue;
            }
        };

        for req in reqs {
            let consumed = req.quantity_required().amount() * Decimal::from(units);
            ledger.deduct(req.raw_material_id(), consumed);
        }

        total_value = next_total;
        items.push(PlanLine {
            product_id: product.id(),
            product_code: product.code().to_string(),
            product_name: product.name().to_string(),
            unit_price: product.price(),
            units,
            total_value: line_value,
        });
    }

    ProductionPlan { items, total_value }
}

/// Clamp `capacity` so the line value and the new plan total stay representable.
///
/// Returns the units, the line value and the plan total after adding the line.
fn within_value_limit(
    product: &Product,
    capacity: u64,
    total_value: Money,
) -> Result<(u64, Money, Money), SkipReason> {
    let price = product.price();
    let headroom = Money::MAX.checked_sub(total_value).unwrap_or(Money::ZERO);
    let units = capacity.min(price.units_within(headroom));

    if units < capacity {
        tracing::warn!(
            product_id = %product.id(),
            product_code = product.code(),
            capacity,
            units,
            "units capped to keep the plan value representable"
        );
    }
    if units == 0 {
        return Err(SkipReason::ValueLimit);
    }

    let line_value = price.checked_times(units).ok_or(SkipReason::ValueLimit)?;
    let next_total = total_value
        .checked_add(line_value)
        .ok_or(SkipReason::ValueLimit)?;
    Ok((units, line_value, next_total))
}

/// Max producible units for one product given the current ledger.
fn bottleneck(reqs: &[&Requirement], ledger: &StockLedger) -> Result<u64, SkipReason> {
    if reqs.is_empty() {
        return Err(SkipReason::NoRequirements);
    }

    let mut max_units = u64::MAX;
    for req in reqs {
        let required = req.quantity_required();
        if !required.is_positive() {
            return Err(SkipReason::NonPositiveRequirement);
        }

        // `None` means the ratio is not a representable unit count; treat as no capacity.
        let possible = floor_div(ledger.available(req.raw_material_id()), required.amount()).unwrap_or(0);
        max_units = max_units.min(possible);
    }

    if max_units == 0 {
        return Err(SkipReason::NoCapacity);
    }
    Ok(max_units)
}

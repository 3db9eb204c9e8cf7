use serde::Serialize;

use prodplan_core::{Money, ProductId};

/// One product's allocated production quantity and resulting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanLine {
    pub product_id: ProductId,
    pub product_code: String,
    pub product_name: String,
    pub unit_price: Money,
    pub units: u64,
    pub total_value: Money,
}

/// A computed production plan: lines in processing order plus their total value.
///
/// `total_value` is the exact sum of the line totals and never exceeds `Money::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProductionPlan {
    pub items: Vec<PlanLine>,
    pub total_value: Money,
}

impl ProductionPlan {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|line| line.units).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_plan_serializes_with_zero_total() {
        let json = serde_json::to_value(ProductionPlan::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "items": [], "total_value": "0.00" }));
    }

    #[test]
    fn plan_line_serializes_money_as_fixed_strings() {
        let id = ProductId::new();
        let plan = ProductionPlan {
            items: vec![PlanLine {
                product_id: id,
                product_code: "P1".to_string(),
                product_name: "Chair".to_string(),
                unit_price: Money::new(dec!(10)),
                units: 5,
                total_value: Money::new(dec!(50)),
            }],
            total_value: Money::new(dec!(50)),
        };

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["items"][0]["product_id"], id.to_string());
        assert_eq!(json["items"][0]["unit_price"], "10.00");
        assert_eq!(json["items"][0]["units"], 5);
        assert_eq!(json["items"][0]["total_value"], "50.00");
        assert_eq!(json["total_value"], "50.00");
        assert_eq!(plan.total_units(), 5);
    }
}

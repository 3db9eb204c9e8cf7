use axum::response::Response;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use prodplan_core::{CatalogEntity, Entity};
use prodplan_infra::catalog::RequirementDetails;
use prodplan_inventory::RawMaterial;
use prodplan_planning::RequirementInput;
use prodplan_products::Product;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------
//
// Product and raw-material bodies deserialize straight into `ProductInput` /
// `RawMaterialInput`; the entities validate them.

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub delta: Decimal,
}

/// Identifiers arrive as strings so a malformed id maps to `invalid_id`, not a JSON error.
#[derive(Debug, Deserialize)]
pub struct RequirementRequest {
    pub product_id: String,
    pub raw_material_id: String,
    pub quantity_required: Decimal,
}

impl RequirementRequest {
    pub fn into_input(self) -> Result<RequirementInput, Response> {
        Ok(RequirementInput {
            product_id: errors::parse_id(&self.product_id)?,
            raw_material_id: errors::parse_id(&self.raw_material_id)?,
            quantity_required: self.quantity_required,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RequirementFilter {
    pub product_id: Option<String>,
}

// -------------------------
// Response mapping
// -------------------------

pub fn product_to_json(p: &Product) -> Value {
    json!({
        "id": p.id().to_string(),
        "code": p.code(),
        "name": p.name(),
        "price": p.price().to_string(),
    })
}

pub fn raw_material_to_json(m: &RawMaterial) -> Value {
    json!({
        "id": m.id().to_string(),
        "code": m.code(),
        "name": m.name(),
        "stock_quantity": m.stock_quantity().to_string(),
    })
}

pub fn requirement_to_json(d: &RequirementDetails) -> Value {
    let r = &d.requirement;
    json!({
        "id": r.id().to_string(),
        "product_id": r.product_id().to_string(),
        "product_code": d.product_code,
        "product_name": d.product_name,
        "raw_material_id": r.raw_material_id().to_string(),
        "raw_material_code": d.raw_material_code,
        "raw_material_name": d.raw_material_name,
        "quantity_required": r.quantity_required().to_string(),
    })
}

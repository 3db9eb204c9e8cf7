use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use prodplan_core::{DomainResult, Entity, ProductId, Quantity, RawMaterialId, RequirementId};

/// Input for creating or replacing a requirement edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementInput {
    pub product_id: ProductId,
    pub raw_material_id: RawMaterialId,
    pub quantity_required: Decimal,
}

/// How much of one raw material one unit of one product consumes.
///
/// Only the stored precision is validated here. Zero or negative quantities are
/// accepted and make the product unplannable (see [`crate::compute_plan`]).
/// At most one requirement may exist per (product, raw material) pair; the catalog
/// service enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    id: RequirementId,
    product_id: ProductId,
    raw_material_id: RawMaterialId,
    quantity_required: Quantity,
}

impl Requirement {
    pub fn create(id: RequirementId, input: &RequirementInput) -> DomainResult<Self> {
        Ok(Self {
            id,
            product_id: input.product_id,
            raw_material_id: input.raw_material_id,
            quantity_required: Quantity::try_new(input.quantity_required, "quantity_required")?,
        })
    }

    pub fn update(&mut self, input: &RequirementInput) -> DomainResult<()> {
        let quantity_required = Quantity::try_new(input.quantity_required, "quantity_required")?;
        self.product_id = input.product_id;
        self.raw_material_id = input.raw_material_id;
        self.quantity_required = quantity_required;
        Ok(())
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn raw_material_id(&self) -> RawMaterialId {
        self.raw_material_id
    }

    pub fn quantity_required(&self) -> Quantity {
        self.quantity_required
    }

    /// The (product, raw material) pair that must be unique across the catalog.
    pub fn pair(&self) -> (ProductId, RawMaterialId) {
        (self.product_id, self.raw_material_id)
    }
}

impl Entity for Requirement {
    type Id = RequirementId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use prodplan_core::{CatalogEntity, DomainError, DomainResult, Entity, Quantity, RawMaterialId};

/// Input for creating or replacing a raw material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMaterialInput {
    pub code: String,
    pub name: String,
    pub stock_quantity: Decimal,
}

struct RawMaterialFields {
    code: String,
    name: String,
    stock_quantity: Quantity,
}

impl RawMaterialInput {
    fn validate(&self) -> DomainResult<RawMaterialFields> {
        let code = self.code.trim();
        if code.is_empty() {
            return Err(DomainError::validation("code cannot be empty"));
        }

        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let stock_quantity = Quantity::try_new(self.stock_quantity, "stock_quantity")?;
        if stock_quantity.is_negative() {
            return Err(DomainError::validation("stock_quantity cannot be negative"));
        }

        Ok(RawMaterialFields {
            code: code.to_string(),
            name: name.to_string(),
            stock_quantity,
        })
    }
}

/// A raw material with its current stock on hand (three fractional digits).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawMaterial {
    id: RawMaterialId,
    code: String,
    name: String,
    stock_quantity: Quantity,
}

impl RawMaterial {
    pub fn create(id: RawMaterialId, input: &RawMaterialInput) -> DomainResult<Self> {
        let fields = input.validate()?;
        Ok(Self {
            id,
            code: fields.code,
            name: fields.name,
            stock_quantity: fields.stock_quantity,
        })
    }

    /// Replace code, name and stock. On error the material is left untouched.
    pub fn update(&mut self, input: &RawMaterialInput) -> DomainResult<()> {
        let fields = input.validate()?;
        self.code = fields.code;
        self.name = fields.name;
        self.stock_quantity = fields.stock_quantity;
        Ok(())
    }

    /// Apply a stock movement (receipt when positive, issue when negative).
    pub fn adjust_stock(&mut self, delta: Decimal) -> DomainResult<()> {
        let delta = Quantity::try_new(delta, "delta")?;
        if delta.amount().is_zero() {
            return Err(DomainError::validation("delta cannot be zero"));
        }

        let sum = self
            .stock_quantity
            .amount()
            .checked_add(delta.amount())
            .ok_or_else(|| DomainError::validation("stock_quantity out of range"))?;
        let new_stock = Quantity::try_new(sum, "stock_quantity")?;
        if new_stock.is_negative() {
            return Err(DomainError::validation("stock cannot go negative"));
        }

        self.stock_quantity = new_stock;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stock_quantity(&self) -> Quantity {
        self.stock_quantity
    }
}

impl Entity for RawMaterial {
    type Id = RawMaterialId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl CatalogEntity for RawMaterial {
    fn code(&self) -> &str {
        &self.code
    }
}

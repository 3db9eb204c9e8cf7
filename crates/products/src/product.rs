use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use prodplan_core::{CatalogEntity, DomainError, DomainResult, Entity, Money, ProductId};

/// Input for creating or replacing a product (both operations take the full record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub code: String,
    pub name: String,
    pub price: Decimal,
}

/// Validated, normalized product fields.
struct ProductFields {
    code: String,
    name: String,
    price: Money,
}

impl ProductInput {
    fn validate(&self) -> DomainResult<ProductFields> {
        let code = self.code.trim();
        if code.is_empty() {
            return Err(DomainError::validation("code cannot be empty"));
        }

        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        // Code uniqueness needs the whole catalog; the catalog service checks it
        // before persisting.
        Ok(ProductFields {
            code: code.to_string(),
            name: name.to_string(),
            price: Money::try_new(self.price, "price")?,
        })
    }
}

/// A finished product that can be planned for production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    code: String,
    name: String,
    price: Money,
}

impl Product {
    /// Build a new product from caller input.
    pub fn create(id: ProductId, input: &ProductInput) -> DomainResult<Self> {
        let fields = input.validate()?;
        Ok(Self {
            id,
            code: fields.code,
            name: fields.name,
            price: fields.price,
        })
    }

    /// Replace code, name and price. On error the product is left untouched.
    pub fn update(&mut self, input: &ProductInput) -> DomainResult<()> {
        let fields = input.validate()?;
        self.code = fields.code;
        self.name = fields.name;
        self.price = fields.price;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price (two fractional digits).
    pub fn price(&self) -> Money {
        self.price
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl CatalogEntity for Product {
    fn code(&self) -> &str {
        &self.code
    }
}

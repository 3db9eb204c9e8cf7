//! In-memory catalog state with the cross-entity rules a single entity cannot check:
//! code uniqueness, requirement pair uniqueness, and referential integrity.

use rust_decimal::Decimal;

use prodplan_core::{
    CatalogEntity, DomainError, DomainResult, Entity, ProductId, RawMaterialId, RequirementId,
};
use prodplan_inventory::{RawMaterial, RawMaterialInput};
use prodplan_planning::{Requirement, RequirementInput};
use prodplan_products::{Product, ProductInput};

/// A point-in-time copy of the whole catalog, as consumed by the planner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub raw_materials: Vec<RawMaterial>,
    pub requirements: Vec<Requirement>,
}

/// A requirement together with the codes and names of both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementDetails {
    pub requirement: Requirement,
    pub product_code: String,
    pub product_name: String,
    pub raw_material_code: String,
    pub raw_material_name: String,
}

/// Catalog collections. Each `Vec` keeps insertion order, which is the order the
/// planner sees (and therefore the tie-break between equally priced products).
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    raw_materials: Vec<RawMaterial>,
    requirements: Vec<Requirement>,
}

fn ensure_unique_code<E: CatalogEntity>(
    entities: &[E],
    code: &str,
    except: Option<E::Id>,
    kind: &str,
) -> DomainResult<()> {
    let taken = entities
        .iter()
        .any(|e| e.code() == code && Some(e.id()) != except);
    if taken {
        return Err(DomainError::conflict(format!("{kind} code already exists: {code}")));
    }
    Ok(())
}

fn position<E: Entity>(entities: &[E], id: E::Id) -> DomainResult<usize> {
    entities
        .iter()
        .position(|e| e.id() == id)
        .ok_or_else(DomainError::not_found)
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            products: self.products.clone(),
            raw_materials: self.raw_materials.clone(),
            requirements: self.requirements.clone(),
        }
    }

    // -------------------------
    // Products
    // -------------------------

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: ProductId) -> DomainResult<&Product> {
        Ok(&self.products[position(&self.products, id)?])
    }

    pub fn create_product(&mut self, id: ProductId, input: &ProductInput) -> DomainResult<Product> {
        let product = Product::create(id, input)?;
        ensure_unique_code(&self.products, product.code(), None, "product")?;
        self.products.push(product.clone());
        Ok(product)
    }

    pub fn update_product(&mut self, id: ProductId, input: &ProductInput) -> DomainResult<Product> {
        let idx = position(&self.products, id)?;
        let mut updated = self.products[idx].clone();
        updated.update(input)?;
        ensure_unique_code(&self.products, updated.code(), Some(id), "product")?;
        self.products[idx] = updated.clone();
        Ok(updated)
    }

    pub fn delete_product(&mut self, id: ProductId) -> DomainResult<Product> {
        let idx = position(&self.products, id)?;
        let refs = self.requirements.iter().filter(|r| r.product_id() == id).count();
        if refs > 0 {
            return Err(DomainError::conflict(format!(
                "product is still referenced by {refs} requirement(s)"
            )));
        }
        Ok(self.products.remove(idx))
    }

    // -------------------------
    // Raw materials
    // -------------------------

    pub fn raw_materials(&self) -> &[RawMaterial] {
        &self.raw_materials
    }

    pub fn raw_material(&self, id: RawMaterialId) -> DomainResult<&RawMaterial> {
        Ok(&self.raw_materials[position(&self.raw_materials, id)?])
    }

    pub fn create_raw_material(
        &mut self,
        id: RawMaterialId,
        input: &RawMaterialInput,
    ) -> DomainResult<RawMaterial> {
        let material = RawMaterial::create(id, input)?;
        ensure_unique_code(&self.raw_materials, material.code(), None, "raw material")?;
        self.raw_materials.push(material.clone());
        Ok(material)
    }

    pub fn update_raw_material(
        &mut self,
        id: RawMaterialId,
        input: &RawMaterialInput,
    ) -> DomainResult<RawMaterial> {
        let idx = position(&self.raw_materials, id)?;
        let mut updated = self.raw_materials[idx].clone();
        updated.update(input)?;
        ensure_unique_code(&self.raw_materials, updated.code(), Some(id), "raw material")?;
        self.raw_materials[idx] = updated.clone();
        Ok(updated)
    }

    pub fn adjust_stock(&mut self, id: RawMaterialId, delta: Decimal) -> DomainResult<RawMaterial> {
        let idx = position(&self.raw_materials, id)?;
        self.raw_materials[idx].adjust_stock(delta)?;
        Ok(self.raw_materials[idx].clone())
    }

    pub fn delete_raw_material(&mut self, id: RawMaterialId) -> DomainResult<RawMaterial> {
        let idx = position(&self.raw_materials, id)?;
        let refs = self
            .requirements
            .iter()
            .filter(|r| r.raw_material_id() == id)
            .count();
        if refs > 0 {
            return Err(DomainError::conflict(format!(
                "raw material is still referenced by {refs} requirement(s)"
            )));
        }
        Ok(self.raw_materials.remove(idx))
    }

    // -------------------------
    // Requirements
    // -------------------------

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn requirement(&self, id: RequirementId) -> DomainResult<&Requirement> {
        Ok(&self.requirements[position(&self.requirements, id)?])
    }

    /// Join a requirement with both of its ends.
    pub fn details(&self, requirement: &Requirement) -> DomainResult<RequirementDetails> {
        let product = self.product(requirement.product_id())?;
        let material = self.raw_material(requirement.raw_material_id())?;
        Ok(RequirementDetails {
            requirement: requirement.clone(),
            product_code: product.code().to_string(),
            product_name: product.name().to_string(),
            raw_material_code: material.code().to_string(),
            raw_material_name: material.name().to_string(),
        })
    }

    fn ensure_requirement_refs(&self, input: &RequirementInput, except: Option<RequirementId>) -> DomainResult<()> {
        self.product(input.product_id)?;
        self.raw_material(input.raw_material_id)?;

        let duplicate = self.requirements.iter().any(|r| {
            r.pair() == (input.product_id, input.raw_material_id) && Some(r.id()) != except
        });
        if duplicate {
            return Err(DomainError::conflict(
                "association already exists for this product and raw material",
            ));
        }
        Ok(())
    }

    pub fn create_requirement(
        &mut self,
        id: RequirementId,
        input: &RequirementInput,
    ) -> DomainResult<RequirementDetails> {
        self.ensure_requirement_refs(input, None)?;
        let requirement = Requirement::create(id, input)?;
        let details = self.details(&requirement)?;
        self.requirements.push(requirement);
        Ok(details)
    }

    pub fn update_requirement(
        &mut self,
        id: RequirementId,
        input: &RequirementInput,
    ) -> DomainResult<RequirementDetails> {
        let idx = position(&self.requirements, id)?;
        self.ensure_requirement_refs(input, Some(id))?;
        let mut updated = self.requirements[idx].clone();
        updated.update(input)?;
        let details = self.details(&updated)?;
        self.requirements[idx] = updated;
        Ok(details)
    }

    pub fn delete_requirement(&mut self, id: RequirementId) -> DomainResult<Requirement> {
        let idx = position(&self.requirements, id)?;
        Ok(self.requirements.remove(idx))
    }
}

//! Catalog use cases: CRUD for products, raw materials and requirements.
//!
//! All rules live in [`Catalog`]; this layer picks identifiers, runs each operation
//! inside one store transaction and logs what changed.

use rust_decimal::Decimal;
use tracing::{debug, info};

use prodplan_core::{
    CatalogEntity, DomainError, DomainResult, Entity, ProductId, RawMaterialId, RequirementId,
};
use prodplan_inventory::{RawMaterial, RawMaterialInput};
use prodplan_planning::RequirementInput;
use prodplan_products::{Product, ProductInput};

use super::state::{Catalog, RequirementDetails};
use super::store::CatalogStore;

fn log_rejection(operation: &'static str, err: &DomainError) {
    debug!(operation, error = %err, "catalog operation rejected");
}

#[derive(Debug, Clone)]
pub struct CatalogService<S> {
    store: S,
}

impl<S: CatalogStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // -------------------------
    // Products
    // -------------------------

    pub fn list_products(&self) -> Vec<Product> {
        self.store.read(|c| c.products().to_vec())
    }

    pub fn get_product(&self, id: ProductId) -> DomainResult<Product> {
        self.store.read(|c| c.product(id).cloned())
    }

    pub fn create_product(&self, input: &ProductInput) -> DomainResult<Product> {
        let product = self
            .store
            .write(|c| c.create_product(ProductId::new(), input))
            .inspect_err(|e| log_rejection("create_product", e))?;
        info!(product_id = %product.id(), code = product.code(), price = %product.price(), "product created");
        Ok(product)
    }

    pub fn update_product(&self, id: ProductId, input: &ProductInput) -> DomainResult<Product> {
        let product = self
            .store
            .write(|c| c.update_product(id, input))
            .inspect_err(|e| log_rejection("update_product", e))?;
        info!(product_id = %id, code = product.code(), price = %product.price(), "product updated");
        Ok(product)
    }

    pub fn delete_product(&self, id: ProductId) -> DomainResult<()> {
        let removed = self
            .store
            .write(|c| c.delete_product(id))
            .inspect_err(|e| log_rejection("delete_product", e))?;
        info!(product_id = %id, code = removed.code(), "product deleted");
        Ok(())
    }

    // -------------------------
    // Raw materials
    // -------------------------

    pub fn list_raw_materials(&self) -> Vec<RawMaterial> {
        self.store.read(|c| c.raw_materials().to_vec())
    }

    pub fn get_raw_material(&self, id: RawMaterialId) -> DomainResult<RawMaterial> {
        self.store.read(|c| c.raw_material(id).cloned())
    }

    pub fn create_raw_material(&self, input: &RawMaterialInput) -> DomainResult<RawMaterial> {
        let material = self
            .store
            .write(|c| c.create_raw_material(RawMaterialId::new(), input))
            .inspect_err(|e| log_rejection("create_raw_material", e))?;
        info!(
            raw_material_id = %material.id(),
            code = material.code(),
            stock_quantity = %material.stock_quantity(),
            "raw material created"
        );
        Ok(material)
    }

    pub fn update_raw_material(
        &self,
        id: RawMaterialId,
        input: &RawMaterialInput,
    ) -> DomainResult<RawMaterial> {
        let material = self
            .store
            .write(|c| c.update_raw_material(id, input))
            .inspect_err(|e| log_rejection("update_raw_material", e))?;
        info!(
            raw_material_id = %id,
            code = material.code(),
            stock_quantity = %material.stock_quantity(),
            "raw material updated"
        );
        Ok(material)
    }

    pub fn adjust_stock(&self, id: RawMaterialId, delta: Decimal) -> DomainResult<RawMaterial> {
        let material = self
            .store
            .write(|c| c.adjust_stock(id, delta))
            .inspect_err(|e| log_rejection("adjust_stock", e))?;
        info!(
            raw_material_id = %id,
            delta = %delta,
            stock_quantity = %material.stock_quantity(),
            "raw material stock adjusted"
        );
        Ok(material)
    }

    pub fn delete_raw_material(&self, id: RawMaterialId) -> DomainResult<()> {
        let removed = self
            .store
            .write(|c| c.delete_raw_material(id))
            .inspect_err(|e| log_rejection("delete_raw_material", e))?;
        info!(raw_material_id = %id, code = removed.code(), "raw material deleted");
        Ok(())
    }

    // -------------------------
    // Requirements
    // -------------------------

    /// All requirements, optionally only those of one product.
    pub fn list_requirements(&self, product_id: Option<ProductId>) -> Vec<RequirementDetails> {
        self.store.read(|c: &Catalog| {
            c.requirements()
                .iter()
                .filter(|r| product_id.is_none_or(|p| r.product_id() == p))
                .filter_map(|r| c.details(r).ok())
                .collect()
        })
    }

    pub fn get_requirement(&self, id: RequirementId) -> DomainResult<RequirementDetails> {
        self.store.read(|c| c.details(c.requirement(id)?))
    }

    pub fn create_requirement(&self, input: &RequirementInput) -> DomainResult<RequirementDetails> {
        let details = self
            .store
            .write(|c| c.create_requirement(RequirementId::new(), input))
            .inspect_err(|e| log_rejection("create_requirement", e))?;
        info!(
            requirement_id = %details.requirement.id(),
            product_code = details.product_code.as_str(),
            raw_material_code = details.raw_material_code.as_str(),
            quantity_required = %details.requirement.quantity_required(),
            "requirement created"
        );
        Ok(details)
    }

    pub fn update_requirement(
        &self,
        id: RequirementId,
        input: &RequirementInput,
    ) -> DomainResult<RequirementDetails> {
        let details = self
            .store
            .write(|c| c.update_requirement(id, input))
            .inspect_err(|e| log_rejection("update_requirement", e))?;
        info!(
            requirement_id = %id,
            product_code = details.product_code.as_str(),
            raw_material_code = details.raw_material_code.as_str(),
            quantity_required = %details.requirement.quantity_required(),
            "requirement updated"
        );
        Ok(details)
    }

    pub fn delete_requirement(&self, id: RequirementId) -> DomainResult<()> {
        self.store
            .write(|c| c.delete_requirement(id))
            .inspect_err(|e| log_rejection("delete_requirement", e))?;
        info!(requirement_id = %id, "requirement deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use crate::catalog::InMemoryCatalogStore;

    fn service() -> CatalogService<Arc<InMemoryCatalogStore>> {
        CatalogService::new(Arc::new(InMemoryCatalogStore::new()))
    }

    fn product(svc: &CatalogService<Arc<InMemoryCatalogStore>>, code: &str) -> Product {
        svc.create_product(&ProductInput {
            code: code.to_string(),
            name: format!("Product {code}"),
            price: dec!(10),
        })
        .unwrap()
    }

    fn material(svc: &CatalogService<Arc<InMemoryCatalogStore>>, code: &str) -> RawMaterial {
        svc.create_raw_material(&RawMaterialInput {
            code: code.to_string(),
            name: format!("Material {code}"),
            stock_quantity: dec!(100),
        })
        .unwrap()
    }

    #[test]
    fn created_product_can_be_fetched_and_listed() {
        let svc = service();
        let p = product(&svc, "P1");

        assert_eq!(svc.get_product(p.id()).unwrap(), p);
        assert_eq!(svc.list_products(), vec![p]);
    }

    #[test]
    fn get_unknown_product_is_not_found() {
        let svc = service();
        assert_eq!(svc.get_product(ProductId::new()).unwrap_err(), DomainError::NotFound);
    }

    #[test]
    fn requirements_can_be_filtered_by_product() {
        let svc = service();
        let p1 = product(&svc, "P1");
        let p2 = product(&svc, "P2");
        let m = material(&svc, "M1");

        for p in [&p1, &p2] {
            svc.create_requirement(&RequirementInput {
                product_id: p.id(),
                raw_material_id: m.id(),
                quantity_required: dec!(1.5),
            })
            .unwrap();
        }

        assert_eq!(svc.list_requirements(None).len(), 2);
        let only_p2 = svc.list_requirements(Some(p2.id()));
        assert_eq!(only_p2.len(), 1);
        assert_eq!(only_p2[0].product_code, "P2");
        assert_eq!(only_p2[0].raw_material_name, "Material M1");
    }

    #[test]
    fn requirement_round_trip_through_service() {
        let svc = service();
        let p = product(&svc, "P1");
        let m = material(&svc, "M1");
        let created = svc
            .create_requirement(&RequirementInput {
                product_id: p.id(),
                raw_material_id: m.id(),
                quantity_required: dec!(2),
            })
            .unwrap();
        let id = created.requirement.id();

        assert_eq!(svc.get_requirement(id).unwrap(), created);
        svc.delete_requirement(id).unwrap();
        assert_eq!(svc.get_requirement(id).unwrap_err(), DomainError::NotFound);
    }

    #[test]
    fn stock_adjustment_is_persisted() {
        let svc = service();
        let m = material(&svc, "M1");

        svc.adjust_stock(m.id(), dec!(-40)).unwrap();
        assert_eq!(svc.get_raw_material(m.id()).unwrap().stock_quantity().to_string(), "60.000");

        let err = svc.adjust_stock(m.id(), dec!(-61)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}

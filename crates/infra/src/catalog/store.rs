use std::sync::{Arc, PoisonError, RwLock};

use prodplan_core::DomainResult;

use super::state::Catalog;

/// Storage boundary for the catalog.
///
/// Every closure runs against one consistent view: `read` sees no concurrent writes,
/// and `write` applies all-or-nothing (a closure that returns `Err` must leave the
/// catalog untouched; `Catalog` methods guarantee that by validating first).
pub trait CatalogStore: Send + Sync {
    fn read<R>(&self, f: impl FnOnce(&Catalog) -> R) -> R;
    fn write<R>(&self, f: impl FnOnce(&mut Catalog) -> DomainResult<R>) -> DomainResult<R>;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore,
{
    fn read<R>(&self, f: impl FnOnce(&Catalog) -> R) -> R {
        (**self).read(f)
    }

    fn write<R>(&self, f: impl FnOnce(&mut Catalog) -> DomainResult<R>) -> DomainResult<R> {
        (**self).write(f)
    }
}

/// In-memory catalog store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<Catalog>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            inner: RwLock::new(catalog),
        }
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn read<R>(&self, f: impl FnOnce(&Catalog) -> R) -> R {
        // A panicking writer cannot leave partial state behind (see `write`), so a
        // poisoned lock is still safe to read.
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&*guard)
    }

    fn write<R>(&self, f: impl FnOnce(&mut Catalog) -> DomainResult<R>) -> DomainResult<R> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodplan_core::{DomainError, ProductId};
    use prodplan_products::ProductInput;
    use rust_decimal::Decimal;

    fn input(code: &str) -> ProductInput {
        ProductInput {
            code: code.to_string(),
            name: "Widget".to_string(),
            price: Decimal::ONE,
        }
    }

    #[test]
    fn failed_write_leaves_catalog_untouched() {
        let store = InMemoryCatalogStore::new();
        store.write(|c| c.create_product(ProductId::new(), &input("P1"))).unwrap();

        let err = store
            .write(|c| c.create_product(ProductId::new(), &input("P1")))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(store.read(|c| c.products().len()), 1);
    }

    #[test]
    fn arc_store_delegates() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let shared = store.clone();
        shared.write(|c| c.create_product(ProductId::new(), &input("P1"))).unwrap();
        assert_eq!(store.read(|c| c.snapshot().products.len()), 1);
    }

    #[test]
    fn concurrent_creates_with_same_code_admit_exactly_one() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .write(|c| c.create_product(ProductId::new(), &input("RACE")))
                        .is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
    }
}

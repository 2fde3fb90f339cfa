use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::errors::ServiceError;
use crate::observability;
use crate::products::catalog::ProductCatalog;
use crate::products::model::{NewProduct, Product, ProductPatch, ProductUpdated};
use crate::storage::JsonRecordStore;

const STORE_NAME: &str = "products";

/// File-backed product collection with unique `code` enforcement.
pub struct ProductStore {
    store: JsonRecordStore<Product>,
}

impl ProductStore {
    /// Load products from `path`, creating an empty file if it is missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonRecordStore::open(STORE_NAME, path).await?;
        Ok(Arc::new(Self { store }))
    }

    /// All products, or the first `limit` of them in stored order.
    pub async fn list(&self, limit: Option<usize>) -> Vec<Product> {
        self.store.list(limit).await
    }

    pub async fn get(&self, id: u64) -> Result<Product, ServiceError> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| ServiceError::not_found("product", id))
    }

    /// Validate, check the code is free, assign the next id and persist.
    pub async fn add(&self, input: NewProduct) -> Result<Product, ServiceError> {
        let mut product = input.validate()?;
        let created = self
            .store
            .mutate(|draft| {
                if draft.records.iter().any(|p| p.code == product.code) {
                    return Err(ServiceError::duplicate_code(&product.code));
                }
                product.id = draft.allocate_id();
                draft.records.push(product.clone());
                Ok(product)
            })
            .await?;
        observability::record_mutation(STORE_NAME, "create");
        info!(product_id = created.id, code = %created.code, "product created");
        Ok(created)
    }

    /// Shallow-merge `patch` onto product `id`. A new `code` must not belong
    /// to another product; keeping the product's own code is fine.
    pub async fn update(&self, id: u64, patch: ProductPatch) -> Result<ProductUpdated, ServiceError> {
        let product = self
            .store
            .mutate(|draft| {
                draft.position(id).ok_or_else(|| ServiceError::not_found("product", id))?;
                if let Some(code) = patch.code.as_deref() {
                    if draft.records.iter().any(|p| p.code == code && p.id != id) {
                        return Err(ServiceError::duplicate_code(code));
                    }
                }
                let Some(existing) = draft.get_mut(id) else {
                    return Err(ServiceError::not_found("product", id));
                };
                patch.apply_to(existing);
                Ok(existing.clone())
            })
            .await?;
        observability::record_mutation(STORE_NAME, "update");
        info!(product_id = id, "product updated");
        Ok(ProductUpdated { product, message: "Product updated successfully".into() })
    }

    /// Delete product `id` and persist; returns the removed product.
    pub async fn remove(&self, id: u64) -> Result<Product, ServiceError> {
        let removed = self
            .store
            .remove(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("product", id))?;
        observability::record_mutation(STORE_NAME, "delete");
        info!(product_id = id, code = %removed.code, "product deleted");
        Ok(removed)
    }

    pub async fn len(&self) -> usize {
        self.store.len().await
    }
}

#[async_trait]
impl ProductCatalog for ProductStore {
    async fn find_product(&self, id: u64) -> Result<Product, ServiceError> {
        self.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("svc_products_{}.json", Uuid::new_v4()))
    }

    fn input(code: &str) -> NewProduct {
        NewProduct {
            title: Some(format!("Product {code}")),
            description: Some("A product".into()),
            price: Some(120.0),
            thumbnail: Some("thumb.png".into()),
            code: Some(code.into()),
            stock: Some(5),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increase() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::open(&tmp).await?;

        let a = store.add(input("A")).await?;
        let b = store.add(input("B")).await?;
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.get(2).await?.code, "B");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_price_is_rejected_and_nothing_is_stored() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::open(&tmp).await?;

        let mut bad = input("A");
        bad.price = None;
        assert!(matches!(store.add(bad).await, Err(ServiceError::Validation(_))));
        assert_eq!(store.len().await, 0);

        // the failed attempt does not burn an id
        assert_eq!(store.add(input("A")).await?.id, 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_code_conflicts() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::open(&tmp).await?;

        store.add(input("SAME")).await?;
        assert!(matches!(store.add(input("SAME")).await, Err(ServiceError::Conflict(_))));
        assert_eq!(store.len().await, 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_code_conflicts_only_with_other_products() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::open(&tmp).await?;
        store.add(input("A")).await?;
        store.add(input("B")).await?;

        let clash = ProductPatch { code: Some("A".into()), ..Default::default() };
        assert!(matches!(store.update(2, clash).await, Err(ServiceError::Conflict(_))));
        assert_eq!(store.get(2).await?.code, "B");

        let own = ProductPatch { code: Some("B".into()), stock: Some(42), ..Default::default() };
        let updated = store.update(2, own).await?;
        assert_eq!(updated.product.code, "B");
        assert_eq!(updated.product.stock, 42);
        assert!(!updated.message.is_empty());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_merges_shallowly_and_keeps_id() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::open(&tmp).await?;
        let original = store.add(input("A")).await?;

        let patch: ProductPatch = serde_json::from_value(json!({"title": "Renamed", "id": 77}))?;
        let updated = store.update(original.id, patch).await?.product;

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.price, original.price);
        assert!(store.get(77).await.is_err());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id_is_not_found() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::open(&tmp).await?;

        assert!(matches!(store.update(9, ProductPatch::default()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.remove(9).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.get(9).await, Err(ServiceError::NotFound(_))));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn list_limit_returns_first_entries_in_order() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::open(&tmp).await?;
        for code in ["A", "B", "C", "D", "E"] {
            store.add(input(code)).await?;
        }

        let first_two: Vec<String> = store.list(Some(2)).await.into_iter().map(|p| p.code).collect();
        assert_eq!(first_two, vec!["A", "B"]);
        assert_eq!(store.list(None).await.len(), 5);
        assert_eq!(store.list(Some(50)).await.len(), 5);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn reload_reproduces_state_after_mutations() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::open(&tmp).await?;
        store.add(input("A")).await?;
        store.add(input("B")).await?;
        store.add(input("C")).await?;
        store.update(1, ProductPatch { title: Some("Alpha".into()), ..Default::default() }).await?;
        store.remove(2).await?;

        let reloaded = ProductStore::open(&tmp).await?;
        assert_eq!(reloaded.list(None).await, store.list(None).await);
        assert_eq!(reloaded.add(input("D")).await?.id, 4);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_adds_with_same_code_admit_one() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::open(&tmp).await?;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.add(input("RACE")).await }));
        }
        let mut ok = 0;
        for h in handles {
            if h.await?.is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(ProductStore::open(&tmp).await?.len().await, 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn loads_files_with_extra_attributes() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let seeded = json!([{
            "id": 10, "title": "Yerba", "description": "1kg", "price": 3200,
            "thumbnail": "y.png", "code": "YER", "stock": 3, "status": true
        }]);
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(&seeded)?).await?;

        let store = ProductStore::open(&tmp).await?;
        let product = store.get(10).await?;
        assert_eq!(product.extra.get("status"), Some(&json!(true)));
        assert_eq!(store.add(input("NEW")).await?.id, 11);

        let raw: serde_json::Value = serde_json::from_slice(&tokio::fs::read(&tmp).await?)?;
        assert_eq!(raw[0]["status"], json!(true));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}

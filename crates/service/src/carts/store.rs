use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::carts::model::Cart;
use crate::errors::ServiceError;
use crate::observability;
use crate::products::ProductCatalog;
use crate::storage::JsonRecordStore;

const STORE_NAME: &str = "carts";

/// File-backed cart collection. Products are checked through the injected
/// catalog before they are added.
pub struct CartStore {
    store: JsonRecordStore<Cart>,
    catalog: Arc<dyn ProductCatalog>,
}

impl CartStore {
    /// Load carts from `path`, creating an empty file if it is missing.
    pub async fn open<P: Into<PathBuf>>(path: P, catalog: Arc<dyn ProductCatalog>) -> Result<Arc<Self>, ServiceError> {
        let store = JsonRecordStore::open(STORE_NAME, path).await?;
        Ok(Arc::new(Self { store, catalog }))
    }

    /// Create an empty cart with the next id.
    pub async fn create(&self) -> Result<Cart, ServiceError> {
        let cart = self
            .store
            .mutate(|draft| {
                let cart = Cart::new(draft.allocate_id());
                draft.records.push(cart.clone());
                Ok(cart)
            })
            .await?;
        observability::record_mutation(STORE_NAME, "create");
        info!(cart_id = cart.id, "cart created");
        Ok(cart)
    }

    pub async fn get(&self, cid: u64) -> Result<Cart, ServiceError> {
        self.store
            .get(cid)
            .await
            .ok_or_else(|| ServiceError::not_found("cart", cid))
    }

    pub async fn list(&self) -> Vec<Cart> {
        self.store.list(None).await
    }

    pub async fn len(&self) -> usize {
        self.store.len().await
    }

    /// Delete cart `cid` and persist.
    pub async fn remove(&self, cid: u64) -> Result<Cart, ServiceError> {
        let removed = self
            .store
            .remove(cid)
            .await?
            .ok_or_else(|| ServiceError::not_found("cart", cid))?;
        observability::record_mutation(STORE_NAME, "delete");
        info!(cart_id = cid, "cart deleted");
        Ok(removed)
    }

    /// Put `quantity` of product `pid` into cart `cid`.
    ///
    /// Fails with `NotFound` when the cart is missing, then when the product
    /// is unknown to the catalog; in both cases the cart is left unchanged.
    pub async fn add_product(&self, cid: u64, pid: u64, quantity: u32) -> Result<Cart, ServiceError> {
        self.get(cid).await?;
        let product = self.catalog.find_product(pid).await?;
        debug!(cart_id = cid, product_id = pid, code = %product.code, "product exists; adding to cart");

        let cart = self
            .store
            .mutate(|draft| {
                let cart = draft.get_mut(cid).ok_or_else(|| ServiceError::not_found("cart", cid))?;
                cart.add_item(pid, quantity)?;
                Ok(cart.clone())
            })
            .await?;
        observability::record_mutation(STORE_NAME, "add_product");
        info!(cart_id = cid, product_id = pid, quantity, total = ?cart.quantity_of(pid), "product added to cart");
        Ok(cart)
    }
}

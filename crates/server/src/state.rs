use std::sync::Arc;

use configs::StorageConfig;
use service::carts::CartStore;
use service::errors::ServiceError;
use service::products::{ProductCatalog, ProductStore};

/// Stores shared by every handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductStore>,
    pub carts: Arc<CartStore>,
}

impl AppState {
    /// Open both stores from the configured files; the cart store checks
    /// products against the product store.
    pub async fn open(storage: &StorageConfig) -> Result<Self, ServiceError> {
        let products = ProductStore::open(storage.products_path()).await?;
        let catalog: Arc<dyn ProductCatalog> = products.clone();
        let carts = CartStore::open(storage.carts_path(), catalog).await?;
        Ok(Self { products, carts })
    }
}

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::products::model::Product;

/// Read-only product lookup used by the cart store to check that a product
/// exists before it lands in a cart.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Returns the product or [`ServiceError::NotFound`].
    async fn find_product(&self, id: u64) -> Result<Product, ServiceError>;
}

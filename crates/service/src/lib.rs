//! Service layer: JSON-file record stores for products and carts.
//! - `storage` holds the generic whole-file store both entity stores build on.
//! - `products` and `carts` own validation and the cross-store product check.
//! - Errors are reported through `errors::ServiceError`.

pub mod carts;
pub mod errors;
pub mod observability;
pub mod pagination;
pub mod products;
pub mod runtime;
pub mod storage;

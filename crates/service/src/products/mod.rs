//! Product catalog: model, validation and the file-backed store.

pub mod catalog;
pub mod model;
pub mod store;

pub use catalog::ProductCatalog;
pub use model::{NewProduct, Product, ProductPatch, ProductUpdated};
pub use store::ProductStore;

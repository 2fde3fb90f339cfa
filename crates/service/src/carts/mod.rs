//! Shopping carts: line items keyed by product id, checked against the
//! product catalog before insertion.

pub mod model;
pub mod store;

pub use model::{Cart, LineItem};
pub use store::CartStore;

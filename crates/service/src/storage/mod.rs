//! Storage abstractions for service layer
//!
//! Contains the file-backed record store shared by the product and cart
//! stores so neither re-implements load, id allocation or persistence.

pub mod json_record_store;

pub use json_record_store::{Draft, JsonRecordStore, Record};

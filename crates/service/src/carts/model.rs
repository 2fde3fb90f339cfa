use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::storage::Record;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: u64,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    pub id: u64,
    #[serde(default)]
    pub products: Vec<LineItem>,
}

impl Record for Cart {
    fn id(&self) -> u64 { self.id }
}

impl Cart {
    pub fn new(id: u64) -> Self {
        Self { id, products: Vec::new() }
    }

    /// Add `quantity` of `product_id`: bump the existing line item or append
    /// a new one holding exactly `quantity`.
    pub fn add_item(&mut self, product_id: u64, quantity: u32) -> Result<&LineItem, ServiceError> {
        match self.products.iter().position(|item| item.product_id == product_id) {
            Some(idx) => {
                let item = &mut self.products[idx];
                item.quantity = item.quantity.checked_add(quantity).ok_or_else(|| {
                    ServiceError::Validation(format!("quantity overflow for product {}", product_id))
                })?;
                Ok(&self.products[idx])
            }
            None => {
                self.products.push(LineItem { product_id, quantity });
                Ok(&self.products[self.products.len() - 1])
            }
        }
    }

    pub fn quantity_of(&self, product_id: u64) -> Option<u32> {
        self.products
            .iter()
            .find(|item| item.product_id == product_id)
            .map(|item| item.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn repeated_adds_fold_into_one_line() {
        let mut cart = Cart::new(1);
        cart.add_item(5, 2).unwrap();
        cart.add_item(7, 1).unwrap();
        let item = cart.add_item(5, 3).unwrap();
        assert_eq!(item.quantity, 5);
        assert_eq!(cart.products.len(), 2);
        assert_eq!(cart.products[0], LineItem { product_id: 5, quantity: 5 });
    }

    #[test]
    fn first_add_stores_exact_quantity() {
        let mut cart = Cart::new(1);
        cart.add_item(9, 4).unwrap();
        assert_eq!(cart.quantity_of(9), Some(4));
        assert_eq!(cart.quantity_of(8), None);
    }

    #[test]
    fn overflow_is_rejected() {
        let mut cart = Cart::new(1);
        cart.add_item(1, u32::MAX).unwrap();
        assert!(matches!(cart.add_item(1, 1), Err(ServiceError::Validation(_))));
        assert_eq!(cart.quantity_of(1), Some(u32::MAX));
    }

    #[test]
    fn uses_camel_case_on_the_wire() {
        let mut cart = Cart::new(3);
        cart.add_item(5, 2).unwrap();
        assert_eq!(
            serde_json::to_value(&cart).unwrap(),
            json!({"id": 3, "products": [{"productId": 5, "quantity": 2}]})
        );
        let parsed: Cart = serde_json::from_value(json!({"id": 4})).unwrap();
        assert!(parsed.products.is_empty());
    }
}

//! Shopping cart: distinct products with accumulated quantities.

use crate::error::CommerceError;
use crate::product::Product;
use crate::shipping::{ShippingError, ShippingMethod};
use serde::Serialize;

/// A product together with its accumulated quantity.
#[derive(Debug, Clone, Serialize)]
struct CartItem {
    product: Product,
    quantity: u32,
}

/// A shopping cart.
///
/// Each product id appears at most once; adding an id a second time
/// accumulates its quantity instead of duplicating the entry.
/// Iteration yields items in first-insertion order. Amounts and
/// totals are computed fresh on every call — the cart is the single
/// source of truth and caches nothing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShoppingCart {
    items: Vec<CartItem>,
}

impl ShoppingCart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a product with the given quantity (1 for a single unit).
    ///
    /// If the product id is already present the quantity accumulates
    /// and the stored product is replaced by the one supplied here.
    ///
    /// Returns an error if `quantity` is zero or the accumulated
    /// quantity would overflow.
    pub fn add_item(&mut self, product: Product, quantity: u32) -> Result<(), CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.product.id() == product.id())
        {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            existing.product = product;
            return Ok(());
        }

        self.items.push(CartItem { product, quantity });
        Ok(())
    }

    /// Number of distinct product ids (not the sum of quantities).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity stored for a product id, or 0 when absent.
    pub fn item_quantity(&self, product_id: i64) -> u32 {
        self.find(product_id).map_or(0, |item| item.quantity)
    }

    /// Price of the product with the given id.
    pub fn item_price(&self, product_id: i64) -> Result<f64, CommerceError> {
        self.find(product_id)
            .map(|item| item.product.price())
            .ok_or(CommerceError::ItemNotFound(product_id))
    }

    /// Line amount for a product id: price times quantity.
    pub fn item_amount(&self, product_id: i64) -> Result<f64, CommerceError> {
        self.find(product_id)
            .map(|item| item.product.price() * f64::from(item.quantity))
            .ok_or(CommerceError::ItemNotFound(product_id))
    }

    /// Sum of all line amounts; 0.0 for an empty cart.
    pub fn item_total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.product.price() * f64::from(item.quantity))
            .sum()
    }

    /// Iterate over `(product_id, product)` pairs in first-insertion
    /// order. The iterator is restartable: each call starts over.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.items.iter(),
        }
    }

    /// Shipping cost for this cart between two postal codes.
    ///
    /// An empty cart costs 0.0 and the method is never invoked.
    /// Otherwise the result of the method is returned unmodified.
    pub fn shipping_amount(
        &self,
        method: &dyn ShippingMethod,
        shipping_from: &str,
        shipping_to: &str,
    ) -> Result<f64, ShippingError> {
        if self.is_empty() {
            return Ok(0.0);
        }

        method.shipping_amount(self, shipping_from, shipping_to)
    }

    fn find(&self, product_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id() == product_id)
    }
}

/// Iterator over the cart's `(product_id, product)` pairs.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, CartItem>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (i64, &'a Product);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|item| (item.product.id(), &item.product))
    }
}

impl<'a> IntoIterator for &'a ShoppingCart {
    type Item = (i64, &'a Product);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(id: i64, name: &str, price: f64) -> Product {
        Product::new(
            &json!(id),
            &json!(name),
            &json!(price),
            &json!(1),
            &json!(2),
            &json!(15),
            &json!(30),
        )
        .unwrap()
    }

    /// Shipping method that must never be called.
    struct Unreachable;

    impl ShippingMethod for Unreachable {
        fn shipping_amount(
            &self,
            _cart: &ShoppingCart,
            _from: &str,
            _to: &str,
        ) -> Result<f64, ShippingError> {
            panic!("shipping method invoked for an empty cart");
        }
    }

    #[test]
    fn test_adding_the_same_id_accumulates_quantity() {
        let mut cart = ShoppingCart::new();
        cart.add_item(product(123, "item 1", 100.0), 1).unwrap();
        cart.add_item(product(123, "item 1", 100.0), 1).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_quantity(123), 2);
    }

    #[test]
    fn test_distinct_products_keep_insertion_order() {
        let mut cart = ShoppingCart::new();
        cart.add_item(product(456, "item 2", 20.0), 1).unwrap();
        cart.add_item(product(123, "item 1", 10.0), 1).unwrap();

        assert_eq!(cart.len(), 2);
        let ids: Vec<i64> = cart.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![456, 123]);

        // Restartable: a second pass yields the same sequence.
        let ids: Vec<i64> = (&cart).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![456, 123]);
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let mut cart = ShoppingCart::new();
        assert_eq!(
            cart.add_item(product(123, "item 1", 10.0), 0),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_absent_id_quantity_is_zero() {
        let cart = ShoppingCart::new();
        assert_eq!(cart.item_quantity(123), 0);
    }

    #[test]
    fn test_absent_id_price_and_amount_fail() {
        let cart = ShoppingCart::new();
        assert_eq!(cart.item_price(123), Err(CommerceError::ItemNotFound(123)));
        assert_eq!(cart.item_amount(123), Err(CommerceError::ItemNotFound(123)));
    }

    #[test]
    fn test_item_amount_is_price_times_quantity() {
        let mut cart = ShoppingCart::new();
        cart.add_item(product(123, "item 1", 25.5), 3).unwrap();

        assert_eq!(cart.item_price(123), Ok(25.5));
        assert_eq!(cart.item_amount(123), Ok(76.5));
    }

    #[test]
    fn test_item_total_sums_all_amounts() {
        let mut cart = ShoppingCart::new();
        cart.add_item(product(123, "item 1", 10.0), 2).unwrap();
        cart.add_item(product(456, "item 2", 20.0), 1).unwrap();

        assert_eq!(cart.item_total(), 40.0);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert_eq!(ShoppingCart::new().item_total(), 0.0);
    }

    #[test]
    fn test_empty_cart_ships_for_free_without_calling_the_method() {
        let cart = ShoppingCart::new();
        let amount = cart
            .shipping_amount(&Unreachable, "14400000", "01000000")
            .unwrap();
        assert_eq!(amount, 0.0);
    }

    #[test]
    fn test_re_adding_replaces_the_stored_product() {
        let mut cart = ShoppingCart::new();
        cart.add_item(product(123, "item 1", 10.0), 1).unwrap();
        cart.add_item(product(123, "item 1 v2", 15.0), 1).unwrap();

        assert_eq!(cart.item_price(123), Ok(15.0));
        assert_eq!(cart.item_quantity(123), 2);
    }
}

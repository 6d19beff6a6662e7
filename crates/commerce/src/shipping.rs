//! Shipping cost calculation.
//!
//! [`ShippingMethod`] is the seam between the cart and a carrier:
//! the cart passes itself plus an origin and destination code, the
//! method answers with a cost. Carrier implementations live in their
//! own crates (Correios in `cesta-correios`); [`FlatRate`] is the
//! in-tree implementation for stores with a single fixed fee.

use crate::cart::ShoppingCart;
use thiserror::Error;

/// Errors produced while computing a shipping quote.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShippingError {
    /// The carrier answered with a service-level error. Code and
    /// message are carried verbatim from the carrier.
    #[error("carrier error {code}: {message}")]
    Carrier { code: i32, message: String },

    /// The remote call failed before a quote was produced. Fatal for
    /// this quote; nothing is retried.
    #[error("carrier transport failure: {0}")]
    Transport(String),

    /// The carrier response could not be understood.
    #[error("malformed carrier response: {0}")]
    MalformedResponse(String),
}

/// A pluggable shipping-cost calculator.
pub trait ShippingMethod {
    /// Compute the shipping cost for `cart` between two postal codes.
    fn shipping_amount(
        &self,
        cart: &ShoppingCart,
        shipping_from: &str,
        shipping_to: &str,
    ) -> Result<f64, ShippingError>;
}

/// Fixed-fee shipping, independent of cart contents and route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatRate {
    amount: f64,
}

impl FlatRate {
    /// Create a flat-rate method charging `amount` per shipment.
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }
}

impl ShippingMethod for FlatRate {
    fn shipping_amount(
        &self,
        _cart: &ShoppingCart,
        _shipping_from: &str,
        _shipping_to: &str,
    ) -> Result<f64, ShippingError> {
        Ok(self.amount)
    }
}

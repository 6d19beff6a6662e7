//! Shopping cart domain types and logic for Cesta.
//!
//! This crate provides the in-process API of a minimal store:
//!
//! - **Product**: a value object whose fields are validated on
//!   construction and on every mutation
//! - **ShoppingCart**: distinct products with accumulated quantities,
//!   line amounts, and totals
//! - **ShippingMethod**: a pluggable shipping-cost calculator; the
//!   Correios implementation lives in the `cesta-correios` crate
//!
//! # Example
//!
//! ```
//! use cesta_commerce::prelude::*;
//! use serde_json::json;
//!
//! let book = Product::new(
//!     &json!(123),
//!     &json!("Rust Programming Book"),
//!     &json!(49.9),
//!     &json!(1),
//!     &json!(2),
//!     &json!(15),
//!     &json!(30),
//! )?;
//!
//! let mut cart = ShoppingCart::new();
//! cart.add_item(book, 2)?;
//!
//! assert_eq!(cart.item_total(), 99.8);
//! # Ok::<(), cesta_commerce::CommerceError>(())
//! ```

pub mod cart;
pub mod error;
pub mod product;
pub mod scalar;
pub mod shipping;

pub use cart::ShoppingCart;
pub use error::{CommerceError, ProductField};
pub use product::Product;
pub use scalar::Scalar;
pub use shipping::{FlatRate, ShippingError, ShippingMethod};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::ShoppingCart;
    pub use crate::error::{CommerceError, ProductField};
    pub use crate::product::Product;
    pub use crate::scalar::Scalar;
    pub use crate::shipping::{FlatRate, ShippingError, ShippingMethod};
}

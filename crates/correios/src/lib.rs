//! Correios (ECT) shipping estimator for Cesta.
//!
//! Implements [`cesta_commerce::ShippingMethod`] against the Correios
//! `CalcPrecoPrazo` SOAP web service: cart contents are aggregated
//! into a single package, marshaled into the carrier's request shape,
//! and the quoted value comes back as the shipping cost.
//!
//! One synchronous request-response exchange per quote; no retries,
//! no caching.
//!
//! # Example
//!
//! ```rust,ignore
//! use cesta_commerce::prelude::*;
//! use cesta_correios::Ect;
//!
//! let amount = cart.shipping_amount(&Ect::new(), "14400000", "01000000")?;
//! ```

mod client;
mod dimensions;
mod envelope;
mod transport;

pub use client::{Ect, ENDPOINT, SEDEX};
pub use dimensions::PackageDimensions;
pub use envelope::{RateRequest, ServiceQuote};
pub use transport::{HttpTransport, SoapTransport};

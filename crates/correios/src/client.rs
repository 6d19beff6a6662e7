//! The ECT carrier client.

use crate::dimensions::PackageDimensions;
use crate::envelope::{self, RateRequest};
use crate::transport::{HttpTransport, SoapTransport};
use cesta_commerce::{ShippingError, ShippingMethod, ShoppingCart};
use tracing::{debug, warn};

/// Public rate-quote endpoint of the Correios calculator service.
pub const ENDPOINT: &str = "http://ws.correios.com.br/calculador/CalcPrecoPrazo.asmx";

/// Service code for the SEDEX express tier.
pub const SEDEX: u32 = 40010;

const SOAP_ACTION: &str = "http://tempuri.org/CalcPrecoPrazo";

/// Correios (ECT) shipping estimator.
///
/// Quotes the SEDEX tariff for the cart packed as a single parcel.
/// Stateless across calls: dimensions are aggregated fresh for every
/// quote. Generic over the transport so tests can stand in for the
/// remote service.
#[derive(Debug, Clone)]
pub struct Ect<T = HttpTransport> {
    endpoint: String,
    transport: T,
}

impl Ect<HttpTransport> {
    /// Client against the public Correios endpoint.
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }
}

impl Default for Ect<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SoapTransport> Ect<T> {
    /// Client with a custom transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            endpoint: ENDPOINT.to_string(),
            transport,
        }
    }

    /// Override the service endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl<T: SoapTransport> ShippingMethod for Ect<T> {
    fn shipping_amount(
        &self,
        cart: &ShoppingCart,
        shipping_from: &str,
        shipping_to: &str,
    ) -> Result<f64, ShippingError> {
        let dimensions = PackageDimensions::from_cart(cart);
        debug!(
            weight = dimensions.weight,
            height = dimensions.height,
            width = dimensions.width,
            length = dimensions.length,
            "aggregated package dimensions"
        );

        let request = RateRequest::new(shipping_from, shipping_to, dimensions, SEDEX);
        let body = self
            .transport
            .call(&self.endpoint, SOAP_ACTION, &request.to_envelope()?)?;

        let quote = envelope::parse_response(&body)?;
        if quote.error_code != 0 {
            warn!(
                code = quote.error_code,
                message = %quote.error_message,
                "carrier reported an error"
            );
        }

        quote.amount()
    }
}

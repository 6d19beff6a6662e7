//! SOAP transport.

use cesta_commerce::ShippingError;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

/// Posts a SOAP envelope and returns the raw response body.
///
/// The seam that keeps the carrier client testable: production uses
/// [`HttpTransport`], tests substitute a canned implementation.
pub trait SoapTransport {
    /// Send `envelope` to `endpoint` with the given `SOAPAction`.
    fn call(&self, endpoint: &str, action: &str, envelope: &str)
        -> Result<String, ShippingError>;
}

impl<T: SoapTransport + ?Sized> SoapTransport for &T {
    fn call(
        &self,
        endpoint: &str,
        action: &str,
        envelope: &str,
    ) -> Result<String, ShippingError> {
        (**self).call(endpoint, action, envelope)
    }
}

/// Blocking HTTP transport.
///
/// One request-response exchange per call. Failures map to
/// [`ShippingError::Transport`] and are fatal for the quote; there is
/// no retry and no timeout handling beyond reqwest's own.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SoapTransport for HttpTransport {
    fn call(
        &self,
        endpoint: &str,
        action: &str,
        envelope: &str,
    ) -> Result<String, ShippingError> {
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", action)
            .body(envelope.to_string())
            .send()
            .map_err(|err| ShippingError::Transport(err.to_string()))?
            .error_for_status()
            .map_err(|err| ShippingError::Transport(err.to_string()))?;

        response
            .text()
            .map_err(|err| ShippingError::Transport(err.to_string()))
    }
}

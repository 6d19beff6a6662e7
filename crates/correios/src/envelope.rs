//! SOAP envelope construction and response parsing for
//! `CalcPrecoPrazo`.
//!
//! The service is document/literal SOAP 1.1. The request element
//! carries the carrier's field names in a fixed order; the response
//! nests the quote under `CalcPrecoPrazoResult > Servicos > cServico`.

use crate::dimensions::PackageDimensions;
use cesta_commerce::ShippingError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const SERVICE_NS: &str = "http://tempuri.org/";

/// Request record for the `CalcPrecoPrazo` operation.
///
/// Credentials stay empty (the public tariff needs none) and the
/// handling flags carry the carrier's defaults: no own-hands
/// delivery, no declared value, no receipt notice, package format 1
/// (box), diameter 0.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRequest {
    pub company_code: String,
    pub password: String,
    pub origin: String,
    pub destination: String,
    pub dimensions: PackageDimensions,
    pub service_code: u32,
}

impl RateRequest {
    /// Build a request for the given route, package, and service tier.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        dimensions: PackageDimensions,
        service_code: u32,
    ) -> Self {
        Self {
            company_code: String::new(),
            password: String::new(),
            origin: origin.into(),
            destination: destination.into(),
            dimensions,
            service_code,
        }
    }

    /// Serialize into a SOAP 1.1 envelope.
    pub fn to_envelope(&self) -> Result<String, ShippingError> {
        write_envelope(self).map_err(|err| ShippingError::Transport(err.to_string()))
    }
}

fn write_envelope(request: &RateRequest) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut envelope = BytesStart::new("soap:Envelope");
    envelope.push_attribute(("xmlns:soap", SOAP_NS));
    writer.write_event(Event::Start(envelope))?;
    writer.write_event(Event::Start(BytesStart::new("soap:Body")))?;

    let mut operation = BytesStart::new("CalcPrecoPrazo");
    operation.push_attribute(("xmlns", SERVICE_NS));
    writer.write_event(Event::Start(operation))?;

    let dims = &request.dimensions;

    // Field order is fixed by the service contract.
    write_field(&mut writer, "nCdEmpresa", &request.company_code)?;
    write_field(&mut writer, "sDsSenha", &request.password)?;
    write_field(&mut writer, "sCepOrigem", &request.origin)?;
    write_field(&mut writer, "sCepDestino", &request.destination)?;
    write_field(&mut writer, "nVlPeso", &dims.weight.to_string())?;
    write_field(&mut writer, "nCdFormato", "1")?;
    write_field(&mut writer, "nVlComprimento", &dims.length.to_string())?;
    write_field(&mut writer, "nVlAltura", &dims.height.to_string())?;
    write_field(&mut writer, "nVlLargura", &dims.width.to_string())?;
    write_field(&mut writer, "sCdMaoPropria", "n")?;
    write_field(&mut writer, "nVlValorDeclarado", "0")?;
    write_field(&mut writer, "sCdAvisoRecebimento", "n")?;
    write_field(&mut writer, "nCdServico", &request.service_code.to_string())?;
    write_field(&mut writer, "nVlDiametro", "0")?;

    writer.write_event(Event::End(BytesEnd::new("CalcPrecoPrazo")))?;
    writer.write_event(Event::End(BytesEnd::new("soap:Body")))?;
    writer.write_event(Event::End(BytesEnd::new("soap:Envelope")))?;

    String::from_utf8(writer.into_inner())
        .map_err(|err| quick_xml::Error::NonDecodable(Some(err.utf8_error())))
}

fn write_field<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// The single service quote inside a `CalcPrecoPrazo` response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceQuote {
    /// `Codigo` — service tier the quote applies to.
    pub service_code: Option<i64>,
    /// `Valor` — quoted value, verbatim (the carrier uses a comma
    /// decimal separator, e.g. `"10,50"`).
    pub value: Option<String>,
    /// `Erro` — 0 means success; absent counts as 0.
    pub error_code: i32,
    /// `MsgErro` — carrier error message, empty on success.
    pub error_message: String,
}

impl ServiceQuote {
    /// The shipping cost, or the carrier's error.
    pub fn amount(&self) -> Result<f64, ShippingError> {
        if self.error_code != 0 {
            return Err(ShippingError::Carrier {
                code: self.error_code,
                message: self.error_message.clone(),
            });
        }

        let raw = self.value.as_deref().ok_or_else(|| {
            ShippingError::MalformedResponse("cServico is missing Valor".to_string())
        })?;

        parse_carrier_decimal(raw).ok_or_else(|| {
            ShippingError::MalformedResponse(format!("unparseable Valor: {raw:?}"))
        })
    }
}

/// Parse the carrier's decimal format: comma decimal separator, dot
/// as thousands separator (`"1.234,56"` is 1234.56).
fn parse_carrier_decimal(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.contains(',') {
        raw.replace('.', "").replace(',', ".").parse().ok()
    } else {
        raw.parse().ok()
    }
}

/// Extract the `cServico` quote from a response envelope.
pub(crate) fn parse_response(xml: &str) -> Result<ServiceQuote, ShippingError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut quote = ServiceQuote::default();
    let mut seen_service = false;
    let mut in_service = false;
    let mut current: Option<Vec<u8>> = None;

    loop {
        match reader
            .read_event()
            .map_err(|err| ShippingError::MalformedResponse(err.to_string()))?
        {
            Event::Start(e) if e.local_name().as_ref() == b"cServico" => {
                seen_service = true;
                in_service = true;
            }
            Event::End(e) if e.local_name().as_ref() == b"cServico" => {
                in_service = false;
            }
            Event::Start(e) if in_service => {
                current = Some(e.local_name().as_ref().to_vec());
            }
            Event::End(_) if in_service => {
                current = None;
            }
            Event::Text(e) if in_service => {
                let text = e
                    .unescape()
                    .map_err(|err| ShippingError::MalformedResponse(err.to_string()))?
                    .into_owned();

                match current.as_deref() {
                    Some(b"Codigo") => quote.service_code = text.trim().parse().ok(),
                    Some(b"Valor") => quote.value = Some(text),
                    Some(b"Erro") => {
                        quote.error_code = text.trim().parse().map_err(|_| {
                            ShippingError::MalformedResponse(format!(
                                "unparseable Erro: {text:?}"
                            ))
                        })?;
                    }
                    Some(b"MsgErro") => quote.error_message = text,
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_service {
        return Err(ShippingError::MalformedResponse(
            "response has no cServico record".to_string(),
        ));
    }

    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RateRequest {
        RateRequest::new(
            "14400000",
            "01000000",
            PackageDimensions {
                weight: 3.0,
                height: 6.0,
                width: 15.0,
                length: 30,
            },
            40010,
        )
    }

    fn response(service_fields: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <CalcPrecoPrazoResponse xmlns="http://tempuri.org/">
      <CalcPrecoPrazoResult>
        <Servicos>
          <cServico>{service_fields}</cServico>
        </Servicos>
      </CalcPrecoPrazoResult>
    </CalcPrecoPrazoResponse>
  </soap:Body>
</soap:Envelope>"#
        )
    }

    #[test]
    fn test_envelope_carries_every_field_in_contract_order() {
        let envelope = request().to_envelope().unwrap();

        let expected = [
            "<nCdEmpresa></nCdEmpresa>",
            "<sDsSenha></sDsSenha>",
            "<sCepOrigem>14400000</sCepOrigem>",
            "<sCepDestino>01000000</sCepDestino>",
            "<nVlPeso>3</nVlPeso>",
            "<nCdFormato>1</nCdFormato>",
            "<nVlComprimento>30</nVlComprimento>",
            "<nVlAltura>6</nVlAltura>",
            "<nVlLargura>15</nVlLargura>",
            "<sCdMaoPropria>n</sCdMaoPropria>",
            "<nVlValorDeclarado>0</nVlValorDeclarado>",
            "<sCdAvisoRecebimento>n</sCdAvisoRecebimento>",
            "<nCdServico>40010</nCdServico>",
            "<nVlDiametro>0</nVlDiametro>",
        ];

        let mut last = 0;
        for field in expected {
            let at = envelope.find(field).unwrap_or_else(|| {
                panic!("envelope is missing {field}: {envelope}");
            });
            assert!(at >= last, "{field} is out of order");
            last = at;
        }
    }

    #[test]
    fn test_envelope_declares_soap_and_service_namespaces() {
        let envelope = request().to_envelope().unwrap();
        assert!(envelope.contains(r#"xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/""#));
        assert!(envelope.contains(r#"<CalcPrecoPrazo xmlns="http://tempuri.org/">"#));
    }

    #[test]
    fn test_fractional_weight_uses_a_dot_separator() {
        let mut req = request();
        req.dimensions.weight = 1.5;
        assert!(req.to_envelope().unwrap().contains("<nVlPeso>1.5</nVlPeso>"));
    }

    #[test]
    fn test_parse_successful_response() {
        let body = response("<Codigo>40010</Codigo><Valor>123</Valor><Erro>0</Erro>");
        let quote = parse_response(&body).unwrap();

        assert_eq!(quote.service_code, Some(40010));
        assert_eq!(quote.error_code, 0);
        assert_eq!(quote.amount(), Ok(123.0));
    }

    #[test]
    fn test_parse_comma_decimal_value() {
        let body = response("<Codigo>40010</Codigo><Valor>1.234,56</Valor><Erro>0</Erro>");
        assert_eq!(parse_response(&body).unwrap().amount(), Ok(1234.56));
    }

    #[test]
    fn test_carrier_error_surfaces_code_and_message() {
        let body =
            response("<Codigo>40010</Codigo><Erro>1</Erro><MsgErro>An error message</MsgErro>");
        let quote = parse_response(&body).unwrap();

        assert_eq!(
            quote.amount(),
            Err(ShippingError::Carrier {
                code: 1,
                message: "An error message".to_string(),
            })
        );
    }

    #[test]
    fn test_absent_error_field_counts_as_success() {
        let body = response("<Codigo>40010</Codigo><Valor>10,50</Valor>");
        assert_eq!(parse_response(&body).unwrap().amount(), Ok(10.5));
    }

    #[test]
    fn test_missing_value_is_malformed() {
        let body = response("<Codigo>40010</Codigo><Erro>0</Erro>");
        assert!(matches!(
            parse_response(&body).unwrap().amount(),
            Err(ShippingError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_response_without_service_record_is_malformed() {
        let err = parse_response("<Envelope><Body></Body></Envelope>").unwrap_err();
        assert!(matches!(err, ShippingError::MalformedResponse(_)));
    }

    #[test]
    fn test_garbage_response_is_malformed() {
        assert!(matches!(
            parse_response("not xml at all <<<"),
            Err(ShippingError::MalformedResponse(_))
        ));
    }
}

//! Private SOAP client for Wemo device communication
//!
//! This crate provides a minimal SOAP 1.1 client for the `basicevent` control
//! service exposed by Belkin Wemo devices. Envelope construction lives here so
//! every caller produces the same wire format; the device-specific action
//! tables live in `wemo-api`.

mod error;

pub use error::SoapError;

use std::time::Duration;
use tracing::debug;
use xmltree::Element;

const CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Raw HTTP outcome of a SOAP call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapResponse {
    /// HTTP status code returned by the device
    pub status: u16,
    /// Full response body as text
    pub body: String,
}

impl SoapResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the HTTP status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Return the body of a successful response
    ///
    /// A non-success status becomes [`SoapError::Fault`] when the body carries
    /// a UPnP error code, and [`SoapError::Status`] otherwise.
    pub fn into_body(self) -> Result<String, SoapError> {
        if self.is_success() {
            return Ok(self.body);
        }
        match fault_code(&self.body) {
            Some(code) => Err(SoapError::Fault(code)),
            None => Err(SoapError::Status(self.status)),
        }
    }
}

/// Capability to POST a SOAP document and get the raw reply back
///
/// [`SoapClient`] is the network implementation. Tests substitute their own
/// recording transports.
pub trait SoapTransport {
    /// POST `body` to `url` with the given `SOAPAction` header value
    ///
    /// Implementations return `Ok` for any HTTP status the device answered
    /// with; `Err` is reserved for failures to complete the exchange.
    fn post(&self, url: &str, soap_action: &str, body: &str) -> Result<SoapResponse, SoapError>;
}

impl<T: SoapTransport + ?Sized> SoapTransport for &T {
    fn post(&self, url: &str, soap_action: &str, body: &str) -> Result<SoapResponse, SoapError> {
        (**self).post(url, soap_action, body)
    }
}

/// Build the quoted `SOAPAction` header value, e.g. `"urn:...:1#GetBinaryState"`
pub fn soap_action(service_uri: &str, action: &str) -> String {
    format!("\"{}#{}\"", service_uri, action)
}

/// Wrap an action and its argument payload in a SOAP 1.1 envelope
///
/// `payload` is inserted verbatim inside `<u:{action}>`; callers escape any
/// user-provided text before passing it here.
pub fn envelope(service_uri: &str, action: &str, payload: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
  <s:Body>
    <u:{action} xmlns:u="{service_uri}">{payload}</u:{action}>
  </s:Body>
</s:Envelope>"#,
        action = action,
        service_uri = service_uri,
        payload = payload
    )
}

/// Extract the UPnP error code from a SOAP fault document
///
/// Returns `None` when the body is not XML, has no `Fault`, or the error code
/// is not a non-negative integer.
pub fn fault_code(body: &str) -> Option<u16> {
    let xml = Element::parse(body.as_bytes()).ok()?;
    let fault = xml.get_child("Body")?.get_child("Fault")?;
    let detail = fault.get_child("detail")?;
    let upnp_error = detail
        .get_child("UPnPError")
        .or_else(|| detail.get_child("UpnPError"))?;
    upnp_error
        .get_child("errorCode")
        .and_then(|c| c.get_text())
        .and_then(|t| t.trim().parse::<u16>().ok())
}

/// A minimal SOAP client for Wemo device communication
#[derive(Debug, Clone)]
pub struct SoapClient {
    agent: ureq::Agent,
}

impl SoapClient {
    /// Create a new SOAP client with default configuration
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(5))
                .timeout_read(Duration::from_secs(10))
                .build(),
        }
    }

    /// Create a client whose whole request (connect, send, read) is bounded by `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl SoapTransport for SoapClient {
    fn post(&self, url: &str, soap_action: &str, body: &str) -> Result<SoapResponse, SoapError> {
        debug!(url, soap_action, "POST SOAP request");

        let result = self
            .agent
            .post(url)
            .set("Content-Type", CONTENT_TYPE)
            .set("SOAPAction", soap_action)
            .send_string(body);

        // ureq reports 4xx/5xx as errors; keep them as responses so the
        // caller decides what a failed status means.
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(e) => return Err(SoapError::Network(e.to_string())),
        };

        let status = response.status();
        let text = response
            .into_string()
            .map_err(|e| SoapError::Network(e.to_string()))?;

        debug!(status, body = %text, "SOAP response");
        Ok(SoapResponse::new(status, text))
    }
}

impl Default for SoapClient {
    fn default() -> Self {
        Self::new()
    }
}

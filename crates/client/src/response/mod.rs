//! Gateway XML responses.
//!
//! Documents are deserialized with `quick-xml` into the raw shapes in
//! [`xml`] (all text, mirroring the wire format) and then converted into the
//! typed structs exported here. A document whose root is `<errors>` becomes
//! [`PagSeguroError::Gateway`] whatever type was requested.

mod checkout;
mod search;
mod transaction;
mod xml;

use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use pagseguro_core::Amount;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::PagSeguroError;

pub use checkout::CheckoutResponse;
pub use search::{Transaction, TransactionSearchResult};
pub use transaction::{
    TransactionAddress, TransactionDetails, TransactionItem, TransactionSender,
    TransactionShipping,
};

/// One `<error>` entry of a gateway error document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    /// Gateway error code, e.g. `11004`.
    pub code: String,
    /// Message in the gateway's language.
    pub message: String,
}

/// Types that can be built from a gateway XML document.
pub trait FromXml: Sized {
    /// Root element name of the document.
    const ROOT: &'static str;

    /// Parse a raw document.
    ///
    /// `config` only carries format hints (e.g. the payment host).
    ///
    /// # Errors
    ///
    /// Returns [`PagSeguroError::Gateway`] for `<errors>` documents,
    /// [`PagSeguroError::Xml`] for malformed XML, and
    /// [`PagSeguroError::Parse`] for values of the wrong type.
    fn from_xml(xml: &str, config: &Config) -> Result<Self, PagSeguroError>;
}

/// Name of the first element in the document.
pub(crate) fn root_element(xml: &str) -> Result<String, PagSeguroError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader
            .read_event()
            .map_err(|e| PagSeguroError::Xml(e.into()))?
        {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Event::Eof => {
                return Err(PagSeguroError::Parse("empty XML document".to_string()));
            }
            _ => {}
        }
    }
}

/// Extract the gateway errors if `xml` is an `<errors>` document.
///
/// Returns `Ok(None)` for any other document, including one that is not XML.
///
/// # Errors
///
/// Returns [`PagSeguroError::Xml`] if the root is `<errors>` but the
/// document is malformed.
pub(crate) fn gateway_errors(
    xml: &str,
) -> Result<Option<Vec<GatewayError>>, PagSeguroError> {
    if root_element(xml).ok().as_deref() != Some("errors") {
        return Ok(None);
    }

    let errors: xml::ErrorsXml = quick_xml::de::from_str(xml)?;
    Ok(Some(
        errors
            .error
            .into_iter()
            .map(|e| GatewayError {
                code: e.code.unwrap_or_default(),
                message: e.message.unwrap_or_default(),
            })
            .collect(),
    ))
}

/// Deserialize a document after checking its root element.
fn parse_document<T: DeserializeOwned>(xml: &str, root: &str) -> Result<T, PagSeguroError> {
    if let Some(errors) = gateway_errors(xml)? {
        return Err(PagSeguroError::Gateway(errors));
    }

    let found = root_element(xml)?;
    if found != root {
        return Err(PagSeguroError::Parse(format!(
            "expected <{root}> document, got <{found}>"
        )));
    }

    Ok(quick_xml::de::from_str(xml)?)
}

// =============================================================================
// Field conversions
// =============================================================================

fn parse_datetime(field: &str, value: &str) -> Result<DateTime<FixedOffset>, PagSeguroError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map_err(|e| PagSeguroError::Parse(format!("{field}: {e} ({value:?})")))
}

fn parse_optional_datetime(
    field: &str,
    value: Option<&str>,
) -> Result<Option<DateTime<FixedOffset>>, PagSeguroError> {
    non_empty(value)
        .map(|v| parse_datetime(field, v))
        .transpose()
}

fn parse_amount(field: &str, value: Option<&str>) -> Result<Amount, PagSeguroError> {
    non_empty(value).map_or(Ok(Amount::ZERO), |v| {
        v.parse()
            .map_err(|e| PagSeguroError::Parse(format!("{field}: {e}")))
    })
}

fn parse_number<T>(field: &str, value: Option<&str>) -> Result<Option<T>, PagSeguroError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    non_empty(value)
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|e| PagSeguroError::Parse(format!("{field}: {e} ({v:?})")))
        })
        .transpose()
}

/// Parse a gateway code into one of the core code enums.
fn parse_code<T: From<u16>>(field: &str, value: Option<&str>) -> Result<Option<T>, PagSeguroError> {
    Ok(parse_number::<u16>(field, value)?.map(T::from))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

//! Checkout creation responses.

use chrono::{DateTime, FixedOffset};
use url::Url;

use super::xml::CheckoutXml;
use super::{FromXml, parse_optional_datetime};
use crate::config::Config;
use crate::error::PagSeguroError;

/// A checkout the gateway accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutResponse {
    /// Checkout code, valid for two hours.
    pub code: String,
    pub date: Option<DateTime<FixedOffset>>,
    /// Page the buyer is redirected to.
    pub payment_url: Url,
}

impl FromXml for CheckoutResponse {
    const ROOT: &'static str = "checkout";

    fn from_xml(xml: &str, config: &Config) -> Result<Self, PagSeguroError> {
        let raw: CheckoutXml = super::parse_document(xml, Self::ROOT)?;

        let code = raw.code.trim().to_string();
        if code.is_empty() {
            return Err(PagSeguroError::Parse("checkout: empty code".to_string()));
        }

        let payment_url = config.payment_url(&code);
        let payment_url = Url::parse(&payment_url)
            .map_err(|e| PagSeguroError::Parse(format!("payment URL {payment_url:?}: {e}")))?;

        Ok(Self {
            date: parse_optional_datetime("date", raw.date.as_deref())?,
            code,
            payment_url,
        })
    }
}

//! PagSeguro client errors.

use pagseguro_core::{CnpjError, CpfError, EmailError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::response::GatewayError;

/// Errors that can occur when talking to PagSeguro.
#[derive(Debug, Error)]
pub enum PagSeguroError {
    /// A checkout field failed validation before anything was sent.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The response body is not well-formed XML for the expected document.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// A well-formed document held a value of the wrong type.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The gateway answered with an `<errors>` document.
    #[error("Gateway errors: {}", format_gateway_errors(.0))]
    Gateway(Vec<GatewayError>),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway answered with a non-success status and no error document.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
}

impl PagSeguroError {
    /// Whether this is a validation failure raised before any request.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// A checkout field with an invalid value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for {field}: {source}")]
pub struct ValidationError {
    field: &'static str,
    source: InvalidValue,
}

impl ValidationError {
    pub(crate) const fn new(field: &'static str, source: InvalidValue) -> Self {
        Self { field, source }
    }

    /// Gateway key of the offending field, e.g. `senderEmail`.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Why the value was rejected.
    #[must_use]
    pub const fn reason(&self) -> &InvalidValue {
        &self.source
    }
}

/// Why a field value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidValue {
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Cpf(#[from] CpfError),
    #[error(transparent)]
    Cnpj(#[from] CnpjError),
}

fn format_gateway_errors(errors: &[GatewayError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .map(|e| match (e.code.is_empty(), e.message.is_empty()) {
            (false, false) => format!("[{}] {}", e.code, e.message),
            (true, false) => e.message.clone(),
            (false, true) => format!("[{}]", e.code),
            (true, true) => "(no details)".to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

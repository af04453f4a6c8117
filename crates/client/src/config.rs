//! Gateway configuration and account credentials.
//!
//! # Environment Variables
//!
//! ## Required (for [`Credentials::from_env`])
//! - `PAGSEGURO_EMAIL` - Seller account email
//! - `PAGSEGURO_TOKEN` - Seller account API token
//!
//! ## Optional (for [`Config::from_env`])
//! - `PAGSEGURO_SANDBOX` - Use the sandbox hosts (default: false)
//! - `PAGSEGURO_CURRENCY` - Checkout currency (default: BRL)
//! - `PAGSEGURO_REFERENCE_PREFIX` - Prefix added to checkout references (default: REF)
//! - `PAGSEGURO_USE_SHIPPING` - Send shipping fields at checkout (default: true)
//! - `PAGSEGURO_TIMEOUT_SECS` - HTTP timeout in seconds (default: 30)

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const PRODUCTION_WS_HOST: &str = "https://ws.pagseguro.uol.com.br";
const PRODUCTION_PAYMENT_HOST: &str = "https://pagseguro.uol.com.br";
const SANDBOX_WS_HOST: &str = "https://ws.sandbox.pagseguro.uol.com.br";
const SANDBOX_PAYMENT_HOST: &str = "https://sandbox.pagseguro.uol.com.br";

const DEFAULT_CURRENCY: &str = "BRL";
const DEFAULT_REFERENCE_PREFIX: &str = "REF";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
    /// The override document has the wrong shape.
    #[error("Malformed config: {0}")]
    Malformed(String),
    #[error("Invalid URL {0}: {1}")]
    InvalidUrl(String, url::ParseError),
}

/// Gateway configuration.
///
/// `Config::default()` targets production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether the sandbox hosts are in use
    pub sandbox: bool,
    /// Web service host for API calls (no trailing slash)
    pub base_url: String,
    /// Host serving the buyer-facing payment page (no trailing slash)
    pub payment_host: String,
    /// ISO 4217 currency sent with every checkout
    pub currency: String,
    /// Literal marker every checkout reference starts with
    pub reference_prefix: String,
    /// When false, checkouts are sent with `shippingAddressRequired=false`
    pub use_shipping: bool,
    /// Timeout applied to every HTTP request
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self::production()
    }
}

/// Fields accepted by [`Config::from_overrides`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigOverrides {
    sandbox: Option<bool>,
    base_url: Option<String>,
    payment_host: Option<String>,
    currency: Option<String>,
    reference_prefix: Option<String>,
    use_shipping: Option<bool>,
    timeout_secs: Option<u64>,
}

impl Config {
    /// Production hosts with default settings.
    #[must_use]
    pub fn production() -> Self {
        Self {
            sandbox: false,
            base_url: PRODUCTION_WS_HOST.to_string(),
            payment_host: PRODUCTION_PAYMENT_HOST.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_string(),
            use_shipping: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sandbox hosts with default settings.
    #[must_use]
    pub fn sandbox() -> Self {
        Self {
            sandbox: true,
            base_url: SANDBOX_WS_HOST.to_string(),
            payment_host: SANDBOX_PAYMENT_HOST.to_string(),
            ..Self::production()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let sandbox = get_optional_bool("PAGSEGURO_SANDBOX")?.unwrap_or(false);
        let mut config = if sandbox {
            Self::sandbox()
        } else {
            Self::production()
        };

        if let Some(currency) = get_optional_env("PAGSEGURO_CURRENCY") {
            config.currency = currency;
        }
        if let Some(prefix) = get_optional_env("PAGSEGURO_REFERENCE_PREFIX") {
            config.reference_prefix = prefix;
        }
        if let Some(use_shipping) = get_optional_bool("PAGSEGURO_USE_SHIPPING")? {
            config.use_shipping = use_shipping;
        }
        if let Some(secs) = get_optional_env("PAGSEGURO_TIMEOUT_SECS") {
            let secs = secs.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("PAGSEGURO_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Build a configuration from a JSON object of overrides.
    ///
    /// Keys are the snake_case field names plus `timeout_secs`. `sandbox`
    /// picks the starting host set; the other keys replace single fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Malformed`] if `overrides` is not an object or
    /// has unknown keys or wrongly typed values, and
    /// [`ConfigError::InvalidUrl`] for unparseable host overrides.
    pub fn from_overrides(overrides: &serde_json::Value) -> Result<Self, ConfigError> {
        if !overrides.is_object() {
            return Err(ConfigError::Malformed(format!(
                "expected a JSON object, got {overrides}"
            )));
        }

        let overrides = ConfigOverrides::deserialize(overrides)
            .map_err(|e| ConfigError::Malformed(e.to_string()))?;

        let mut config = if overrides.sandbox.unwrap_or(false) {
            Self::sandbox()
        } else {
            Self::production()
        };

        if let Some(base_url) = overrides.base_url {
            config.base_url = validate_host("base_url", &base_url)?;
        }
        if let Some(payment_host) = overrides.payment_host {
            config.payment_host = validate_host("payment_host", &payment_host)?;
        }
        if let Some(currency) = overrides.currency {
            config.currency = currency;
        }
        if let Some(prefix) = overrides.reference_prefix {
            config.reference_prefix = prefix;
        }
        if let Some(use_shipping) = overrides.use_shipping {
            config.use_shipping = use_shipping;
        }
        if let Some(secs) = overrides.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Point API calls at another host, e.g. a local test server.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `base_url` is not a URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = validate_host("base_url", base_url)?;
        Ok(self)
    }

    /// Endpoint that creates checkouts.
    #[must_use]
    pub fn checkout_url(&self) -> String {
        format!("{}/v2/checkout", self.base_url)
    }

    /// Endpoint that resolves a notification code into a transaction.
    ///
    /// `code` is escaped as a single path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `base_url` cannot take a path.
    pub fn notification_url(&self, code: &str) -> Result<Url, ConfigError> {
        self.endpoint(&["v3", "transactions", "notifications", code])
    }

    /// Endpoint that returns a single transaction.
    ///
    /// `code` is escaped as a single path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `base_url` cannot take a path.
    pub fn transaction_url(&self, code: &str) -> Result<Url, ConfigError> {
        self.endpoint(&["v3", "transactions", code])
    }

    /// Endpoint that searches transactions by date.
    #[must_use]
    pub fn search_url(&self) -> String {
        format!("{}/v2/transactions", self.base_url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ConfigError> {
        let invalid = |e| ConfigError::InvalidUrl("base_url".to_string(), e);

        let mut url = Url::parse(&self.base_url).map_err(invalid)?;
        url.path_segments_mut()
            .map_err(|()| invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Buyer-facing payment page for a checkout code.
    #[must_use]
    pub fn payment_url(&self, code: &str) -> String {
        format!("{}/v2/checkout/payment.html?code={code}", self.payment_host)
    }
}

/// Seller account credentials.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct Credentials {
    /// Seller account email
    pub email: String,
    /// Seller account API token
    pub token: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Create credentials from an email and token.
    #[must_use]
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: SecretString::from(token.into()),
        }
    }

    /// Load credentials from `PAGSEGURO_EMAIL` and `PAGSEGURO_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either variable is missing or the token
    /// looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            email: get_required_env("PAGSEGURO_EMAIL")?,
            token: get_validated_secret("PAGSEGURO_TOKEN")?,
        })
    }

    /// The token, for building request parameters.
    #[must_use]
    pub fn expose_token(&self) -> &str {
        self.token.expose_secret()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an optional boolean environment variable.
fn get_optional_bool(key: &str) -> Result<Option<bool>, ConfigError> {
    get_optional_env(key)
        .map(|value| {
            parse_bool(&value).ok_or_else(|| {
                ConfigError::InvalidEnvVar(key.to_string(), format!("not a boolean: {value}"))
            })
        })
        .transpose()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Check that a host override parses as a URL and strip its trailing slash.
fn validate_host(field: &str, value: &str) -> Result<String, ConfigError> {
    url::Url::parse(value).map_err(|e| ConfigError::InvalidUrl(field.to_string(), e))?;
    Ok(value.trim_end_matches('/').to_string())
}

/// Validate that a secret is not a placeholder.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if lower.trim().is_empty() {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            "is empty".to_string(),
        ));
    }

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_production() {
        let config = Config::default();
        assert!(!config.sandbox);
        assert_eq!(config.currency, "BRL");
        assert_eq!(config.reference_prefix, "REF");
        assert!(config.use_shipping);
        assert_eq!(
            config.checkout_url(),
            "https://ws.pagseguro.uol.com.br/v2/checkout"
        );
    }

    #[test]
    fn test_sandbox_hosts() {
        let config = Config::sandbox();
        assert_eq!(
            config.transaction_url("ABC").unwrap().as_str(),
            "https://ws.sandbox.pagseguro.uol.com.br/v3/transactions/ABC"
        );
        assert_eq!(
            config.payment_url("ABC"),
            "https://sandbox.pagseguro.uol.com.br/v2/checkout/payment.html?code=ABC"
        );
    }

    #[test]
    fn test_endpoints() {
        let config = Config::production();
        assert_eq!(
            config.notification_url("N1").unwrap().as_str(),
            "https://ws.pagseguro.uol.com.br/v3/transactions/notifications/N1"
        );
        assert_eq!(
            config.search_url(),
            "https://ws.pagseguro.uol.com.br/v2/transactions"
        );
    }

    #[test]
    fn test_code_is_one_path_segment() {
        let config = Config::production();
        assert_eq!(
            config.transaction_url("../x?y#z").unwrap().as_str(),
            "https://ws.pagseguro.uol.com.br/v3/transactions/..%2Fx%3Fy%23z"
        );
        assert_eq!(
            config.notification_url("a/b").unwrap().path(),
            "/v3/transactions/notifications/a%2Fb"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let config = Config::default()
            .with_base_url("http://127.0.0.1:8080/gateway/")
            .unwrap();
        assert_eq!(
            config.transaction_url("ABC").unwrap().as_str(),
            "http://127.0.0.1:8080/gateway/v3/transactions/ABC"
        );
    }

    #[test]
    fn test_from_overrides() {
        let config = Config::from_overrides(&json!({
            "sandbox": true,
            "reference_prefix": "PED",
            "use_shipping": false,
            "timeout_secs": 5
        }))
        .unwrap();

        assert!(config.sandbox);
        assert_eq!(config.base_url, SANDBOX_WS_HOST);
        assert_eq!(config.reference_prefix, "PED");
        assert!(!config.use_shipping);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_overrides_empty_object() {
        let config = Config::from_overrides(&json!({})).unwrap();
        assert_eq!(config, Config::production());
    }

    #[test]
    fn test_from_overrides_not_an_object() {
        let err = Config::from_overrides(&json!(2)).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));

        let err = Config::from_overrides(&json!("sandbox")).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn test_from_overrides_wrong_types() {
        let err = Config::from_overrides(&json!({"sandbox": "yes"})).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));

        let err = Config::from_overrides(&json!({"unknown": 1})).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn test_from_overrides_bad_url() {
        let err = Config::from_overrides(&json!({"base_url": "not a url"})).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_, _)));
    }

    #[test]
    fn test_with_base_url_strips_slash() {
        let config = Config::production()
            .with_base_url("http://127.0.0.1:8080/")
            .unwrap();
        assert_eq!(config.search_url(), "http://127.0.0.1:8080/v2/transactions");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-token-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength("4F3A9C1E0B7D42A8B6E5C3D1F0A9B8C7", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_credentials_debug_redacts_token() {
        let credentials = Credentials::new("seu@email.com", "123456");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("seu@email.com"));
        assert!(!debug.contains("123456"));
        assert_eq!(credentials.expose_token(), "123456");
    }
}

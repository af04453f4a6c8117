//! Checkout requests.
//!
//! A [`CheckoutRequest`] collects the buyer, shipping and item data for one
//! checkout and turns it into the flat form the gateway expects with
//! [`CheckoutRequest::build_checkout_params`].
//!
//! # Example
//!
//! ```
//! use pagseguro::{Amount, CheckoutRequest, Config, Credentials, Item, Sender};
//!
//! let mut request = CheckoutRequest::new(
//!     Credentials::new("seu@email.com", "123456"),
//!     Config::sandbox(),
//! );
//! request.set_reference("12345");
//! request.add_item(Item::new("0001", "Notebook Prata", Amount::from_cents(2_430_000), 1, 1000));
//! request.sender = Sender {
//!     email: Some("comprador@uol.com.br".to_string()),
//!     ..Sender::default()
//! };
//!
//! let params = request.build_checkout_params().unwrap();
//! assert_eq!(params.get("reference"), Some("REF12345"));
//! assert_eq!(params.get("itemAmount1"), Some("24300.00"));
//! ```

mod params;

use std::fmt;

use chrono::NaiveDate;
use pagseguro_core::{Amount, ShippingType};

use crate::config::{Config, Credentials};
use crate::error::ValidationError;

pub use params::CheckoutParams;

/// One checkout line.
///
/// Every field except the per-item shipping cost is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Seller-side item identifier
    pub id: String,
    /// Description shown to the buyer
    pub description: String,
    /// Unit price
    pub amount: Amount,
    /// Number of units (1-999)
    pub quantity: u32,
    /// Unit weight in grams
    pub weight: u32,
    /// Shipping cost for this item, if charged per item
    pub shipping_cost: Option<Amount>,
}

impl Item {
    /// Create a checkout line.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: Amount,
        quantity: u32,
        weight: u32,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            amount,
            quantity,
            weight,
            shipping_cost: None,
        }
    }

    /// Charge a shipping cost for this item.
    #[must_use]
    pub const fn with_shipping_cost(mut self, cost: Amount) -> Self {
        self.shipping_cost = Some(cost);
        self
    }
}

/// Buyer data. Every field is optional.
///
/// Email, CPF and CNPJ are validated when params are built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sender {
    pub name: Option<String>,
    /// Two-digit phone area code (DDD)
    pub area_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Individual taxpayer number, punctuation allowed
    pub cpf: Option<String>,
    /// Company registry number, punctuation allowed
    pub cnpj: Option<String>,
    pub born_date: Option<NaiveDate>,
}

/// Shipping data. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shipping {
    pub shipping_type: Option<ShippingType>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    /// Eight-digit CEP
    pub postal_code: Option<String>,
    pub city: Option<String>,
    /// Two-letter state code
    pub state: Option<String>,
    /// ISO 3166-1 alpha-3 country; `BRA` is sent when an address is given without one
    pub country: Option<String>,
    pub cost: Option<Amount>,
}

impl Shipping {
    /// Whether no address field is set.
    #[must_use]
    pub fn address_is_empty(&self) -> bool {
        [
            &self.street,
            &self.number,
            &self.complement,
            &self.district,
            &self.postal_code,
            &self.city,
            &self.state,
        ]
        .iter()
        .all(|field| field.as_deref().is_none_or(str::is_empty))
    }
}

/// Everything needed to open one checkout.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    credentials: Credentials,
    config: Config,
    reference: String,
    /// Lines in the order they were added
    pub items: Vec<Item>,
    pub sender: Sender,
    pub shipping: Shipping,
    /// Added to (or, when negative, discounted from) the total
    pub extra_amount: Option<Amount>,
    /// Where the buyer is sent after paying
    pub redirect_url: Option<String>,
    /// Where the gateway posts status notifications
    pub notification_url: Option<String>,
    /// Where the buyer is sent after giving up
    pub abandon_url: Option<String>,
}

impl CheckoutRequest {
    /// Create an empty request.
    #[must_use]
    pub fn new(credentials: Credentials, config: Config) -> Self {
        Self {
            credentials,
            config,
            reference: String::new(),
            items: Vec::new(),
            sender: Sender::default(),
            shipping: Shipping::default(),
            extra_amount: None,
            redirect_url: None,
            notification_url: None,
            abandon_url: None,
        }
    }

    /// Credentials sent as `email` and `token`.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Send this checkout with other credentials than the client's.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }

    /// Configuration the params are built against.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The reference, prefix included. Empty until set.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Set the reference, adding the configured prefix unless already there.
    pub fn set_reference(&mut self, value: impl fmt::Display) {
        let value = value.to_string();
        self.reference = if value.starts_with(&self.config.reference_prefix) {
            value
        } else {
            format!("{}{value}", self.config.reference_prefix)
        };
    }

    /// Append a line.
    pub fn add_item(&mut self, item: Item) -> &mut Self {
        self.items.push(item);
        self
    }

    /// Map the request onto gateway form fields.
    ///
    /// Pure: nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the field if the sender email, CPF
    /// or CNPJ is invalid.
    pub fn build_checkout_params(&self) -> Result<CheckoutParams, ValidationError> {
        params::build(self)
    }
}

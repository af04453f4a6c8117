//! PagSeguro client library.
//!
//! Builds checkout requests into the gateway's flat form fields, parses the
//! gateway's XML responses, and talks to the gateway over HTTP.
//!
//! # Modules
//!
//! - [`checkout`] - Checkout requests and parameter building
//! - [`response`] - XML response types and the [`FromXml`] trait
//! - [`client`] - Async HTTP client
//! - [`config`] - Hosts, defaults and credentials
//!
//! # Example
//!
//! ```no_run
//! use pagseguro::{Amount, Item, PagSeguroClient};
//!
//! # async fn run() -> Result<(), pagseguro::PagSeguroError> {
//! let client = PagSeguroClient::from_env()?;
//!
//! let mut request = client.checkout_request();
//! request.set_reference(42);
//! request.add_item(Item::new("0001", "Notebook Prata", Amount::from_cents(2_430_000), 1, 1000));
//!
//! let checkout = client.checkout(&request).await?;
//! println!("pay at {}", checkout.payment_url);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod response;

pub use checkout::{CheckoutParams, CheckoutRequest, Item, Sender, Shipping};
pub use client::PagSeguroClient;
pub use config::{Config, ConfigError, Credentials};
pub use error::{InvalidValue, PagSeguroError, ValidationError};
pub use query::TransactionQuery;
pub use response::{
    CheckoutResponse, FromXml, GatewayError, Transaction, TransactionAddress, TransactionDetails,
    TransactionItem, TransactionSearchResult, TransactionSender, TransactionShipping,
};

pub use pagseguro_core::{
    Amount, PaymentMethodType, ShippingType, TransactionStatus, TransactionType, is_valid_cnpj,
    is_valid_cpf, is_valid_email,
};

//! PagSeguro Core - Shared types library.
//!
//! This crate provides the types used across the PagSeguro components:
//! - `pagseguro` - Checkout parameter building, XML parsing and the HTTP client
//! - `pagseguro-cli` - Command-line front-end for the gateway
//!
//! # Architecture
//!
//! The core crate contains only types and pure validators - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Validated newtypes for emails, tax ids and amounts, plus
//!   gateway code enums
//! - [`validators`] - Pass-through validators that return the input unchanged

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validators;

pub use types::*;
pub use validators::{is_valid_cnpj, is_valid_cpf, is_valid_email};

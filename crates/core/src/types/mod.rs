//! Core types for PagSeguro.
//!
//! This module provides type-safe wrappers for the values the gateway cares
//! about.

pub mod amount;
pub mod cnpj;
pub mod cpf;
pub mod email;
pub mod status;

pub use amount::{Amount, AmountError};
pub use cnpj::{Cnpj, CnpjError};
pub use cpf::{Cpf, CpfError};
pub use email::{Email, EmailError};
pub use status::*;

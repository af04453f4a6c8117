//! CLI subcommands.

pub mod checkout;
pub mod search;
pub mod transaction;

use std::fmt::Display;

use thiserror::Error;

/// Errors a subcommand can fail with.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The gateway or client setup failed.
    #[error(transparent)]
    PagSeguro(#[from] pagseguro::PagSeguroError),

    /// A command-line value could not be understood.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Display a field the gateway may leave out, `-` when absent.
pub fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

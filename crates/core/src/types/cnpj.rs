//! CNPJ (Brazilian company registry number) type.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::cpf::{mod11_check_digit, strip_digits, weighted_sum};

/// Errors that can occur when parsing a [`Cnpj`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CnpjError {
    /// The input string is empty.
    #[error("CNPJ cannot be empty")]
    Empty,
    /// The input contains something other than digits and separators.
    #[error("CNPJ accepts only digits")]
    DigitsOnly,
    /// The input does not have exactly 14 digits.
    #[error("CNPJ must have {expected} digits, got {actual}")]
    Length {
        /// Required number of digits.
        expected: usize,
        /// Number of digits found.
        actual: usize,
    },
    /// The check digits do not match.
    #[error("invalid CNPJ check digits")]
    Checksum,
}

/// A CNPJ number with valid check digits, formatting preserved.
///
/// ```
/// use pagseguro_core::Cnpj;
///
/// assert!(Cnpj::parse("11.222.333/0001-81").is_ok());
/// assert!(Cnpj::parse("11222333000181").is_ok());
/// assert!(Cnpj::parse("11.222.333/0001-82").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Cnpj(String);

impl Cnpj {
    /// Number of digits in a CNPJ.
    pub const DIGITS: usize = 14;

    /// Parse a `Cnpj`, accepting `.`, `/` and `-` as separators.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains other characters,
    /// does not have 14 digits, or fails the check digit calculation.
    pub fn parse(s: &str) -> Result<Self, CnpjError> {
        if s.is_empty() {
            return Err(CnpjError::Empty);
        }

        let digits = strip_digits(s, &['.', '/', '-']).ok_or(CnpjError::DigitsOnly)?;

        if digits.len() != Self::DIGITS {
            return Err(CnpjError::Length {
                expected: Self::DIGITS,
                actual: digits.len(),
            });
        }

        let (body, given) = digits.split_at(Self::DIGITS - 2);

        let first = mod11_check_digit(weighted_sum(body, 2..=9));
        let mut with_first = body.to_vec();
        with_first.push(first);
        let second = mod11_check_digit(weighted_sum(&with_first, 2..=9));

        if given != [first, second] {
            return Err(CnpjError::Checksum);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the CNPJ exactly as it was given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Cnpj {
    type Err = CnpjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cnpj {
    type Error = CnpjError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cnpj> for String {
    fn from(cnpj: Cnpj) -> Self {
        cnpj.0
    }
}

impl AsRef<str> for Cnpj {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! CPF (Brazilian individual taxpayer number) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Cpf`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CpfError {
    /// The input string is empty.
    #[error("CPF cannot be empty")]
    Empty,
    /// The input contains something other than digits, dots and dashes.
    #[error("CPF accepts only digits")]
    DigitsOnly,
    /// The input does not have exactly 11 digits.
    #[error("CPF must have {expected} digits, got {actual}")]
    Length {
        /// Required number of digits.
        expected: usize,
        /// Number of digits found.
        actual: usize,
    },
    /// The check digits do not match.
    #[error("invalid CPF check digits")]
    Checksum,
}

/// A CPF number with valid check digits.
///
/// The original formatting is preserved: `482.268.465-28` and `48226846528`
/// both parse, and [`Cpf::as_str`] returns exactly what was given.
///
/// ```
/// use pagseguro_core::Cpf;
///
/// let cpf = Cpf::parse("482.268.465-28").unwrap();
/// assert_eq!(cpf.as_str(), "482.268.465-28");
/// assert_eq!(cpf.digits(), "48226846528");
///
/// assert!(Cpf::parse("123.456.267-45").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    /// Number of digits in a CPF.
    pub const DIGITS: usize = 11;

    /// Parse a `Cpf`, accepting `.` and `-` as separators.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains other characters,
    /// does not have 11 digits, or fails the check digit calculation.
    pub fn parse(s: &str) -> Result<Self, CpfError> {
        if s.is_empty() {
            return Err(CpfError::Empty);
        }

        let digits = strip_digits(s, &['.', '-']).ok_or(CpfError::DigitsOnly)?;

        if digits.len() != Self::DIGITS {
            return Err(CpfError::Length {
                expected: Self::DIGITS,
                actual: digits.len(),
            });
        }

        let (body, given) = digits.split_at(Self::DIGITS - 2);

        let first = mod11_check_digit(weighted_sum(body, 2..=11));
        let mut with_first = body.to_vec();
        with_first.push(first);
        let second = mod11_check_digit(weighted_sum(&with_first, 2..=11));

        if given != [first, second] {
            return Err(CpfError::Checksum);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the CPF exactly as it was given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the CPF with separators removed.
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }
}

/// Remove the given separators and convert what is left to digits.
///
/// Returns `None` if any other non-digit character is present.
pub(crate) fn strip_digits(s: &str, separators: &[char]) -> Option<Vec<u32>> {
    s.chars()
        .filter(|c| !separators.contains(c))
        .map(|c| c.to_digit(10))
        .collect()
}

/// Sum of digits multiplied by weights, assigned right to left.
///
/// The weights cycle through `weights`, so `2..=11` gives the plain CPF
/// descending sequence and `2..=9` the repeating CNPJ one.
pub(crate) fn weighted_sum(digits: &[u32], weights: core::ops::RangeInclusive<u32>) -> u32 {
    digits
        .iter()
        .rev()
        .zip(weights.cycle())
        .map(|(digit, weight)| digit * weight)
        .sum()
}

/// Check digit from a weighted sum: remainders below 2 map to 0.
pub(crate) const fn mod11_check_digit(sum: u32) -> u32 {
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cpf {
    type Error = CpfError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.0
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

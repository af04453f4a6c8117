//! Pass-through validators.
//!
//! Each function returns its input unchanged when valid, so callers can
//! validate and forward a value in one expression. Use the newtypes in
//! [`crate::types`] when the validated value should be carried around.

use crate::types::{Cnpj, CnpjError, Cpf, CpfError, Email, EmailError};

/// Validate an email address and return it unchanged.
///
/// # Errors
///
/// Returns [`EmailError`] if the address is malformed.
///
/// ```
/// use pagseguro_core::is_valid_email;
///
/// assert_eq!(is_valid_email("seu@email.com"), Ok("seu@email.com"));
/// assert!(is_valid_email("john.com").is_err());
/// ```
pub fn is_valid_email(value: &str) -> Result<&str, EmailError> {
    Email::parse(value).map(|_| value)
}

/// Validate a CPF and return it unchanged, punctuation included.
///
/// # Errors
///
/// Returns [`CpfError`] if the value is not 11 digits or the check digits do
/// not match.
///
/// ```
/// use pagseguro_core::is_valid_cpf;
///
/// assert_eq!(is_valid_cpf("482.268.465-28"), Ok("482.268.465-28"));
/// assert_eq!(is_valid_cpf("48226846528"), Ok("48226846528"));
/// assert!(is_valid_cpf("123.456.267-45").is_err());
/// ```
pub fn is_valid_cpf(value: &str) -> Result<&str, CpfError> {
    Cpf::parse(value).map(|_| value)
}

/// Validate a CNPJ and return it unchanged, punctuation included.
///
/// # Errors
///
/// Returns [`CnpjError`] if the value is not 14 digits or the check digits
/// do not match.
pub fn is_valid_cnpj(value: &str) -> Result<&str, CnpjError> {
    Cnpj::parse(value).map(|_| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_values_pass_through() {
        assert_eq!(is_valid_email("seu@email.com"), Ok("seu@email.com"));
        assert_eq!(is_valid_cpf("482.268.465-28"), Ok("482.268.465-28"));
        assert_eq!(is_valid_cpf("48226846528"), Ok("48226846528"));
        assert_eq!(is_valid_cnpj("11.222.333/0001-81"), Ok("11.222.333/0001-81"));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(is_valid_email("john.com"), Err(EmailError::MissingAtSymbol));
        assert_eq!(is_valid_cpf("123.456.267-45"), Err(CpfError::Checksum));
        assert_eq!(is_valid_cnpj("11.222.333/0001-80"), Err(CnpjError::Checksum));
    }
}

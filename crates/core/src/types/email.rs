//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Characters allowed in an unquoted local part besides ASCII alphanumerics.
const ATOM_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

/// Domains accepted without a dot.
const DOMAIN_WHITELIST: &[&str] = &["localhost"];

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is empty or contains invalid characters.
    #[error("email local part is invalid")]
    InvalidLocalPart,
    /// The domain part (after @) is empty or not a valid host name.
    #[error("email domain is invalid")]
    InvalidDomain,
}

/// An email address.
///
/// ## Constraints
///
/// - Length: 1-254 characters (RFC 5321 limit)
/// - Split at the last @ symbol
/// - Local part is a dot-separated list of atoms, or a quoted string
/// - Domain is `localhost` or at least two dot-separated labels; labels are
///   1-63 characters, never start or end with a hyphen, and the last one is
///   at least 2 characters long
///
/// ## Examples
///
/// ```
/// use pagseguro_core::Email;
///
/// // Valid emails
/// assert!(Email::parse("user@example.com").is_ok());
/// assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
/// assert!(Email::parse("root@localhost").is_ok());
///
/// // Invalid emails
/// assert!(Email::parse("").is_err());             // empty
/// assert!(Email::parse("john.com").is_err());     // missing @
/// assert!(Email::parse("@domain.com").is_err());  // empty local part
/// assert!(Email::parse("user@").is_err());        // empty domain
/// assert!(Email::parse("user@domain").is_err());  // single label
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 254 characters
    /// - Does not contain an @ symbol
    /// - Has an invalid local part or domain
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = s.rsplit_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if !is_valid_local_part(local) {
            return Err(EmailError::InvalidLocalPart);
        }

        if !is_valid_domain(domain) {
            return Err(EmailError::InvalidDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the local part of the email (before the last @).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(local, _)| local)
    }

    /// Returns the domain part of the email (after the last @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() {
        return false;
    }

    if let Some(inner) = local
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return is_valid_quoted_string(inner);
    }

    local.split('.').all(|atom| {
        !atom.is_empty()
            && atom
                .chars()
                .all(|c| c.is_alphanumeric() || ATOM_SPECIALS.contains(c))
    })
}

/// Quoted local parts allow any ASCII except NUL, CR, LF and TAB; `"` and `\`
/// must be escaped with a backslash.
fn is_valid_quoted_string(inner: &str) -> bool {
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) if escaped.is_ascii() && !matches!(escaped, '\0' | '\n' | '\r') => {}
                _ => return false,
            },
            '"' | '\0' | '\t' | '\n' | '\r' => return false,
            c if !c.is_ascii() => return false,
            _ => {}
        }
    }
    true
}

fn is_valid_domain(domain: &str) -> bool {
    if DOMAIN_WHITELIST.contains(&domain) {
        return true;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.chars().count() >= 2);

    tld_ok && labels.iter().all(|label| is_valid_label(label))
}

fn is_valid_label(label: &str) -> bool {
    let len = label.chars().count();
    (1..=63).contains(&len)
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_alphanumeric() || c == '-')
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("user@example.com").is_ok());
        assert!(Email::parse("seu@email.com").is_ok());
        assert!(Email::parse("user.name@example.com").is_ok());
        assert!(Email::parse("user+tag@example.com").is_ok());
        assert!(Email::parse("user@subdomain.example.com").is_ok());
        assert!(Email::parse("user@example.com.br").is_ok());
        assert!(Email::parse("\"john doe\"@example.com").is_ok());
        assert!(Email::parse("joão@exemplo.com.br").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_missing_at() {
        assert_eq!(Email::parse("john.com"), Err(EmailError::MissingAtSymbol));
    }

    #[test]
    fn test_parse_invalid_local_part() {
        assert_eq!(
            Email::parse("@domain.com"),
            Err(EmailError::InvalidLocalPart)
        );
        assert_eq!(
            Email::parse("john..doe@domain.com"),
            Err(EmailError::InvalidLocalPart)
        );
        assert_eq!(
            Email::parse("john doe@domain.com"),
            Err(EmailError::InvalidLocalPart)
        );
    }

    #[test]
    fn test_parse_invalid_domain() {
        assert_eq!(Email::parse("user@"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("user@domain"), Err(EmailError::InvalidDomain));
        assert_eq!(
            Email::parse("user@-domain.com"),
            Err(EmailError::InvalidDomain)
        );
        assert_eq!(Email::parse("user@domain.c"), Err(EmailError::InvalidDomain));
        assert_eq!(
            Email::parse("user@domain..com"),
            Err(EmailError::InvalidDomain)
        );
    }

    #[test]
    fn test_localhost_whitelisted() {
        assert!(Email::parse("root@localhost").is_ok());
    }

    #[test]
    fn test_last_at_splits() {
        let email = Email::parse("\"a@b\"@example.com").unwrap();
        assert_eq!(email.local_part(), "\"a@b\"");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn test_display() {
        let email = Email::parse("user@example.com").unwrap();
        assert_eq!(format!("{email}"), "user@example.com");
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let json = serde_json::to_string(&Email::parse("user@example.com").unwrap()).unwrap();
        assert_eq!(json, "\"user@example.com\"");
        assert!(serde_json::from_str::<Email>("\"john.com\"").is_err());
    }
}

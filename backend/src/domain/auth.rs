//! Authentication primitives such as login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! The same credential rules apply to login and registration.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{Email, UserValidationError};

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN: usize = 6;

/// Which credential field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialField {
    Email,
    Password,
}

impl CredentialField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// A single failed credential rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialViolation {
    /// The field was absent from the payload.
    Missing(CredentialField),
    /// The e-mail address failed validation.
    InvalidEmail(UserValidationError),
    /// The password was shorter than [`PASSWORD_MIN`].
    PasswordTooShort { min: usize },
}

impl CredentialViolation {
    /// Field the violation belongs to.
    pub fn field(&self) -> CredentialField {
        match self {
            Self::Missing(field) => *field,
            Self::InvalidEmail(_) => CredentialField::Email,
            Self::PasswordTooShort { .. } => CredentialField::Password,
        }
    }
}

impl fmt::Display for CredentialViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "{} is required", field.as_str()),
            Self::InvalidEmail(err) => write!(f, "{err}"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

/// Every rule the submitted credentials failed, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsValidationError {
    violations: Vec<CredentialViolation>,
}

impl CredentialsValidationError {
    /// All violations collected during validation.
    pub fn violations(&self) -> &[CredentialViolation] {
        &self.violations
    }
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated e-mail/password pair used by login and registration.
///
/// ## Invariants
/// - `email` satisfies the [`Email`] rules.
/// - `password` has at least [`PASSWORD_MIN`] characters and keeps the
///   caller's whitespace so credential comparisons are not surprising.
///
/// # Examples
/// ```
/// use geonotes::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(Some("ada@example.com"), Some("secret1")).unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.password(), "secret1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: Email,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from optional raw inputs, collecting every
    /// violated rule.
    pub fn try_from_parts(
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let mut violations = Vec::new();

        let email = match email {
            None => {
                violations.push(CredentialViolation::Missing(CredentialField::Email));
                None
            }
            Some(raw) if raw.trim().is_empty() => {
                violations.push(CredentialViolation::Missing(CredentialField::Email));
                None
            }
            Some(raw) => match Email::new(raw) {
                Ok(email) => Some(email),
                Err(err) => {
                    violations.push(CredentialViolation::InvalidEmail(err));
                    None
                }
            },
        };

        let password = match password {
            None | Some("") => {
                violations.push(CredentialViolation::Missing(CredentialField::Password));
                None
            }
            Some(raw) if raw.chars().count() < PASSWORD_MIN => {
                violations.push(CredentialViolation::PasswordTooShort { min: PASSWORD_MIN });
                None
            }
            Some(raw) => Some(Zeroizing::new(raw.to_owned())),
        };

        match (email, password) {
            (Some(email), Some(password)) => Ok(Self { email, password }),
            _ => Err(CredentialsValidationError { violations }),
        }
    }

    /// Normalised e-mail address suitable for user lookups.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some("secret1"), vec![CredentialViolation::Missing(CredentialField::Email)])]
    #[case(Some("  "), Some("secret1"), vec![CredentialViolation::Missing(CredentialField::Email)])]
    #[case(
        Some("ada"),
        Some("secret1"),
        vec![CredentialViolation::InvalidEmail(UserValidationError::InvalidEmail)]
    )]
    #[case(
        Some("ada@example.com"),
        None,
        vec![CredentialViolation::Missing(CredentialField::Password)]
    )]
    #[case(
        Some("ada@example.com"),
        Some("12345"),
        vec![CredentialViolation::PasswordTooShort { min: PASSWORD_MIN }]
    )]
    #[case(
        None,
        Some(""),
        vec![
            CredentialViolation::Missing(CredentialField::Email),
            CredentialViolation::Missing(CredentialField::Password),
        ]
    )]
    fn invalid_credentials_report_every_violation(
        #[case] email: Option<&str>,
        #[case] password: Option<&str>,
        #[case] expected: Vec<CredentialViolation>,
    ) {
        let err = Credentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err.violations(), expected.as_slice());
    }

    #[rstest]
    #[case(" Ada@Example.com ", "secret1")]
    #[case("bob@example.org", "  spaced password  ")]
    fn valid_credentials_normalise_email_only(#[case] email: &str, #[case] password: &str) {
        let creds = Credentials::try_from_parts(Some(email), Some(password))
            .expect("valid inputs should succeed");
        assert_eq!(creds.email().as_ref(), email.trim().to_lowercase());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn violations_name_their_fields() {
        let err = Credentials::try_from_parts(Some("x"), Some("1")).expect_err("invalid");
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field().as_str()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }
}

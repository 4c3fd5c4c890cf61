//! Signup credential primitives.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when credential values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email does not look like `local@domain`.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain a local part and a domain"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Email address used as the account identity.
///
/// ## Invariants
/// - Trimmed, non-empty, and shaped `local@domain` with a dot in the
///   domain. Full RFC validation belongs to the auth collaborator; this
///   only rejects obviously broken input before a remote call is spent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Examples
    /// ```
    /// use photofeed::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new("ada@example.com").unwrap();
    /// assert_eq!(email.as_str(), "ada@example.com");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CredentialsValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(CredentialsValidationError::InvalidEmail);
        };
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(CredentialsValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validated signup credentials handed to the auth gateway.
///
/// ## Invariants
/// - `email` satisfies [`EmailAddress`] validation.
/// - `password` is non-empty but otherwise opaque; caller-provided
///   whitespace is preserved to avoid surprising credential comparisons.
///   The backing storage is zeroed on drop.
#[derive(Debug, Clone)]
pub struct SignupCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SignupCredentials {
    /// Construct credentials from raw email/password inputs.
    ///
    /// # Examples
    /// ```
    /// use photofeed::domain::SignupCredentials;
    ///
    /// let creds = SignupCredentials::try_from_parts("ada@example.com", "hunter2").unwrap();
    /// assert_eq!(creds.email().as_str(), "ada@example.com");
    /// ```
    pub fn try_from_parts(
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// The validated email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The opaque password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

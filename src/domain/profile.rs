//! Profile data model.
//!
//! Strongly typed records shared by the signup flow and the header
//! endpoint. Types are immutable; serialisation contracts (serde) are
//! documented on each type.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::EmailAddress;

/// Validation errors returned by profile type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    EmptyAccountId,
    InvalidAccountId,
    EmptyUsername,
    UsernameTooShort { min: usize },
    UsernameTooLong { max: usize },
    UsernameInvalidCharacters,
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAccountId => write!(f, "account id must not be empty"),
            Self::InvalidAccountId => write!(f, "account id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain lowercase letters, digits, dots, or underscores",
            ),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// Identifier of the externally owned auth account.
///
/// The signup flow never mints these; it only receives them from the auth
/// collaborator. Stored as a UUID alongside its canonical string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(Uuid, String);

impl AccountId {
    /// Validate and construct an [`AccountId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ProfileValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a random [`AccountId`]; handy for fixtures and tests.
    #[must_use]
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, ProfileValidationError> {
        if id.is_empty() {
            return Err(ProfileValidationError::EmptyAccountId);
        }
        let parsed =
            Uuid::parse_str(id.trim()).map_err(|_| ProfileValidationError::InvalidAccountId)?;
        if id.trim() != id {
            return Err(ProfileValidationError::InvalidAccountId);
        }
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        let AccountId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for AccountId {
    type Error = ProfileValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 30;

/// Public handle shown in profile URLs (`/user/{username}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    ///
    /// # Examples
    /// ```
    /// use photofeed::domain::Username;
    ///
    /// let name = Username::new("ada.lovelace").unwrap();
    /// assert_eq!(name.as_str(), "ada.lovelace");
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, ProfileValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProfileValidationError::EmptyUsername);
        }
        if trimmed.chars().count() < USERNAME_MIN {
            return Err(ProfileValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(ProfileValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        let valid = trimmed
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_');
        if !valid {
            return Err(ProfileValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = ProfileValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Storage location of an account's avatar object.
///
/// The path is derived deterministically from the account identifier:
/// `{account_id}/profile.jpg`. Deriving (rather than accepting) the path
/// keeps the avatar object and the profile record pointing at the same
/// key without coordination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AvatarPath(String);

/// Object name under the account prefix.
const AVATAR_OBJECT_NAME: &str = "profile.jpg";

impl AvatarPath {
    /// Derive the avatar path for an account.
    ///
    /// # Examples
    /// ```
    /// use photofeed::domain::{AccountId, AvatarPath};
    ///
    /// let id = AccountId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
    /// let path = AvatarPath::for_account(&id);
    /// assert_eq!(path.as_str(), "3fa85f64-5717-4562-b3fc-2c963f66afa6/profile.jpg");
    /// ```
    #[must_use]
    pub fn for_account(account_id: &AccountId) -> Self {
        Self(format!("{account_id}/{AVATAR_OBJECT_NAME}"))
    }

    /// Borrow the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AvatarPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for AvatarPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Profile record submitted to the data API after account and avatar
/// exist.
///
/// ## Invariants
/// - Created only by the signup flow, after steps 1 and 2 succeeded, so a
///   profile never references a missing account or avatar object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    email: EmailAddress,
    avatar: AvatarPath,
    first_name: String,
    last_name: String,
    username: Username,
}

impl NewProfile {
    /// Assemble a profile record from its validated parts.
    #[must_use]
    pub fn new(
        email: EmailAddress,
        avatar: AvatarPath,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        username: Username,
    ) -> Self {
        Self {
            email,
            avatar,
            first_name: first_name.into(),
            last_name: last_name.into(),
            username,
        }
    }

    /// The account's email identity.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Derived avatar storage path.
    #[must_use]
    pub fn avatar(&self) -> &AvatarPath {
        &self.avatar
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Public handle.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }
}

/// Current-user projection consumed by the header.
///
/// Serialises to camelCase to match the data API contract:
/// `{"username": ..., "firstName": ..., "lastName": ..., "profilePicture": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// Public handle used in the profile URL.
    pub username: Username,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Avatar storage path.
    pub profile_picture: AvatarPath,
}

impl CurrentUser {
    /// Display name shown as the avatar alt text: `"{first} {last}"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn avatar_path_is_account_scoped() {
        let id = AccountId::random();
        let path = AvatarPath::for_account(&id);
        assert_eq!(path.as_str(), format!("{id}/profile.jpg"));
    }

    #[rstest]
    #[case("ada", true)]
    #[case("ada.lovelace_1", true)]
    #[case("ab", false)]
    #[case("", false)]
    #[case("Ada", false)]
    #[case("ada lovelace", false)]
    fn username_validation(#[case] raw: &str, #[case] should_pass: bool) {
        assert_eq!(Username::new(raw).is_ok(), should_pass, "input: {raw:?}");
    }

    #[test]
    fn username_rejects_over_maximum_length() {
        let raw = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(raw).unwrap_err(),
            ProfileValidationError::UsernameTooLong { max: USERNAME_MAX }
        );
    }

    #[rstest]
    #[case("")]
    #[case("not-a-uuid")]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn account_id_rejects_malformed_input(#[case] raw: &str) {
        assert!(AccountId::new(raw).is_err(), "input: {raw:?}");
    }

    #[test]
    fn account_id_serde_round_trips() {
        let id = AccountId::random();
        let json = serde_json::to_string(&id).expect("serialise");
        let back: AccountId = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, id);
    }

    #[test]
    fn current_user_serialises_to_camel_case() {
        let user = CurrentUser {
            username: Username::new("ada").expect("valid username"),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            profile_picture: AvatarPath::for_account(&AccountId::random()),
        };
        let value = serde_json::to_value(&user).expect("serialise");
        assert!(value.get("firstName").is_some());
        assert!(value.get("profilePicture").is_some());
        assert_eq!(user.full_name(), "Ada Lovelace");
    }
}

//! Validated email address the token is delivered to.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::{_prelude::*, error::ConfigError};

/// Non-empty email address submitted to the token endpoint.
///
/// The service mails the issued token to this address, so an empty value can never produce a
/// useful request and is rejected before any network activity. No further syntax checks are
/// applied; the server is the authority on what it accepts.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);
impl EmailAddress {
	/// Creates a new address after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, ConfigError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Returns the address as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for EmailAddress {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for EmailAddress {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for EmailAddress {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<EmailAddress> for String {
	fn from(value: EmailAddress) -> Self {
		value.0
	}
}
impl TryFrom<String> for EmailAddress {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl TryFrom<&str> for EmailAddress {
	type Error = ConfigError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl FromStr for EmailAddress {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for EmailAddress {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "EmailAddress({})", self.0)
	}
}
impl Display for EmailAddress {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate_view(view: &str) -> Result<(), ConfigError> {
	if view.is_empty() {
		return Err(ConfigError::InvalidEmail);
	}

	Ok(())
}

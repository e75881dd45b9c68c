//! Redacted secret wrappers for OAuth 1.0a credentials.

// self
use crate::_prelude::*;

/// Redacted secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the wrapped value is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// A token identifier together with the shared secret used to sign with it.
///
/// OAuth 1.0a issues credentials in pairs: the request pair during the handshake and
/// the access pair once the resource owner has authorized the consumer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
	/// Token identifier sent as `oauth_token`.
	pub token: TokenSecret,
	/// Shared secret used as the second half of the signing key.
	pub secret: TokenSecret,
}
impl TokenPair {
	/// Creates a pair from raw strings.
	pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { token: TokenSecret::new(token), secret: TokenSecret::new(secret) }
	}
}

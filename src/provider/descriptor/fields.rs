// self
use crate::_prelude::*;

/// Field names read from token-endpoint responses.
///
/// The defaults follow RFC 5849 plus the OAuth Session extension
/// (`oauth_session_handle`, `oauth_expires_in`, `oauth_authorization_expires_in`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseFields {
	/// Token identifier.
	pub token: String,
	/// Token secret.
	pub token_secret: String,
	/// Refresh value; also the body parameter name sent on refresh.
	pub refresh_token: String,
	/// Access-token lifetime in seconds.
	pub expires_in: String,
	/// Refresh-window length in seconds.
	pub refresh_expires_in: String,
	/// Callback confirmation flag on the request-token leg.
	pub callback_confirmed: String,
	/// Provider error indicator.
	pub error: String,
}
impl ResponseFields {
	/// Returns `true` if `key` is one of the mapped names and therefore not an extra param.
	pub fn is_mapped(&self, key: &str) -> bool {
		self.named().iter().any(|(_, name)| *name == key)
	}

	pub(crate) fn named(&self) -> [(&'static str, &str); 7] {
		[
			("token", &self.token),
			("token_secret", &self.token_secret),
			("refresh_token", &self.refresh_token),
			("expires_in", &self.expires_in),
			("refresh_expires_in", &self.refresh_expires_in),
			("callback_confirmed", &self.callback_confirmed),
			("error", &self.error),
		]
	}
}
impl Default for ResponseFields {
	fn default() -> Self {
		Self {
			token: "oauth_token".into(),
			token_secret: "oauth_token_secret".into(),
			refresh_token: "oauth_session_handle".into(),
			expires_in: "oauth_expires_in".into(),
			refresh_expires_in: "oauth_authorization_expires_in".into(),
			callback_confirmed: "oauth_callback_confirmed".into(),
			error: "error".into(),
		}
	}
}

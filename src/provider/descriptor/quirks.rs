// self
use crate::_prelude::*;

/// Provider-specific quirks that influence how flows behave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderQuirks {
	/// Reject request-token responses that do not carry `oauth_callback_confirmed=true`.
	pub callback_confirmation_required: bool,
	/// Provider renews access tokens via a session handle on the access-token endpoint.
	pub supports_refresh: bool,
	/// Send protocol parameters in the query string instead of the `Authorization` header for
	/// GET API calls.
	pub query_string_auth: bool,
	/// Refresh window assumed when a response carries a refresh token but no refresh deadline.
	pub refresh_window_fallback: Option<Duration>,
}
impl Default for ProviderQuirks {
	fn default() -> Self {
		Self {
			callback_confirmation_required: true,
			supports_refresh: false,
			query_string_auth: false,
			refresh_window_fallback: None,
		}
	}
}

//! Resource-owner authorization redirect (RFC 5849 §2.2).

// self
use crate::{_prelude::*, error::ConfigError, flows::Service, http::HttpTransport};

impl<C> Service<C>
where
	C: HttpTransport,
{
	/// Builds the URL the resource owner visits to approve `request_token`.
	///
	/// Existing query pairs on the descriptor's authorization endpoint are kept.
	pub fn authorization_uri(&self, request_token: &str) -> Result<Url> {
		self.authorization_uri_with(request_token, &[])
	}

	/// Same as [`Service::authorization_uri`], appending provider-specific parameters after
	/// `oauth_token`.
	pub fn authorization_uri_with(
		&self,
		request_token: &str,
		extra_params: &[(&str, &str)],
	) -> Result<Url> {
		if request_token.is_empty() {
			return Err(ConfigError::MissingRequestToken.into());
		}

		let mut url = self.descriptor.endpoints.authorization.clone();

		{
			let mut pairs = url.query_pairs_mut();

			pairs.append_pair("oauth_token", request_token);

			for (key, value) in extra_params {
				pairs.append_pair(key, value);
			}
		}

		Ok(url)
	}
}

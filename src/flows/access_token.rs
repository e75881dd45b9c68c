//! Token credential leg (RFC 5849 §2.3).

// self
use crate::{
	_prelude::*,
	auth::Token,
	error::ConfigError,
	flows::{Service, common},
	http::HttpTransport,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> Service<C>
where
	C: HttpTransport,
{
	/// Exchanges an authorized request token and its verifier for an access token.
	///
	/// When `request_token_secret` is `None`, the secret is read from the request token saved
	/// by [`Service::request_request_token`]. The resulting token is persisted before it is
	/// returned.
	pub async fn request_access_token(
		&self,
		request_token: &str,
		verifier: &str,
		request_token_secret: Option<&str>,
	) -> Result<Token> {
		const KIND: FlowKind = FlowKind::AccessToken;

		let span = FlowSpan::new(KIND, &self.descriptor.id, "request_access_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				if request_token.is_empty() {
					return Err(ConfigError::MissingRequestToken.into());
				}

				let secret = match request_token_secret {
					Some(secret) => secret.to_owned(),
					None => self.stored_request_secret(request_token).await?,
				};
				let params = self.protocol_params().token(request_token).verifier(verifier);
				let response = self
					.post_signed(&self.descriptor.endpoints.access_token, params, Some(&secret), &[])
					.await?;
				let ctx = self.parse_context();
				let token = common::parse_token(KIND, &response, |body| {
					self.parser.parse_access_token(body, &ctx)
				})?;

				self.store.set(&self.descriptor.id, token.clone()).await?;

				Ok(token)
			})
			.await;

		common::record_outcome(KIND, &result);

		result
	}

	async fn stored_request_secret(&self, request_token: &str) -> Result<String> {
		let missing = || ConfigError::MissingRequestTokenSecret {
			descriptor: self.descriptor.id.to_string(),
		};
		let stored = match self.store.get(&self.descriptor.id).await {
			Ok(token) => token,
			Err(err) if err.is_not_found() => return Err(missing().into()),
			Err(err) => return Err(err.into()),
		};

		match (stored.request_token(), stored.request_token_secret()) {
			(Some(token), Some(secret)) if token == request_token => Ok(secret.to_owned()),
			_ => Err(missing().into()),
		}
	}
}

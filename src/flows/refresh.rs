//! Access-token renewal through the OAuth Session extension.
//!
//! Providers that issue a session handle (`oauth_session_handle` by default) let the
//! consumer trade it, signed with the current access secret, for a new access token on
//! the access-token endpoint. The handle is bounded by a refresh window; once that window
//! closes the stored token is cleared and the caller must restart the handshake.

mod metrics;

pub use metrics::RefreshMetrics;

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
	/// Renews `token`'s access credentials and persists the result.
	///
	/// Fails with [`Error::RefreshExpired`] after clearing the stored token when the refresh
	/// window has already closed. A response without a new refresh value keeps the previous
	/// one along with its window.
	pub async fn refresh_access_token(&self, token: &Token) -> Result<Token> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, &self.descriptor.id, "refresh_access_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.ensure_refresh_supported()?;
				self.refresh_metrics.record_attempt();

				let outcome = self.refresh_now(token).await;

				match &outcome {
					Ok(_) => self.refresh_metrics.record_success(),
					Err(_) => self.refresh_metrics.record_failure(),
				}

				outcome
			})
			.await;

		common::record_outcome(KIND, &result);

		result
	}

	async fn refresh_now(&self, token: &Token) -> Result<Token> {
		let refresh_token = token.refresh_token().ok_or(ConfigError::MissingRefreshToken)?;
		let access = token.access_pair().ok_or(ConfigError::MissingAccessToken)?;
		let now = OffsetDateTime::now_utc();

		if let Some(expired_at) = token.refresh_expires_at().filter(|_| token.refresh_expired_at(now))
		{
			self.store.clear(&self.descriptor.id).await?;
			self.refresh_metrics.record_expired();
			obs::refresh_window_expired(&self.descriptor.id, expired_at);
			obs::record_refresh_expired();

			return Err(Error::RefreshExpired {
				provider: self.descriptor.id.to_string(),
				expired_at,
			});
		}

		let params = self.protocol_params().token(access.token.expose());
		let body = [(self.descriptor.fields.refresh_token.clone(), refresh_token.to_owned())];
		let response = self
			.post_signed(
				&self.descriptor.endpoints.access_token,
				params,
				Some(access.secret.expose()),
				&body,
			)
			.await?;
		let ctx = self.parse_context();
		let parsed = common::parse_token(FlowKind::Refresh, &response, |body| {
			self.parser.parse_access_token(body, &ctx)
		})?;
		let renewed = if parsed.refresh_token().is_some() {
			parsed
		} else {
			let mut builder = parsed.to_builder().refresh_token(refresh_token);

			if let Some(deadline) = token.refresh_expires_at() {
				builder = builder.refresh_expires_at(deadline);
			}

			builder.build().map_err(ConfigError::from)?
		};

		self.store.set(&self.descriptor.id, renewed.clone()).await?;

		Ok(renewed)
	}

	fn ensure_refresh_supported(&self) -> Result<()> {
		if self.descriptor.supports_refresh() {
			Ok(())
		} else {
			Err(ConfigError::RefreshUnsupported { descriptor: self.descriptor.id.to_string() }
				.into())
		}
	}
}

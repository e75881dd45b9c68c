//! Immutable OAuth 1.0a token values, lifecycle helpers, and the builder that produces them.

// self
use crate::{
	_prelude::*,
	auth::token::{
		lifetime::TokenLifetime,
		secret::{TokenPair, TokenSecret},
	},
};

/// Current lifecycle status for a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// Token is usable.
	Active,
	/// Token exceeded its end of life.
	Expired,
}

/// Errors produced by [`TokenBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum TokenBuilderError {
	/// Neither a request pair nor an access pair was provided.
	#[error("Token requires a request or access token pair.")]
	MissingCredentials,
	/// A refresh token was provided without the access pair it renews.
	#[error("Refresh token requires an access token pair.")]
	RefreshWithoutAccessToken,
}

/// Immutable token issued by a provider's token endpoint.
///
/// Values are produced by [`TokenBuilder::build`] (normally from a parsed provider
/// response) and cannot be mutated afterwards; refreshing yields a new token.
#[derive(Clone, Serialize, Deserialize)]
pub struct Token {
	request: Option<TokenPair>,
	access: Option<TokenPair>,
	refresh_token: Option<TokenSecret>,
	end_of_life: TokenLifetime,
	refresh_expires_at: Option<OffsetDateTime>,
	issued_at: OffsetDateTime,
	extra_params: BTreeMap<String, String>,
}
impl Token {
	/// Returns an empty builder.
	pub fn builder() -> TokenBuilder {
		TokenBuilder::default()
	}

	/// Returns a builder pre-filled with this token's values.
	///
	/// The builder is the only way to derive a changed token; the original is left untouched.
	pub fn to_builder(&self) -> TokenBuilder {
		TokenBuilder {
			request: self.request.clone(),
			access: self.access.clone(),
			refresh_token: self.refresh_token.clone(),
			end_of_life: self.end_of_life,
			refresh_expires_at: self.refresh_expires_at,
			refresh_window_fallback: None,
			issued_at: Some(self.issued_at),
			extra_params: self.extra_params.clone(),
		}
	}

	/// Temporary request token identifier.
	pub fn request_token(&self) -> Option<&str> {
		self.request.as_ref().map(|pair| pair.token.expose())
	}

	/// Temporary request token secret.
	pub fn request_token_secret(&self) -> Option<&str> {
		self.request.as_ref().map(|pair| pair.secret.expose())
	}

	/// Access token identifier used to sign API calls.
	pub fn access_token(&self) -> Option<&str> {
		self.access.as_ref().map(|pair| pair.token.expose())
	}

	/// Access token secret used to sign API calls.
	pub fn access_token_secret(&self) -> Option<&str> {
		self.access.as_ref().map(|pair| pair.secret.expose())
	}

	/// Request pair, when the token came from the request-token leg.
	pub fn request_pair(&self) -> Option<&TokenPair> {
		self.request.as_ref()
	}

	/// Access pair, when the token came from the access-token leg.
	pub fn access_pair(&self) -> Option<&TokenPair> {
		self.access.as_ref()
	}

	/// Opaque refresh value (e.g. `oauth_session_handle`).
	pub fn refresh_token(&self) -> Option<&str> {
		self.refresh_token.as_ref().map(TokenSecret::expose)
	}

	/// End of life for the access token.
	pub fn end_of_life(&self) -> TokenLifetime {
		self.end_of_life
	}

	/// Instant after which the refresh token can no longer be used, if the provider bounded it.
	pub fn refresh_expires_at(&self) -> Option<OffsetDateTime> {
		self.refresh_expires_at
	}

	/// Instant the token response was parsed.
	pub fn issued_at(&self) -> OffsetDateTime {
		self.issued_at
	}

	/// Provider-specific response fields that are not modeled explicitly.
	pub fn extra_params(&self) -> &BTreeMap<String, String> {
		&self.extra_params
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if self.end_of_life.is_expired_at(instant) {
			TokenStatus::Expired
		} else {
			TokenStatus::Active
		}
	}

	/// Returns `true` if the access token has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Expired)
	}

	/// Returns `true` if the access token is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Returns `true` if the refresh window is known to have closed at `instant`.
	pub fn refresh_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.refresh_expires_at.is_some_and(|deadline| deadline < instant)
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Token")
			.field("request", &self.request.as_ref().map(|_| "<redacted>"))
			.field("access", &self.access.as_ref().map(|_| "<redacted>"))
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("end_of_life", &self.end_of_life)
			.field("refresh_expires_at", &self.refresh_expires_at)
			.field("issued_at", &self.issued_at)
			.field("extra_params", &self.extra_params.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Builder for [`Token`].
#[derive(Clone, Debug, Default)]
pub struct TokenBuilder {
	request: Option<TokenPair>,
	access: Option<TokenPair>,
	refresh_token: Option<TokenSecret>,
	end_of_life: TokenLifetime,
	refresh_expires_at: Option<OffsetDateTime>,
	refresh_window_fallback: Option<Duration>,
	issued_at: Option<OffsetDateTime>,
	extra_params: BTreeMap<String, String>,
}
impl TokenBuilder {
	/// Provides the request token pair.
	pub fn request_token(mut self, token: impl Into<String>, secret: impl Into<String>) -> Self {
		self.request = Some(TokenPair::new(token, secret));

		self
	}

	/// Provides the access token pair.
	pub fn access_token(mut self, token: impl Into<String>, secret: impl Into<String>) -> Self {
		self.access = Some(TokenPair::new(token, secret));

		self
	}

	/// Provides the refresh token value.
	pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
		self.refresh_token = Some(TokenSecret::new(token));

		self
	}

	/// Sets the access token end of life.
	pub fn end_of_life(mut self, lifetime: TokenLifetime) -> Self {
		self.end_of_life = lifetime;

		self
	}

	/// Sets the absolute end of the refresh window.
	pub fn refresh_expires_at(mut self, instant: OffsetDateTime) -> Self {
		self.refresh_expires_at = Some(instant);

		self
	}

	/// Window applied from `issued_at` when a refresh token arrives without an explicit
	/// refresh deadline.
	pub fn refresh_window_fallback(mut self, window: Option<Duration>) -> Self {
		self.refresh_window_fallback = window;

		self
	}

	/// Sets the issued-at instant.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Adds a provider-specific field.
	pub fn extra_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra_params.insert(key.into(), value.into());

		self
	}

	/// Replaces all provider-specific fields.
	pub fn extra_params(mut self, params: BTreeMap<String, String>) -> Self {
		self.extra_params = params;

		self
	}

	/// Consumes the builder and produces a [`Token`].
	pub fn build(self) -> Result<Token, TokenBuilderError> {
		if self.request.is_none() && self.access.is_none() {
			return Err(TokenBuilderError::MissingCredentials);
		}
		if self.refresh_token.is_some() && self.access.is_none() {
			return Err(TokenBuilderError::RefreshWithoutAccessToken);
		}

		let issued_at = self.issued_at.unwrap_or_else(OffsetDateTime::now_utc);
		let refresh_expires_at = match (&self.refresh_token, self.refresh_expires_at) {
			(Some(_), None) =>
				self.refresh_window_fallback.and_then(|window| issued_at.checked_add(window)),
			(_, explicit) => explicit,
		};

		Ok(Token {
			request: self.request,
			access: self.access,
			refresh_token: self.refresh_token,
			end_of_life: self.end_of_life,
			refresh_expires_at,
			issued_at,
			extra_params: self.extra_params,
		})
	}
}

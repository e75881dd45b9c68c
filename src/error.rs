//! Broker-level error types shared across signing, flows, parsers, and stores.

// self
use crate::_prelude::*;

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error handed over by pluggable collaborators (transports, signers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure passed through from the HTTP collaborator.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Request could not be signed.
	#[error(transparent)]
	Signature(#[from] crate::signature::SignatureError),
	/// Provider response could not be turned into a token.
	#[error(transparent)]
	TokenResponse(#[from] TokenResponseError),

	/// Refresh window elapsed; the stored token was cleared and a new handshake is required.
	#[error("Refresh window for provider `{provider}` expired at {expired_at}.")]
	RefreshExpired {
		/// Provider identifier string.
		provider: String,
		/// Instant the refresh window closed.
		expired_at: OffsetDateTime,
	},
}

/// Configuration and validation failures raised by the broker.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Descriptor does not enable refreshing access tokens.
	#[error("Descriptor `{descriptor}` does not support refreshing access tokens.")]
	RefreshUnsupported {
		/// Provider identifier string.
		descriptor: String,
	},
	/// Token is missing a refresh token.
	#[error("Token is missing a refresh token.")]
	MissingRefreshToken,
	/// No request token was supplied.
	#[error("Request token is empty.")]
	MissingRequestToken,
	/// Token does not carry an access token pair.
	#[error("Token is missing an access token and secret.")]
	MissingAccessToken,
	/// No request token secret was supplied and none is stored.
	#[error("No request token secret is available for provider `{descriptor}`.")]
	MissingRequestTokenSecret {
		/// Provider identifier string.
		descriptor: String,
	},
	/// Signed parameters could not be attached to an outbound request.
	#[error("Authorization could not be attached to the request.")]
	InvalidHeader {
		/// Underlying header construction failure.
		#[source]
		source: BoxError,
	},
	/// Token builder validation failed.
	#[error("Unable to build token.")]
	TokenBuild(#[from] crate::auth::TokenBuilderError),
}

/// Malformed or error-bearing provider responses received during a handshake leg.
///
/// Every variant carries a bounded preview of the raw body so callers can diagnose
/// provider incompatibilities without logging entire payloads.
#[derive(Debug, ThisError)]
pub enum TokenResponseError {
	/// Body could not be decoded at all.
	#[error("Token endpoint returned an unparseable response: {body}.")]
	Malformed {
		/// Body preview.
		body: String,
	},
	/// Provider reported an error field.
	#[error("Error in retrieving token: \"{error}\".")]
	Provider {
		/// Value of the provider's error field.
		error: String,
		/// Body preview.
		body: String,
	},
	/// Provider did not confirm the callback during the request-token leg.
	#[error("Provider did not confirm the callback: {body}.")]
	CallbackNotConfirmed {
		/// Body preview.
		body: String,
	},
	/// A required field is absent.
	#[error("Token response is missing the `{field}` field: {body}.")]
	MissingField {
		/// Missing field name.
		field: String,
		/// Body preview.
		body: String,
	},
	/// A field is present but its value cannot be interpreted.
	#[error("Token response field `{field}` has an invalid value `{value}`.")]
	InvalidField {
		/// Field name.
		field: String,
		/// Offending value.
		value: String,
	},
	/// JSON payload failed to decode.
	#[error("Token endpoint returned malformed JSON: {body}.")]
	Json {
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// Body preview.
		body: String,
	},
	/// Parsed fields could not form a token.
	#[error("Token response could not be turned into a token.")]
	Build(#[from] crate::auth::TokenBuilderError),
}
impl TokenResponseError {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Truncates a raw body to the preview length stored inside errors.
	pub fn preview(body: &str) -> String {
		if body.chars().count() <= Self::BODY_PREVIEW_LIMIT {
			return body.to_owned();
		}

		let mut buf = body.chars().take(Self::BODY_PREVIEW_LIMIT).collect::<String>();

		buf.push('…');

		buf
	}
}

/// Transport-level failures (network, IO) surfaced verbatim from the HTTP collaborator.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("{source}")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

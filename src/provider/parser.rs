//! Token-endpoint response parsers.
//!
//! Both legs of the handshake answer with a flat set of fields. The default
//! [`FormResponseParser`] reads `application/x-www-form-urlencoded` bodies, and
//! [`JsonResponseParser`] covers providers that answer with a JSON object. Either way
//! the fields are mapped onto a [`Token`] through the descriptor's [`ResponseFields`].

// crates.io
use serde_json::Value;
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::{Token, TokenLifetime},
	error::TokenResponseError,
	provider::{ProviderQuirks, ResponseFields},
};

/// Inputs shared by every parse call.
#[derive(Clone, Copy, Debug)]
pub struct ParseContext<'a> {
	/// Field-name table from the descriptor.
	pub fields: &'a ResponseFields,
	/// Quirks from the descriptor.
	pub quirks: &'a ProviderQuirks,
	/// Instant relative expiry values are anchored to.
	pub issued_at: OffsetDateTime,
}

/// Strategy turning raw token-endpoint bodies into [`Token`] values.
///
/// Implementations must never return a partially populated token: any missing or
/// malformed field is reported as a [`TokenResponseError`] carrying a body preview.
pub trait ResponseParser
where
	Self: Send + Sync,
{
	/// Parses the request-token (temporary credential) response.
	fn parse_request_token(
		&self,
		body: &str,
		ctx: &ParseContext<'_>,
	) -> Result<Token, TokenResponseError>;

	/// Parses the access-token (token credential) response, also used for refreshes.
	fn parse_access_token(
		&self,
		body: &str,
		ctx: &ParseContext<'_>,
	) -> Result<Token, TokenResponseError>;
}

/// Parser for `application/x-www-form-urlencoded` bodies.
#[derive(Clone, Copy, Debug, Default)]
pub struct FormResponseParser;
impl FormResponseParser {
	fn decode(body: &str) -> Result<BTreeMap<String, String>, TokenResponseError> {
		let fields = form_urlencoded::parse(body.trim().as_bytes())
			.filter(|(key, _)| !key.is_empty())
			.map(|(key, value)| (key.into_owned(), value.into_owned()))
			.collect::<BTreeMap<_, _>>();

		if fields.is_empty() {
			return Err(TokenResponseError::Malformed { body: TokenResponseError::preview(body) });
		}

		Ok(fields)
	}
}
impl ResponseParser for FormResponseParser {
	fn parse_request_token(
		&self,
		body: &str,
		ctx: &ParseContext<'_>,
	) -> Result<Token, TokenResponseError> {
		request_token_from_fields(Self::decode(body)?, body, ctx)
	}

	fn parse_access_token(
		&self,
		body: &str,
		ctx: &ParseContext<'_>,
	) -> Result<Token, TokenResponseError> {
		access_token_from_fields(Self::decode(body)?, body, ctx)
	}
}

/// Parser for providers that answer with a flat JSON object.
///
/// Strings are taken verbatim, other scalars are stringified, and `null` members are
/// dropped. Nested values are kept as their JSON text inside the extra params.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonResponseParser;
impl JsonResponseParser {
	fn decode(body: &str) -> Result<BTreeMap<String, String>, TokenResponseError> {
		let mut de = serde_json::Deserializer::from_str(body);
		let object: BTreeMap<String, Value> = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| TokenResponseError::Json {
				source,
				body: TokenResponseError::preview(body),
			})?;

		Ok(object
			.into_iter()
			.filter_map(|(key, value)| match value {
				Value::Null => None,
				Value::String(s) => Some((key, s)),
				other => Some((key, other.to_string())),
			})
			.collect())
	}
}
impl ResponseParser for JsonResponseParser {
	fn parse_request_token(
		&self,
		body: &str,
		ctx: &ParseContext<'_>,
	) -> Result<Token, TokenResponseError> {
		request_token_from_fields(Self::decode(body)?, body, ctx)
	}

	fn parse_access_token(
		&self,
		body: &str,
		ctx: &ParseContext<'_>,
	) -> Result<Token, TokenResponseError> {
		access_token_from_fields(Self::decode(body)?, body, ctx)
	}
}

fn request_token_from_fields(
	mut fields: BTreeMap<String, String>,
	body: &str,
	ctx: &ParseContext<'_>,
) -> Result<Token, TokenResponseError> {
	reject_provider_error(&fields, body, ctx)?;

	if ctx.quirks.callback_confirmation_required
		&& fields.get(&ctx.fields.callback_confirmed).map(String::as_str) != Some("true")
	{
		return Err(TokenResponseError::CallbackNotConfirmed {
			body: TokenResponseError::preview(body),
		});
	}

	let token = take_required(&mut fields, &ctx.fields.token, body)?;
	let secret = take_required(&mut fields, &ctx.fields.token_secret, body)?;

	fields.retain(|key, _| !ctx.fields.is_mapped(key));

	Ok(Token::builder()
		.request_token(token, secret)
		.issued_at(ctx.issued_at)
		.extra_params(fields)
		.build()?)
}

fn access_token_from_fields(
	mut fields: BTreeMap<String, String>,
	body: &str,
	ctx: &ParseContext<'_>,
) -> Result<Token, TokenResponseError> {
	reject_provider_error(&fields, body, ctx)?;

	let token = take_required(&mut fields, &ctx.fields.token, body)?;
	let secret = take_required(&mut fields, &ctx.fields.token_secret, body)?;
	let refresh_token = fields.remove(&ctx.fields.refresh_token).filter(|value| !value.is_empty());
	let end_of_life = match take_deadline(&mut fields, &ctx.fields.expires_in, ctx.issued_at)? {
		Some(expires_at) => TokenLifetime::ExpiresAt(expires_at),
		None => TokenLifetime::Unknown,
	};
	let refresh_expires_at =
		take_deadline(&mut fields, &ctx.fields.refresh_expires_in, ctx.issued_at)?;

	fields.retain(|key, _| !ctx.fields.is_mapped(key));

	let mut builder = Token::builder()
		.access_token(token, secret)
		.end_of_life(end_of_life)
		.refresh_window_fallback(ctx.quirks.refresh_window_fallback)
		.issued_at(ctx.issued_at)
		.extra_params(fields);

	if let Some(refresh_token) = refresh_token {
		builder = builder.refresh_token(refresh_token);
	}
	if let Some(deadline) = refresh_expires_at {
		builder = builder.refresh_expires_at(deadline);
	}

	Ok(builder.build()?)
}

fn reject_provider_error(
	fields: &BTreeMap<String, String>,
	body: &str,
	ctx: &ParseContext<'_>,
) -> Result<(), TokenResponseError> {
	match fields.get(&ctx.fields.error) {
		Some(error) => Err(TokenResponseError::Provider {
			error: error.clone(),
			body: TokenResponseError::preview(body),
		}),
		None => Ok(()),
	}
}

fn take_required(
	fields: &mut BTreeMap<String, String>,
	name: &str,
	body: &str,
) -> Result<String, TokenResponseError> {
	fields.remove(name).filter(|value| !value.is_empty()).ok_or_else(|| {
		TokenResponseError::MissingField {
			field: name.to_owned(),
			body: TokenResponseError::preview(body),
		}
	})
}

/// Reads a relative lifetime in seconds and turns it into an instant after `issued_at`.
fn take_deadline(
	fields: &mut BTreeMap<String, String>,
	name: &str,
	issued_at: OffsetDateTime,
) -> Result<Option<OffsetDateTime>, TokenResponseError> {
	let Some(value) = fields.remove(name).filter(|value| !value.trim().is_empty()) else {
		return Ok(None);
	};

	value
		.trim()
		.parse::<i64>()
		.ok()
		.and_then(|seconds| issued_at.checked_add(Duration::seconds(seconds)))
		.map(Some)
		.ok_or_else(|| TokenResponseError::InvalidField { field: name.to_owned(), value })
}

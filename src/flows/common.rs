//! Shared helpers for the handshake legs (signing, dispatch, parsing, outcome recording).

// self
use crate::{
	_prelude::*,
	auth::Token,
	error::TokenResponseError,
	flows::Service,
	header::{self, AuthorizationHeader, ProtocolParams},
	http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport},
	obs::{self, FlowKind, FlowOutcome},
	provider::ParseContext,
	signature::SignatureEngine,
};

impl<C> Service<C>
where
	C: HttpTransport,
{
	/// Builds the signature engine for this consumer.
	pub fn signature_engine(&self) -> SignatureEngine {
		let mut engine = SignatureEngine::new(self.descriptor.signature_method);

		if let Some(secret) = &self.consumer_secret {
			engine = engine.with_consumer_secret(secret.expose());
		}
		if let Some(signer) = &self.rsa_signer {
			engine = engine.with_rsa_signer(signer.clone());
		}

		engine
	}

	/// Fresh protocol parameters (nonce + timestamp) for this consumer.
	pub fn protocol_params(&self) -> ProtocolParams {
		ProtocolParams::generate(&self.consumer_key, self.descriptor.signature_method)
	}

	pub(crate) fn parse_context(&self) -> ParseContext<'_> {
		ParseContext {
			fields: &self.descriptor.fields,
			quirks: &self.descriptor.quirks,
			issued_at: OffsetDateTime::now_utc(),
		}
	}

	pub(crate) fn sign(
		&self,
		method: HttpMethod,
		uri: &Url,
		params: ProtocolParams,
		token_secret: Option<&str>,
		body_params: &[(String, String)],
	) -> Result<AuthorizationHeader> {
		Ok(header::build_authorization(
			&self.signature_engine(),
			method.as_str(),
			uri,
			params,
			token_secret,
			body_params,
		)?)
	}

	/// Signs and POSTs a token-endpoint request, returning the response whatever its status.
	pub(crate) async fn post_signed(
		&self,
		endpoint: &Url,
		params: ProtocolParams,
		token_secret: Option<&str>,
		body_params: &[(String, String)],
	) -> Result<HttpResponse> {
		let authorization = self.sign(HttpMethod::Post, endpoint, params, token_secret, body_params)?;
		let mut request = HttpRequest::new(HttpMethod::Post, endpoint.clone())
			.header(AuthorizationHeader::NAME, authorization.header_value());

		if !body_params.is_empty() {
			request = request.form(body_params);
		}

		Ok(self.http_client.send(request).await?)
	}
}

/// Runs `parse` over the response body, logging rejected responses.
pub(crate) fn parse_token<F>(kind: FlowKind, response: &HttpResponse, parse: F) -> Result<Token>
where
	F: FnOnce(&str) -> Result<Token, TokenResponseError>,
{
	parse(&response.body).map_err(|err| {
		obs::token_response_rejected(kind, response.status, &err);

		Error::from(err)
	})
}

/// Records the final outcome of a flow.
pub(crate) fn record_outcome<T>(kind: FlowKind, result: &Result<T>) {
	match result {
		Ok(_) => obs::record_flow_outcome(kind, FlowOutcome::Success),
		Err(_) => obs::record_flow_outcome(kind, FlowOutcome::Failure),
	}
}

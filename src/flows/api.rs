//! Signed calls against protected resources once a token has been authorized.

// self
use crate::{
	_prelude::*,
	auth::Token,
	error::ConfigError,
	flows::{Service, common},
	header::AuthorizationHeader,
	http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> Service<C>
where
	C: HttpTransport,
{
	/// Signs an API call with `token`'s access credentials.
	///
	/// `body_params` are the decoded pairs of a form-encoded body; they are signed but stay
	/// out of the returned header.
	pub fn authorize_request(
		&self,
		method: HttpMethod,
		uri: &Url,
		token: &Token,
		body_params: &[(String, String)],
	) -> Result<AuthorizationHeader> {
		let access = token.access_pair().ok_or(ConfigError::MissingAccessToken)?;
		let params = self.protocol_params().token(access.token.expose());

		self.sign(method, uri, params, Some(access.secret.expose()), body_params)
	}

	/// Loads the stored token, signs the call, and sends it.
	///
	/// GET requests move the protocol parameters into the query string when the descriptor
	/// asks for query-string authentication; everything else uses the `Authorization` header.
	/// The response is returned whatever its status.
	pub async fn send_authorized(
		&self,
		method: HttpMethod,
		uri: Url,
		body_params: &[(String, String)],
	) -> Result<HttpResponse> {
		const KIND: FlowKind = FlowKind::ApiRequest;

		let span = FlowSpan::new(KIND, &self.descriptor.id, "send_authorized");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token = self.store.get(&self.descriptor.id).await?;
				let authorization = self.authorize_request(method, &uri, &token, body_params)?;
				let mut request = if self.descriptor.quirks.query_string_auth
					&& method == HttpMethod::Get
				{
					let mut url = uri;

					authorization.apply_to_url(&mut url);

					HttpRequest::new(method, url)
				} else {
					HttpRequest::new(method, uri)
						.header(AuthorizationHeader::NAME, authorization.header_value())
				};

				if !body_params.is_empty() {
					request = request.form(body_params);
				}

				Ok(self.http_client.send(request).await?)
			})
			.await;

		common::record_outcome(KIND, &result);

		result
	}
}

//! Temporary credential leg (RFC 5849 §2.1).

// self
use crate::{
	_prelude::*,
	auth::Token,
	flows::{Service, common},
	http::HttpTransport,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> Service<C>
where
	C: HttpTransport,
{
	/// Obtains a request token from the provider.
	///
	/// The request is signed with an empty token secret and carries `oauth_callback`. The
	/// returned token is also written to the store so [`Service::request_access_token`] can
	/// recover its secret later.
	pub async fn request_request_token(&self) -> Result<Token> {
		const KIND: FlowKind = FlowKind::RequestToken;

		let span = FlowSpan::new(KIND, &self.descriptor.id, "request_request_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let params = self.protocol_params().callback(self.descriptor.callback.as_str());
				let response = self
					.post_signed(&self.descriptor.endpoints.request_token, params, None, &[])
					.await?;
				let ctx = self.parse_context();
				let token = common::parse_token(KIND, &response, |body| {
					self.parser.parse_request_token(body, &ctx)
				})?;

				self.store.set(&self.descriptor.id, token.clone()).await?;

				Ok(token)
			})
			.await;

		common::record_outcome(KIND, &result);

		result
	}
}

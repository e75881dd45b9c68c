//! Thread-safe in-memory [`TokenStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{ProviderId, Token},
	store::{StoreError, StoreFuture, TokenStore},
};

type StoreMap = Arc<RwLock<HashMap<ProviderId, Token>>>;

/// Thread-safe storage backend that keeps tokens in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Number of stored tokens.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn get_now(map: &StoreMap, provider: &ProviderId) -> Result<Token, StoreError> {
		map.read().get(provider).cloned().ok_or_else(|| StoreError::not_found(provider))
	}
}
impl TokenStore for MemoryStore {
	fn get<'a>(&'a self, provider: &'a ProviderId) -> StoreFuture<'a, Token> {
		Box::pin(async move { Self::get_now(&self.0, provider) })
	}

	fn set<'a>(&'a self, provider: &'a ProviderId, token: Token) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			self.0.write().insert(provider.to_owned(), token);

			Ok(())
		})
	}

	fn has<'a>(&'a self, provider: &'a ProviderId) -> StoreFuture<'a, bool> {
		Box::pin(async move { Ok(self.0.read().contains_key(provider)) })
	}

	fn clear<'a>(&'a self, provider: &'a ProviderId) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			self.0.write().remove(provider);

			Ok(())
		})
	}

	fn clear_all(&self) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			self.0.write().clear();

			Ok(())
		})
	}
}

//! Storage contracts and built-in store implementations for provider tokens.
//!
//! Stores are keyed by [`ProviderId`]: one token per provider. Implementations must offer
//! read-your-writes consistency for a single key; the broker holds no locks across calls.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{ProviderId, Token},
};

/// Boxed future returned by [`TokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract implemented by token stores.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Fetches the token stored for `provider`, failing with [`StoreError::NotFound`] when absent.
	fn get<'a>(&'a self, provider: &'a ProviderId) -> StoreFuture<'a, Token>;

	/// Persists or replaces the token stored for `provider`.
	fn set<'a>(&'a self, provider: &'a ProviderId, token: Token) -> StoreFuture<'a, ()>;

	/// Returns `true` when a token is stored for `provider`.
	fn has<'a>(&'a self, provider: &'a ProviderId) -> StoreFuture<'a, bool>;

	/// Removes the token stored for `provider`; succeeds when nothing is stored.
	fn clear<'a>(&'a self, provider: &'a ProviderId) -> StoreFuture<'a, ()>;

	/// Removes every stored token; succeeds on an empty store.
	fn clear_all(&self) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// No token is stored under the requested key.
	#[error("No token stored for provider `{provider}`.")]
	NotFound {
		/// Provider identifier string.
		provider: String,
	},
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
impl StoreError {
	/// Builds a [`StoreError::NotFound`] for `provider`.
	pub fn not_found(provider: &ProviderId) -> Self {
		Self::NotFound { provider: provider.to_string() }
	}

	/// Returns `true` for [`StoreError::NotFound`].
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. })
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_broker_error_with_source() {
		let store_error = StoreError::Backend { message: "database unreachable".into() };
		let broker_error: Error = store_error.clone().into();

		assert!(matches!(broker_error, Error::Storage(_)));
		assert!(broker_error.to_string().contains("database unreachable"));

		let source = StdError::source(&broker_error)
			.expect("Broker error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn not_found_names_the_provider() {
		let provider = ProviderId::new("yahoo").expect("Provider fixture should be valid.");
		let err = StoreError::not_found(&provider);

		assert!(err.is_not_found());
		assert_eq!(err.to_string(), "No token stored for provider `yahoo`.");
	}
}

#![cfg(feature = "reqwest")]

// crates.io
use time::macros;
// self
use oauth1_broker::{
	_preludet::*,
	auth::{ProviderId, Token, TokenLifetime, TokenStatus},
	store::{MemoryStore, StoreError, TokenStore},
};

fn provider(id: &str) -> ProviderId {
	ProviderId::new(id).expect("Failed to build provider identifier for memory store tests.")
}

fn build_token(access: &str, refresh: Option<&str>) -> Token {
	let issued = macros::datetime!(2025-11-10 12:00 UTC);
	let mut builder = Token::builder()
		.access_token(access, format!("{access}-secret"))
		.issued_at(issued)
		.end_of_life(
			TokenLifetime::from_expires_in(issued, 3600)
				.expect("One hour after issuance should be representable."),
		);

	if let Some(value) = refresh {
		builder = builder.refresh_token(value);
	}

	builder.build().expect("Token fixture should build successfully.")
}

#[tokio::test]
async fn set_and_get_round_trip() {
	let store = MemoryStore::default();
	let yahoo = provider("yahoo");
	let token = build_token("access-1", Some("handle-1"));

	store.set(&yahoo, token.clone()).await.expect("Saving a token should succeed.");

	let fetched = store.get(&yahoo).await.expect("Fetching a stored token should succeed.");

	assert_eq!(fetched.access_token(), Some("access-1"));
	assert_eq!(fetched.access_token_secret(), Some("access-1-secret"));
	assert_eq!(fetched.refresh_token(), Some("handle-1"));
	assert_eq!(
		fetched.status_at(macros::datetime!(2025-11-10 12:30 UTC)),
		TokenStatus::Active
	);
	assert!(store.has(&yahoo).await.expect("Lookup should succeed."));
}

#[tokio::test]
async fn missing_tokens_report_not_found() {
	let store = MemoryStore::default();
	let err = store.get(&provider("absent")).await.expect_err("Empty store should miss.");

	assert_eq!(err, StoreError::NotFound { provider: "absent".into() });
	assert!(!store.has(&provider("absent")).await.expect("Lookup should succeed."));
}

#[tokio::test]
async fn set_replaces_previous_token_for_the_same_provider() {
	let store = MemoryStore::default();
	let yahoo = provider("yahoo");

	store.set(&yahoo, build_token("first", None)).await.expect("First save should succeed.");
	store.set(&yahoo, build_token("second", None)).await.expect("Second save should succeed.");

	assert_eq!(store.len(), 1);
	assert_eq!(
		store.get(&yahoo).await.expect("Stored token should be present.").access_token(),
		Some("second")
	);
}

#[tokio::test]
async fn clear_and_clear_all_are_idempotent() {
	let store = MemoryStore::default();
	let yahoo = provider("yahoo");
	let flickr = provider("flickr");

	store.clear(&yahoo).await.expect("Clearing a missing key should succeed.");
	store.clear_all().await.expect("Clearing an empty store should succeed.");
	store.set(&yahoo, build_token("y", None)).await.expect("Saving should succeed.");
	store.set(&flickr, build_token("f", None)).await.expect("Saving should succeed.");
	store.clear(&yahoo).await.expect("Clearing a stored key should succeed.");
	store.clear(&yahoo).await.expect("Clearing twice should succeed.");

	assert!(!store.has(&yahoo).await.expect("Lookup should succeed."));
	assert!(store.has(&flickr).await.expect("Lookup should succeed."));

	store.clear_all().await.expect("Clearing all tokens should succeed.");
	store.clear_all().await.expect("Clearing all tokens twice should succeed.");

	assert!(store.is_empty());
}

#[tokio::test]
async fn concurrent_writers_leave_one_token_per_provider() {
	let store = Arc::new(MemoryStore::default());
	let mut handles = Vec::new();

	for idx in 0..16 {
		let store = store.clone();

		handles.push(tokio::spawn(async move {
			let key = provider(if idx % 2 == 0 { "even" } else { "odd" });

			store
				.set(&key, build_token(&format!("access-{idx}"), None))
				.await
				.expect("Concurrent save should succeed.");
		}));
	}

	for handle in handles {
		handle.await.expect("Writer task should not panic.");
	}

	assert_eq!(store.len(), 2);
	assert!(store.has(&provider("even")).await.expect("Lookup should succeed."));
	assert!(store.has(&provider("odd")).await.expect("Lookup should succeed."));
}

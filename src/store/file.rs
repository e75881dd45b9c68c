//! Simple file-backed [`TokenStore`] for lightweight deployments and CLI tools.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{ProviderId, Token},
	store::{StoreError, StoreFuture, TokenStore},
};

/// Persists tokens to a JSON file after each mutation.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<BTreeMap<ProviderId, Token>>>,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Location of the JSON snapshot.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<BTreeMap<ProviderId, Token>, StoreError> {
		if !path.exists() {
			return Ok(BTreeMap::new());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		if bytes.is_empty() {
			return Ok(BTreeMap::new());
		}

		serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist_locked(&self, contents: &BTreeMap<ProviderId, Token>) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized =
			serde_json::to_vec_pretty(contents).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize store snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl TokenStore for FileStore {
	fn get<'a>(&'a self, provider: &'a ProviderId) -> StoreFuture<'a, Token> {
		Box::pin(async move {
			self.inner.read().get(provider).cloned().ok_or_else(|| StoreError::not_found(provider))
		})
	}

	fn set<'a>(&'a self, provider: &'a ProviderId, token: Token) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			guard.insert(provider.to_owned(), token);

			self.persist_locked(&guard)
		})
	}

	fn has<'a>(&'a self, provider: &'a ProviderId) -> StoreFuture<'a, bool> {
		Box::pin(async move { Ok(self.inner.read().contains_key(provider)) })
	}

	fn clear<'a>(&'a self, provider: &'a ProviderId) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			if guard.remove(provider).is_some() {
				self.persist_locked(&guard)?;
			}

			Ok(())
		})
	}

	fn clear_all(&self) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			if !guard.is_empty() {
				guard.clear();
				self.persist_locked(&guard)?;
			}

			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;

	fn temp_path() -> PathBuf {
		let unique = format!(
			"oauth1_broker_file_store_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	fn build_token() -> (ProviderId, Token) {
		let provider = ProviderId::new("yahoo").expect("Failed to build provider fixture.");
		let token = Token::builder()
			.access_token("access-token", "access-secret")
			.refresh_token("session-handle")
			.extra_param("xoauth_yahoo_guid", "guid")
			.build()
			.expect("Failed to build file-store test token.");

		(provider, token)
	}

	#[test]
	fn save_and_reload_round_trip() {
		let path = temp_path();
		let store = FileStore::open(&path).expect("Failed to open file store snapshot.");
		let (provider, token) = build_token();
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		rt.block_on(store.set(&provider, token.clone()))
			.expect("Failed to save fixture token to file store.");
		drop(store);

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");
		let fetched = rt
			.block_on(reopened.get(&provider))
			.expect("File store lost token after reopen.");

		assert_eq!(fetched.access_token(), token.access_token());
		assert_eq!(fetched.refresh_token(), Some("session-handle"));
		assert_eq!(fetched.extra_params(), token.extra_params());

		rt.block_on(reopened.clear(&provider)).expect("Clearing a stored token should succeed.");
		rt.block_on(reopened.clear(&provider)).expect("Clearing twice should be a no-op.");

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");

		assert!(!rt.block_on(reopened.has(&provider)).expect("Lookup should succeed."));
		assert!(
			rt.block_on(reopened.get(&provider))
				.expect_err("Cleared token should be missing.")
				.is_not_found()
		);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}
}

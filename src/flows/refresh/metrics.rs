// std
use std::sync::atomic::{AtomicU64, Ordering};

/// In-process counters for refresh outcomes, available without the `metrics` feature.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
	expired: AtomicU64,
}
impl RefreshMetrics {
	/// Total refresh attempts on providers that support refreshing.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Refreshes that produced and stored a new token.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Refreshes that failed for any reason, expired windows included.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	/// Refreshes rejected because the refresh window had closed.
	pub fn expired(&self) -> u64 {
		self.expired.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_expired(&self) {
		self.expired.fetch_add(1, Ordering::Relaxed);
	}
}

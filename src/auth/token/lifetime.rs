// self
use crate::_prelude::*;

/// Absolute end of life for an access token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "at")]
pub enum TokenLifetime {
	/// Provider did not report an expiry.
	#[default]
	Unknown,
	/// Provider declared the token as non-expiring.
	NeverExpires,
	/// Token stops working at the given instant.
	ExpiresAt(OffsetDateTime),
}
impl TokenLifetime {
	/// Builds a lifetime relative to `issued_at`; non-positive values mean the token is
	/// already expired.
	///
	/// Returns `None` when the expiry falls outside the representable date range.
	pub fn from_expires_in(issued_at: OffsetDateTime, seconds: i64) -> Option<Self> {
		issued_at.checked_add(Duration::seconds(seconds)).map(Self::ExpiresAt)
	}

	/// Returns the expiry instant when one is known.
	pub fn expires_at(self) -> Option<OffsetDateTime> {
		match self {
			Self::ExpiresAt(instant) => Some(instant),
			Self::Unknown | Self::NeverExpires => None,
		}
	}

	/// Returns `true` if the lifetime has elapsed at `instant`.
	pub fn is_expired_at(self, instant: OffsetDateTime) -> bool {
		self.expires_at().is_some_and(|expires_at| instant >= expires_at)
	}
}

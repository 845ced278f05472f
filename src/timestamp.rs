use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::SystemTime;

/// A Unix timestamp represented as a `u64`, used to stamp exchange-rate quotes.
///
/// This type encodes the number of seconds since the Unix epoch (1970-01-01T00:00:00Z).
/// The price index delivers it as a plain JSON number in the `stamp` field, so it
/// serializes as an integer on the wire.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Ord, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnixTimestamp(u64);

impl Display for UnixTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl UnixTimestamp {
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub fn now() -> Self {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .expect("SystemTime before UNIX epoch?!?")
            .as_secs();
        Self(now)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed between this timestamp and `later`, saturating at zero.
    pub fn age_at(&self, later: UnixTimestamp) -> u64 {
        later.0.saturating_sub(self.0)
    }
}

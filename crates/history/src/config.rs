use std::num::NonZeroUsize;

use serde::Deserialize;

use crate::entry::Mode;

/// Default number of entries kept in the history log.
pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(4096).unwrap();

/// History log configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct HistoryConfig {
	/// Maximum number of entries; the oldest are evicted first.
	pub capacity: NonZeroUsize,
	/// Mode that closes an edit span.
	pub normal_mode: Mode,
	/// Mode that opens an edit span.
	pub insert_mode: Mode,
}

impl Default for HistoryConfig {
	fn default() -> Self {
		Self {
			capacity: DEFAULT_CAPACITY,
			normal_mode: Mode::Normal,
			insert_mode: Mode::Insert,
		}
	}
}

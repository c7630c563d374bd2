//! Process-wide, capacity-bounded history log.
//!
//! Entries are addressed by absolute ordinals that are never reused. When the
//! log grows past its capacity the oldest entries are evicted and the first
//! live ordinal advances, so a [`Cursor`] still holding an evicted ordinal can
//! tell that its entry is gone instead of reading whatever took its slot.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::cursor::Cursor;
use crate::entry::Entry;

#[derive(Debug)]
struct LogState {
	entries: VecDeque<Entry>,
	/// Ordinal of `entries[0]`.
	first: u64,
	capacity: NonZeroUsize,
}

impl LogState {
	fn end(&self) -> u64 {
		self.first + self.entries.len() as u64
	}
}

/// Shared handle to the append-only history log.
///
/// Clones refer to the same log. Guards are released before any method
/// returns, so handles may be used freely across `.await` points.
#[derive(Debug, Clone)]
pub struct HistoryLog {
	state: Arc<RwLock<LogState>>,
}

impl HistoryLog {
	/// Creates an empty log holding at most `capacity` entries.
	pub fn new(capacity: NonZeroUsize) -> Self {
		Self {
			state: Arc::new(RwLock::new(LogState {
				entries: VecDeque::new(),
				first: 0,
				capacity,
			})),
		}
	}

	/// Appends `entry`, evicting the oldest entries past capacity.
	///
	/// Returns the ordinal assigned to the entry.
	pub fn append(&self, entry: Entry) -> u64 {
		let mut state = self.state.write();
		let ordinal = state.end();
		trace!(ordinal, entry = %entry.describe(), "history append");
		state.entries.push_back(entry);
		while state.entries.len() > state.capacity.get() {
			state.entries.pop_front();
			state.first += 1;
			trace!(first = state.first, "history evicted oldest entry");
		}
		ordinal
	}

	/// Removes every entry. Ordinals keep increasing afterwards.
	pub fn clear(&self) {
		let mut state = self.state.write();
		state.first = state.end();
		state.entries.clear();
	}

	/// Returns the entry at `ordinal`, if it is still in the log.
	pub fn get(&self, ordinal: u64) -> Option<Entry> {
		let state = self.state.read();
		let index = ordinal.checked_sub(state.first)?;
		state.entries.get(usize::try_from(index).ok()?).cloned()
	}

	/// Returns the range of live ordinals.
	///
	/// `end` is one past the newest entry and never decreases.
	pub fn bounds(&self) -> Range<u64> {
		let state = self.state.read();
		state.first..state.end()
	}

	pub fn len(&self) -> usize {
		self.state.read().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.state.read().entries.is_empty()
	}

	pub fn capacity(&self) -> NonZeroUsize {
		self.state.read().capacity
	}

	/// Returns a cursor one past the newest entry.
	pub fn cursor_from_end(&self) -> Cursor {
		let end = self.bounds().end;
		Cursor::new(self.clone(), end)
	}

	/// Returns true if both handles refer to the same log.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.state, &other.state)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::entry::Mode;

	fn log(capacity: usize) -> HistoryLog {
		HistoryLog::new(NonZeroUsize::new(capacity).unwrap())
	}

	#[test]
	fn ordinals_increase_across_eviction() {
		let log = log(2);
		assert_eq!(log.append(Entry::mode(Mode::Insert)), 0);
		assert_eq!(log.append(Entry::ExternalChange), 1);
		assert_eq!(log.append(Entry::mode(Mode::Normal)), 2);

		assert_eq!(log.bounds(), 1..3);
		assert!(log.get(0).is_none());
		assert!(matches!(log.get(1), Some(Entry::ExternalChange)));
		assert!(matches!(log.get(2), Some(Entry::ChangeMode(Mode::Normal))));
		assert!(log.get(3).is_none());
	}

	#[test]
	fn clones_share_state() {
		let a = log(8);
		let b = a.clone();
		b.append(Entry::ExternalChange);
		assert_eq!(a.len(), 1);
		assert!(a.ptr_eq(&b));
		assert!(!a.ptr_eq(&log(8)));
	}
}

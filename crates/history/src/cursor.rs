//! Traversal handles into the history log.
//!
//! A [`Cursor`] is an ordinal plus a handle to the log. It never caches the
//! log bounds: every step re-reads them, so a cursor stays coherent while new
//! entries are appended (e.g. by live input while a replay is suspended) and
//! reports exhaustion once its entry has been evicted.
//!
//! Entries appended after a cursor was created stay invisible to it until
//! [`Cursor::next`] moves it onto them: stepping forward onto an ordinal makes
//! that ordinal and everything before it readable, even if the entry there
//! was appended after the cursor was created.

use std::fmt;

use regex::Regex;

use crate::context::ReplayContext;
use crate::entry::{CommandEntry, Entry, EntryKind, Mode};
use crate::error::HistoryError;
use crate::log::HistoryLog;

/// A position in a [`HistoryLog`].
///
/// Positions range over the log's live ordinals plus the one-past-the-end
/// position, where [`Cursor::is`] is always false.
#[derive(Clone)]
pub struct Cursor {
	log: HistoryLog,
	position: u64,
	/// Ordinals at or past this were appended after the cursor last looked.
	horizon: u64,
}

impl Cursor {
	pub(crate) fn new(log: HistoryLog, position: u64) -> Self {
		Self {
			log,
			position,
			horizon: position,
		}
	}

	/// Returns the ordinal this cursor points at.
	pub fn position(&self) -> u64 {
		self.position
	}

	pub fn log(&self) -> &HistoryLog {
		&self.log
	}

	/// Returns true if the entry under the cursor is of kind `kind`.
	///
	/// False when the cursor is past the end or its entry was evicted.
	pub fn is(&self, kind: EntryKind) -> bool {
		self.entry().is_some_and(|entry| entry.kind() == kind)
	}

	/// Returns the entry under the cursor.
	pub fn entry(&self) -> Option<Entry> {
		if self.position >= self.horizon {
			return None;
		}
		self.log.get(self.position)
	}

	/// Returns the command under the cursor, if the entry is a command.
	pub fn command(&self) -> Option<CommandEntry> {
		match self.entry()? {
			Entry::ExecuteCommand(cmd) => Some(cmd),
			_ => None,
		}
	}

	/// Moves one entry back. Returns false, leaving the cursor unchanged, at
	/// the start of the log or if the current entry has been evicted.
	pub fn previous(&mut self) -> bool {
		let bounds = self.log.bounds();
		if self.position <= bounds.start || self.position > bounds.end {
			return false;
		}
		self.position -= 1;
		true
	}

	/// Moves one entry forward. Returns false, leaving the cursor unchanged,
	/// at the end of the log or if the current entry has been evicted.
	pub fn next(&mut self) -> bool {
		let bounds = self.log.bounds();
		if self.position >= bounds.end || self.position < bounds.start {
			return false;
		}
		self.position += 1;
		self.horizon = self.horizon.max((self.position + 1).min(bounds.end));
		true
	}

	/// Orders cursors of the same log by position.
	pub fn is_before_or_equal(&self, other: &Cursor) -> bool {
		debug_assert!(self.log.ptr_eq(&other.log), "comparing cursors of different logs");
		self.position <= other.position
	}

	/// Re-executes the entry under the cursor against the live editor.
	pub async fn replay(&self, cx: &mut ReplayContext<'_>) -> Result<(), HistoryError> {
		let entry = self.entry().ok_or(HistoryError::OutOfBounds { position: self.position })?;
		entry.replay(cx).await?;
		Ok(())
	}

	/// Walks backward to the closest replayable command whose identifier
	/// matches `filter`.
	///
	/// Stops at the start of the log or at an [`Entry::ExternalChange`]. On
	/// success the cursor rests on the matching entry.
	pub fn find_previous_command(&mut self, filter: &Regex) -> Result<CommandEntry, HistoryError> {
		while self.previous() {
			match self.entry() {
				Some(Entry::ExecuteCommand(cmd)) if cmd.descriptor().should_be_replayed() && filter.is_match(cmd.identifier()) => {
					return Ok(cmd);
				}
				Some(Entry::ExternalChange) => break,
				_ => {}
			}
		}
		Err(HistoryError::NoMatchingCommand {
			filter: filter.as_str().to_string(),
		})
	}
}

impl fmt::Debug for Cursor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Cursor")
			.field("position", &self.position)
			.field("horizon", &self.horizon)
			.field("bounds", &self.log.bounds())
			.finish()
	}
}

/// The entries of the most recent insert session, between the switch into
/// insert mode and the switch back to normal mode.
///
/// `start` rests on the first entry after the insert transition and `end` on
/// the normal transition. The span is `start..end`, so neither transition is
/// part of it and a session without edits is empty.
#[derive(Debug, Clone)]
pub struct EditSpan {
	start: Cursor,
	end: Cursor,
}

impl EditSpan {
	/// Scans backward from the end of `log` for the latest `insert` .. `normal`
	/// bracket.
	///
	/// The first `normal` transition found fixes the end; the entry after the
	/// closest `insert` transition before it fixes the start. Fails at the
	/// start of the log or at an [`Entry::ExternalChange`].
	pub fn find(log: &HistoryLog, normal: &Mode, insert: &Mode) -> Result<Self, HistoryError> {
		let mut cursor = log.cursor_from_end();
		let mut end: Option<Cursor> = None;

		while cursor.previous() {
			match cursor.entry() {
				Some(Entry::ChangeMode(mode)) => {
					if let Some(end) = &end {
						if mode == *insert {
							let mut start = cursor;
							start.next();
							return Ok(Self { start, end: end.clone() });
						}
					} else if mode == *normal {
						end = Some(cursor.clone());
					}
				}
				Some(Entry::ExternalChange) => break,
				_ => {}
			}
		}

		Err(HistoryError::NoEditSpan {
			insert: insert.to_string(),
			normal: normal.to_string(),
		})
	}

	pub fn start(&self) -> &Cursor {
		&self.start
	}

	pub fn end(&self) -> &Cursor {
		&self.end
	}

	/// Returns true if no entries lie between the two transitions.
	pub fn is_empty(&self) -> bool {
		self.end.is_before_or_equal(&self.start)
	}

	/// Replays every entry of the span once, in log order.
	pub async fn replay(&self, cx: &mut ReplayContext<'_>) -> Result<(), HistoryError> {
		let mut cursor = self.start.clone();
		while !self.end.is_before_or_equal(&cursor) {
			cursor.replay(cx).await?;
			if !cursor.next() {
				break;
			}
		}
		Ok(())
	}
}

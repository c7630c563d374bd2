//! Command history for modal editing.
//!
//! Live editing appends [`Entry`] values to a shared, capacity-bounded
//! [`HistoryLog`] through the [`Recorder`]. [`Cursor`]s walk the log backward
//! and forward to find commands or edit spans and re-execute them against the
//! current editor state through a [`ReplayContext`]. Replays are never logged.

pub mod config;
pub mod context;
pub mod cursor;
pub mod entry;
pub mod error;
pub mod log;
pub mod recorder;

#[cfg(test)]
mod test_support;

pub use config::HistoryConfig;
pub use context::{BoxFutureLocal, CommandDescriptor, EditorOps, RecordPolicy, ReplayContext};
pub use cursor::{Cursor, EditSpan};
pub use entry::{CommandEntry, Entry, EntryKind, Mode};
pub use error::{CommandError, CommandResult, HistoryError};
pub use log::HistoryLog;
pub use recorder::{Recorder, Recording};

//! Collaborator seams used while commands run or replay.
//!
//! The host editor implements [`EditorOps`]; command registries hand out
//! [`CommandDescriptor`]s. Both are driven through a [`ReplayContext`], which
//! also carries the cancellation token and the per-invocation record policy.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::entry::Mode;
use crate::error::CommandResult;

/// A pinned, boxed future that is not required to be Send.
pub type BoxFutureLocal<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Editor operations the history core needs from its host.
///
/// Everything else a replayed command touches (buffers, selections) is
/// reached by the command itself, not by the history core.
pub trait EditorOps {
	/// Returns the active editing mode.
	fn mode(&self) -> Mode;

	/// Switches the active editing mode.
	fn set_mode<'a>(&'a mut self, mode: &'a Mode) -> BoxFutureLocal<'a, CommandResult>;
}

/// A command registered with the host, as seen by the recorder.
pub trait CommandDescriptor: Send + Sync {
	/// Stable command identifier (e.g. `"select-word"`).
	fn identifier(&self) -> &str;

	/// Whether `repeat` may pick this command up.
	fn should_be_replayed(&self) -> bool {
		true
	}

	/// Whether live invocations of this command are appended to the log.
	///
	/// Commands that replay history (`repeat`, `recording_play`) return
	/// `false` so that repeating them cannot grow the log without bound.
	fn is_recordable(&self) -> bool {
		true
	}

	/// Runs the command against the live editor with `argument`.
	fn replay<'a>(&'a self, cx: &'a mut ReplayContext<'_>, argument: &'a Value) -> BoxFutureLocal<'a, CommandResult>;
}

/// Whether commands run through a context are appended to the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordPolicy {
	/// Append recordable commands and mode changes.
	#[default]
	Record,
	/// Never append; used for replays and anything nested inside them.
	Suppress,
}

/// Live state a command executes (or replays) against.
pub struct ReplayContext<'a> {
	/// Host editor.
	pub editor: &'a mut dyn EditorOps,
	cancellation: CancellationToken,
	record: RecordPolicy,
}

impl<'a> ReplayContext<'a> {
	/// Creates a recording context over `editor`.
	pub fn new(editor: &'a mut dyn EditorOps, cancellation: CancellationToken) -> Self {
		Self {
			editor,
			cancellation,
			record: RecordPolicy::Record,
		}
	}

	/// Returns the record policy of this context.
	pub fn record_policy(&self) -> RecordPolicy {
		self.record
	}

	/// Returns true if commands run through this context are logged.
	pub fn should_record(&self) -> bool {
		self.record == RecordPolicy::Record
	}

	/// Reborrows this context with recording suppressed.
	///
	/// The child shares the editor and cancellation token. Anything run
	/// through the child, including nested batches, inherits the policy.
	pub fn suppress_recording(&mut self) -> ReplayContext<'_> {
		ReplayContext {
			editor: &mut *self.editor,
			cancellation: self.cancellation.clone(),
			record: RecordPolicy::Suppress,
		}
	}

	/// Returns true once cancellation has been requested.
	pub fn is_cancelled(&self) -> bool {
		self.cancellation.is_cancelled()
	}

	/// Returns the cancellation token shared by this context.
	pub fn cancellation(&self) -> &CancellationToken {
		&self.cancellation
	}
}

impl std::fmt::Debug for ReplayContext<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ReplayContext")
			.field("mode", &self.editor.mode())
			.field("record", &self.record)
			.field("cancelled", &self.is_cancelled())
			.finish()
	}
}

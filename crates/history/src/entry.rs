//! Typed history entries.
//!
//! The log records three kinds of events:
//!
//! * [`Entry::ExecuteCommand`]: a command together with the exact argument it
//!   was invoked with, captured by value.
//! * [`Entry::ChangeMode`]: a transition of the active editing mode. Edit
//!   spans for `repeat_edit` are delimited by these.
//! * [`Entry::ExternalChange`]: a buffer change that did not come from a
//!   recorded command. It replays as a no-op but stops every backward search.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::context::{CommandDescriptor, ReplayContext};
use crate::error::CommandResult;

/// An editing mode name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Mode {
	Normal,
	Insert,
	/// Any other host-defined mode.
	Named(String),
}

impl Mode {
	/// Returns the mode name.
	pub fn name(&self) -> &str {
		match self {
			Self::Normal => "normal",
			Self::Insert => "insert",
			Self::Named(name) => name.as_str(),
		}
	}
}

impl From<&str> for Mode {
	fn from(name: &str) -> Self {
		match name {
			"normal" => Self::Normal,
			"insert" => Self::Insert,
			other => Self::Named(other.to_string()),
		}
	}
}

impl From<String> for Mode {
	fn from(name: String) -> Self {
		Self::from(name.as_str())
	}
}

impl FromStr for Mode {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::from(s))
	}
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A recorded command invocation.
#[derive(Clone)]
pub struct CommandEntry {
	descriptor: Arc<dyn CommandDescriptor>,
	argument: Arc<Value>,
}

impl CommandEntry {
	pub fn new(descriptor: Arc<dyn CommandDescriptor>, argument: Value) -> Self {
		Self {
			descriptor,
			argument: Arc::new(argument),
		}
	}

	pub fn descriptor(&self) -> &Arc<dyn CommandDescriptor> {
		&self.descriptor
	}

	/// Argument captured at invocation time.
	pub fn argument(&self) -> &Value {
		&self.argument
	}

	pub fn identifier(&self) -> &str {
		self.descriptor.identifier()
	}

	/// Runs the command again with its captured argument.
	pub async fn replay(&self, cx: &mut ReplayContext<'_>) -> CommandResult {
		self.descriptor.replay(cx, &self.argument).await
	}
}

impl fmt::Debug for CommandEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandEntry")
			.field("identifier", &self.identifier())
			.field("argument", &self.argument)
			.finish()
	}
}

/// Discriminant of an [`Entry`], used by [`Cursor::is`](crate::Cursor::is).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
	ExecuteCommand,
	ChangeMode,
	ExternalChange,
}

/// One immutable record in the history log.
#[derive(Debug, Clone)]
pub enum Entry {
	/// A command ran with the given argument.
	ExecuteCommand(CommandEntry),
	/// The active mode changed.
	ChangeMode(Mode),
	/// A buffer changed outside of any recorded command.
	ExternalChange,
}

impl Entry {
	/// Creates a command entry.
	pub fn command(descriptor: Arc<dyn CommandDescriptor>, argument: Value) -> Self {
		Self::ExecuteCommand(CommandEntry::new(descriptor, argument))
	}

	/// Creates a mode change entry.
	pub fn mode(mode: impl Into<Mode>) -> Self {
		Self::ChangeMode(mode.into())
	}

	pub fn kind(&self) -> EntryKind {
		match self {
			Self::ExecuteCommand(_) => EntryKind::ExecuteCommand,
			Self::ChangeMode(_) => EntryKind::ChangeMode,
			Self::ExternalChange => EntryKind::ExternalChange,
		}
	}

	/// Short description for tracing/logging.
	pub fn describe(&self) -> String {
		match self {
			Self::ExecuteCommand(cmd) if cmd.argument.is_null() => format!("cmd:{}", cmd.identifier()),
			Self::ExecuteCommand(cmd) => format!("cmd:{} {}", cmd.identifier(), cmd.argument),
			Self::ChangeMode(mode) => format!("mode:{mode}"),
			Self::ExternalChange => "external-change".to_string(),
		}
	}

	/// Re-executes this entry against the live editor.
	///
	/// Does not touch the history log: replays are never recorded.
	pub async fn replay(&self, cx: &mut ReplayContext<'_>) -> CommandResult {
		trace!(entry = %self.describe(), "replaying history entry");
		match self {
			Self::ExecuteCommand(cmd) => cmd.replay(cx).await,
			Self::ChangeMode(mode) => cx.editor.set_mode(mode).await,
			Self::ExternalChange => Ok(()),
		}
	}
}

impl From<CommandEntry> for Entry {
	fn from(cmd: CommandEntry) -> Self {
		Self::ExecuteCommand(cmd)
	}
}

impl From<Mode> for Entry {
	fn from(mode: Mode) -> Self {
		Self::ChangeMode(mode)
	}
}

use thiserror::Error;

/// Errors reported by collaborators while a command or mode change runs.
///
/// Replay never inspects these; they are propagated to the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
	/// General command failure with message.
	#[error("{0}")]
	Failed(String),
	/// An argument was provided but invalid.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	/// Operation not supported in current context.
	#[error("unsupported operation: {0}")]
	Unsupported(&'static str),
	/// Catch-all for other errors.
	#[error("{0}")]
	Other(String),
}

/// Result of running a command or applying a mode change.
pub type CommandResult = Result<(), CommandError>;

/// Errors raised by the history log, its cursors and the recorder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
	/// Backward search reached the start of the log (or a boundary marker)
	/// without finding a replayable command matching `filter`.
	#[error("no previous command matching /{filter}/")]
	NoMatchingCommand { filter: String },
	/// No insert-then-normal edit span precedes the end of the log.
	#[error("no previous edit span from {insert} mode back to {normal} mode")]
	NoEditSpan { insert: String, normal: String },
	/// The cursor points at an entry that is no longer (or not yet) in the log.
	#[error("history position {position} is out of bounds")]
	OutOfBounds { position: u64 },
	/// A recording is already in progress for the register.
	#[error("register '{0}' is already recording")]
	RecordingActive(char),
	/// No recording is in progress for the register.
	#[error("register '{0}' is not recording")]
	NoActiveRecording(char),
	/// A replayed command failed.
	#[error(transparent)]
	Command(#[from] CommandError),
}

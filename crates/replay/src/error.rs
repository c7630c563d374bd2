use thiserror::Error;
use xeno_history::{CommandError, HistoryError};

/// Errors surfaced by the user-facing replay operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
	/// Search exhaustion, stale cursors and recorder preconditions.
	#[error(transparent)]
	History(HistoryError),
	/// A replayed command failed; the remaining repetitions were skipped.
	#[error(transparent)]
	Command(CommandError),
	/// The register does not exist.
	#[error("unknown register '{0}'")]
	UnknownRegister(char),
	/// The register cannot hold recordings.
	#[error("register '{0}' cannot hold macros")]
	MacrosUnsupported(char),
	/// The register holds no recording.
	#[error("register '{0}' holds no recording")]
	NoRecording(char),
	/// The `repeat` filter is not a valid regular expression.
	#[error("invalid filter /{filter}/: {reason}")]
	InvalidFilter { filter: String, reason: String },
	/// Cancellation was requested after `completed` repetitions.
	#[error("replay cancelled after {completed} repetition(s)")]
	Cancelled { completed: usize },
}

impl From<HistoryError> for ReplayError {
	fn from(err: HistoryError) -> Self {
		match err {
			HistoryError::Command(err) => Self::Command(err),
			err => Self::History(err),
		}
	}
}

impl From<CommandError> for ReplayError {
	fn from(err: CommandError) -> Self {
		Self::Command(err)
	}
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
	/// The TOML source failed to parse or has unexpected keys.
	#[error("invalid config: {0}")]
	Toml(#[from] toml::de::Error),
	/// `repeat-filter` is not a valid regular expression.
	#[error("invalid repeat-filter: {0}")]
	Filter(#[from] regex::Error),
}

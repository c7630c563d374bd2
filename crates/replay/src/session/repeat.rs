use regex::Regex;
use tracing::debug;
use xeno_history::{EditSpan, ReplayContext};

use super::{Session, effective_repetitions, ensure_not_cancelled};
use crate::error::ReplayError;

impl Session {
	/// Replays the most recent replayable command whose identifier matches
	/// `filter` (the configured repeat filter when `None`).
	///
	/// The command is located once and then run `repetitions` times with the
	/// argument it was originally invoked with.
	pub async fn repeat(&self, cx: &mut ReplayContext<'_>, repetitions: usize, filter: Option<&str>) -> Result<(), ReplayError> {
		let pattern = filter.unwrap_or(self.config.repeat_filter.as_str());
		let filter = Regex::new(pattern).map_err(|err| ReplayError::InvalidFilter {
			filter: pattern.to_string(),
			reason: err.to_string(),
		})?;

		let mut cursor = self.recorder.cursor_from_end();
		let command = cursor.find_previous_command(&filter)?;
		let repetitions = effective_repetitions(repetitions);
		debug!(command = command.identifier(), ordinal = cursor.position(), repetitions, "repeating command");

		let mut cx = cx.suppress_recording();
		for completed in 0..repetitions {
			ensure_not_cancelled(&cx, completed)?;
			command.replay(&mut cx).await?;
		}
		Ok(())
	}

	/// Replays the edits of the most recent insert session `repetitions`
	/// times.
	///
	/// Only the entries between entering insert mode and returning to normal
	/// mode are replayed; the two transitions are not. A session without
	/// edits replays nothing.
	pub async fn repeat_edit(&self, cx: &mut ReplayContext<'_>, repetitions: usize) -> Result<(), ReplayError> {
		let history = &self.config.history;
		let span = EditSpan::find(self.recorder.log(), &history.normal_mode, &history.insert_mode)?;
		let repetitions = effective_repetitions(repetitions);
		debug!(
			start = span.start().position(),
			end = span.end().position(),
			repetitions,
			"repeating edit"
		);

		let mut cx = cx.suppress_recording();
		for completed in 0..repetitions {
			ensure_not_cancelled(&cx, completed)?;
			span.replay(&mut cx).await?;
		}
		Ok(())
	}
}

//! The session: one explicitly owned bundle of history state.
//!
//! A [`Session`] owns the [`Recorder`] (and through it the history log and the
//! active-recording map), the [`Registers`] and the configuration. Hosts
//! route live commands and mode changes through [`Session::execute`] and
//! [`Session::change_mode`] so they are logged, and call the replay
//! operations (`repeat`, `repeat_edit`, `recording_*`) in response to user
//! input.
//!
//! # Recording policy
//!
//! Whether something is appended is decided per invocation: the context must
//! have [`RecordPolicy::Record`](xeno_history::RecordPolicy) and the
//! descriptor must be recordable. Replays always run under a suppressed
//! child context, so nothing executed during a replay (including nested
//! [`Session::execute_batch`] calls) reaches the log.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};
use xeno_history::{CommandDescriptor, CommandResult, Mode, Recorder, ReplayContext};

use crate::config::SessionConfig;
use crate::error::ReplayError;
use crate::register::Registers;

mod recording;
mod repeat;


/// History, registers and configuration of one editor process.
#[derive(Debug)]
pub struct Session {
	config: SessionConfig,
	recorder: Recorder,
	registers: Registers,
	/// Register last recorded into or played, for `@@`-style playback.
	last_register: Option<char>,
}

impl Default for Session {
	fn default() -> Self {
		Self::new(SessionConfig::default())
	}
}

impl Session {
	/// Creates a session with the default register set.
	pub fn new(config: SessionConfig) -> Self {
		Self::with_registers(config, Registers::default())
	}

	pub fn with_registers(config: SessionConfig, registers: Registers) -> Self {
		Self {
			recorder: Recorder::new(&config.history),
			config,
			registers,
			last_register: None,
		}
	}

	pub fn config(&self) -> &SessionConfig {
		&self.config
	}

	/// Returns the recorder. Clones of it append to the same log, which lets
	/// live input be recorded while a replay is suspended.
	pub fn recorder(&self) -> &Recorder {
		&self.recorder
	}

	pub fn registers(&self) -> &Registers {
		&self.registers
	}

	pub fn registers_mut(&mut self) -> &mut Registers {
		&mut self.registers
	}

	pub fn last_register(&self) -> Option<char> {
		self.last_register
	}

	/// Runs a live command, appending it to the history first.
	///
	/// The entry is appended before the command runs so the log keeps
	/// invocation order even when the command awaits.
	pub async fn execute(&self, cx: &mut ReplayContext<'_>, descriptor: Arc<dyn CommandDescriptor>, argument: Value) -> CommandResult {
		if cx.should_record() && descriptor.is_recordable() {
			self.recorder.record_command(descriptor.clone(), argument.clone());
		} else {
			trace!(command = descriptor.identifier(), "command not recorded");
		}
		descriptor.replay(cx, &argument).await
	}

	/// Runs several commands in order against one context.
	///
	/// Cancellation is checked between commands. The batch inherits the
	/// context's record policy.
	pub async fn execute_batch<I>(&self, cx: &mut ReplayContext<'_>, batch: I) -> Result<(), ReplayError>
	where
		I: IntoIterator<Item = (Arc<dyn CommandDescriptor>, Value)>,
	{
		for (completed, (descriptor, argument)) in batch.into_iter().enumerate() {
			ensure_not_cancelled(cx, completed)?;
			self.execute(cx, descriptor, argument).await?;
		}
		Ok(())
	}

	/// Switches the editor mode, appending the transition to the history.
	pub async fn change_mode(&self, cx: &mut ReplayContext<'_>, mode: Mode) -> CommandResult {
		if cx.should_record() {
			self.recorder.record_mode_change(mode.clone());
		}
		cx.editor.set_mode(&mode).await
	}

	/// Appends a marker for a buffer change made outside of recorded
	/// commands. Backward searches stop at it.
	pub fn mark_external_change(&self) -> u64 {
		self.recorder.record_external_change()
	}
}

/// A count of 0 means no count was given.
fn effective_repetitions(repetitions: usize) -> usize {
	repetitions.max(1)
}

fn ensure_not_cancelled(cx: &ReplayContext<'_>, completed: usize) -> Result<(), ReplayError> {
	if cx.is_cancelled() {
		debug!(completed, "replay cancelled");
		return Err(ReplayError::Cancelled { completed });
	}
	Ok(())
}

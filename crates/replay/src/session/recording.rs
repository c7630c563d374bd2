use tracing::debug;
use xeno_history::{Recording, ReplayContext};

use super::{Session, effective_repetitions, ensure_not_cancelled};
use crate::error::ReplayError;

impl Session {
	/// Starts recording appended entries into `register`.
	pub fn recording_start(&mut self, register: char) -> Result<(), ReplayError> {
		self.registers.check_macros(register)?;
		self.recorder.start_recording(register)?;
		Ok(())
	}

	/// Stops the recording for `register` and stores it there, replacing any
	/// previous recording.
	///
	/// The register is validated first; on failure the recording stays active.
	pub fn recording_stop(&mut self, register: char) -> Result<Recording, ReplayError> {
		self.registers.check_macros(register)?;
		let recording = self.recorder.stop_recording(register)?;
		self.registers.get_mut(register)?.set_recording(recording.clone())?;
		self.last_register = Some(register);
		Ok(recording)
	}

	/// Returns true if `register` is currently recording.
	pub fn is_recording(&self, register: char) -> bool {
		self.recorder.is_recording(register)
	}

	/// Replays the recording held by `register` `repetitions` times.
	///
	/// Without a register, the register last recorded into or played is
	/// used, falling back to the configured default register.
	pub async fn recording_play(&mut self, cx: &mut ReplayContext<'_>, repetitions: usize, register: Option<char>) -> Result<(), ReplayError> {
		let register = register.or(self.last_register).unwrap_or(self.config.default_register);
		let recording = self
			.registers
			.get(register)?
			.get_recording()?
			.cloned()
			.ok_or(ReplayError::NoRecording(register))?;
		self.last_register = Some(register);

		let repetitions = effective_repetitions(repetitions);
		debug!(register = %register, entries = recording.len(), repetitions, "playing recording");

		let mut cx = cx.suppress_recording();
		for completed in 0..repetitions {
			ensure_not_cancelled(&cx, completed)?;
			recording.replay(&mut cx).await?;
		}
		Ok(())
	}
}

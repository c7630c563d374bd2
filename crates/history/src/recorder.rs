//! Recorder: the single writer of the history log.
//!
//! Besides appending to the main log, the recorder tracks one active macro
//! recording per register. Every appended entry is also pushed to each active
//! recording's sub-log, so a recording survives eviction from the main log.
//! A sub-log holds at most as many entries as the main log; once full, later
//! entries are left out of that recording.

use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::debug;

use crate::config::HistoryConfig;
use crate::context::{CommandDescriptor, ReplayContext};
use crate::cursor::Cursor;
use crate::entry::{Entry, Mode};
use crate::error::HistoryError;
use crate::log::HistoryLog;

/// An immutable, ordered sequence of entries captured by one macro recording.
#[derive(Debug, Clone, Default)]
pub struct Recording {
	entries: Arc<[Entry]>,
}

impl Recording {
	pub fn new(entries: impl Into<Arc<[Entry]>>) -> Self {
		Self { entries: entries.into() }
	}

	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Replays every entry once, in recorded order.
	pub async fn replay(&self, cx: &mut ReplayContext<'_>) -> Result<(), HistoryError> {
		for entry in self.entries.iter() {
			entry.replay(cx).await?;
		}
		Ok(())
	}
}

/// Sub-log of a recording in progress.
#[derive(Debug, Default)]
struct ActiveRecording {
	entries: Vec<Entry>,
	/// Entries left out after the sub-log filled up.
	dropped: usize,
}

/// Shared handle that appends to the history log and any active recordings.
///
/// Clones refer to the same recorder.
#[derive(Debug, Clone)]
pub struct Recorder {
	log: HistoryLog,
	active: Arc<Mutex<FxHashMap<char, ActiveRecording>>>,
	recording_capacity: NonZeroUsize,
}

impl Recorder {
	pub fn new(config: &HistoryConfig) -> Self {
		Self {
			log: HistoryLog::new(config.capacity),
			active: Arc::default(),
			recording_capacity: config.capacity,
		}
	}

	pub fn log(&self) -> &HistoryLog {
		&self.log
	}

	/// Appends `entry` to the log and to every active recording.
	///
	/// Returns the ordinal assigned in the main log.
	pub fn append(&self, entry: Entry) -> u64 {
		{
			let mut active = self.active.lock();
			for (register, recording) in active.iter_mut() {
				if recording.entries.len() < self.recording_capacity.get() {
					recording.entries.push(entry.clone());
					continue;
				}
				if recording.dropped == 0 {
					debug!(register = %register, capacity = self.recording_capacity.get(), "recording full, dropping further entries");
				}
				recording.dropped += 1;
			}
		}
		self.log.append(entry)
	}

	/// Records a command invocation with its argument.
	pub fn record_command(&self, descriptor: Arc<dyn CommandDescriptor>, argument: Value) -> u64 {
		self.append(Entry::command(descriptor, argument))
	}

	/// Records a mode transition.
	pub fn record_mode_change(&self, mode: Mode) -> u64 {
		self.append(Entry::ChangeMode(mode))
	}

	/// Records a buffer change made outside of any recorded command.
	pub fn record_external_change(&self) -> u64 {
		self.append(Entry::ExternalChange)
	}

	/// Returns a cursor one past the newest entry.
	pub fn cursor_from_end(&self) -> Cursor {
		self.log.cursor_from_end()
	}

	/// Starts capturing appended entries for `register`.
	pub fn start_recording(&self, register: char) -> Result<(), HistoryError> {
		let mut active = self.active.lock();
		if active.contains_key(&register) {
			return Err(HistoryError::RecordingActive(register));
		}
		active.insert(register, ActiveRecording::default());
		debug!(register = %register, "recording started");
		Ok(())
	}

	/// Stops the recording for `register` and seals what it captured.
	pub fn stop_recording(&self, register: char) -> Result<Recording, HistoryError> {
		let recording = self
			.active
			.lock()
			.remove(&register)
			.ok_or(HistoryError::NoActiveRecording(register))?;
		debug!(
			register = %register,
			entries = recording.entries.len(),
			dropped = recording.dropped,
			"recording stopped"
		);
		Ok(Recording::new(recording.entries))
	}

	/// Returns true if `register` has a recording in progress.
	pub fn is_recording(&self, register: char) -> bool {
		self.active.lock().contains_key(&register)
	}

	/// Registers with a recording in progress, sorted.
	pub fn active_registers(&self) -> Vec<char> {
		let mut registers: Vec<char> = self.active.lock().keys().copied().collect();
		registers.sort_unstable();
		registers
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::{Probe, config_with_capacity};

	#[test]
	fn append_feeds_active_recordings_only() {
		let recorder = Recorder::new(&HistoryConfig::default());
		let probe = Probe::new("select-word");

		recorder.record_command(probe.descriptor(), Value::Null);
		recorder.start_recording('q').unwrap();
		recorder.record_mode_change(Mode::Insert);
		recorder.record_command(probe.descriptor(), Value::from(3));
		let recording = recorder.stop_recording('q').unwrap();
		recorder.record_mode_change(Mode::Normal);

		assert_eq!(recorder.log().len(), 4);
		assert_eq!(recording.len(), 2);
		assert!(matches!(recording.entries()[0], Entry::ChangeMode(Mode::Insert)));
		match &recording.entries()[1] {
			Entry::ExecuteCommand(cmd) => assert_eq!(cmd.argument(), &Value::from(3)),
			other => panic!("unexpected entry {other:?}"),
		}
	}

	#[test]
	fn one_recording_per_register() {
		let recorder = Recorder::new(&HistoryConfig::default());

		recorder.start_recording('a').unwrap();
		assert_eq!(recorder.start_recording('a'), Err(HistoryError::RecordingActive('a')));
		recorder.start_recording('b').unwrap();
		assert_eq!(recorder.active_registers(), vec!['a', 'b']);

		recorder.record_external_change();
		assert_eq!(recorder.stop_recording('a').unwrap().len(), 1);
		assert!(!recorder.is_recording('a'));
		assert!(recorder.is_recording('b'));
		assert_eq!(recorder.stop_recording('a').unwrap_err(), HistoryError::NoActiveRecording('a'));
	}

	fn arguments(recording: &Recording) -> Vec<Value> {
		recording
			.entries()
			.iter()
			.filter_map(|entry| match entry {
				Entry::ExecuteCommand(cmd) => Some(cmd.argument().clone()),
				_ => None,
			})
			.collect()
	}

	#[test]
	fn recording_outlives_eviction() {
		let recorder = Recorder::new(&config_with_capacity(3));
		let probe = Probe::new("insert-char");

		recorder.start_recording('q').unwrap();
		for i in 0..3 {
			recorder.record_command(probe.descriptor(), Value::from(i));
		}
		let recording = recorder.stop_recording('q').unwrap();
		for i in 3..6 {
			recorder.record_command(probe.descriptor(), Value::from(i));
		}

		assert_eq!(recorder.log().bounds(), 3..6);
		assert_eq!(arguments(&recording), vec![Value::from(0), Value::from(1), Value::from(2)]);
	}

	#[test]
	fn recording_is_capped_at_log_capacity() {
		let recorder = Recorder::new(&config_with_capacity(2));
		let probe = Probe::new("insert-char");

		recorder.start_recording('q').unwrap();
		for i in 0..5 {
			recorder.record_command(probe.descriptor(), Value::from(i));
		}
		assert!(recorder.is_recording('q'));
		let recording = recorder.stop_recording('q').unwrap();

		assert_eq!(recorder.log().len(), 2);
		assert_eq!(arguments(&recording), vec![Value::from(0), Value::from(1)]);
	}
}

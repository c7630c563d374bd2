//! Fixtures shared by the unit tests of this crate.

use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::config::HistoryConfig;
use crate::context::{BoxFutureLocal, CommandDescriptor, EditorOps, ReplayContext};
use crate::entry::Mode;
use crate::error::{CommandError, CommandResult};

pub fn config_with_capacity(capacity: usize) -> HistoryConfig {
	HistoryConfig {
		capacity: NonZeroUsize::new(capacity).unwrap(),
		..HistoryConfig::default()
	}
}

/// Something that happened to the fake editor, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
	Command(String, Value),
	Mode(Mode),
}

pub type Journal = Arc<Mutex<Vec<Event>>>;

/// Editor double that journals mode changes.
#[derive(Debug)]
pub struct FakeEditor {
	pub mode: Mode,
	pub journal: Journal,
}

impl FakeEditor {
	pub fn new() -> Self {
		Self {
			mode: Mode::Normal,
			journal: Journal::default(),
		}
	}

	pub fn context(&mut self) -> ReplayContext<'_> {
		ReplayContext::new(self, CancellationToken::new())
	}
}

impl EditorOps for FakeEditor {
	fn mode(&self) -> Mode {
		self.mode.clone()
	}

	fn set_mode<'a>(&'a mut self, mode: &'a Mode) -> BoxFutureLocal<'a, CommandResult> {
		Box::pin(async move {
			self.mode = mode.clone();
			self.journal.lock().push(Event::Mode(mode.clone()));
			Ok(())
		})
	}
}

/// Command double that journals every invocation into a shared journal.
#[derive(Debug, Clone)]
pub struct Probe {
	pub identifier: &'static str,
	pub replayable: bool,
	pub fail: bool,
	pub journal: Journal,
}

impl Probe {
	pub fn new(identifier: &'static str) -> Self {
		Self {
			identifier,
			replayable: true,
			fail: false,
			journal: Journal::default(),
		}
	}

	pub fn with_journal(identifier: &'static str, journal: &Journal) -> Self {
		Self {
			journal: journal.clone(),
			..Self::new(identifier)
		}
	}

	pub fn descriptor(&self) -> Arc<dyn CommandDescriptor> {
		Arc::new(self.clone())
	}
}

impl CommandDescriptor for Probe {
	fn identifier(&self) -> &str {
		self.identifier
	}

	fn should_be_replayed(&self) -> bool {
		self.replayable
	}

	fn replay<'a>(&'a self, _cx: &'a mut ReplayContext<'_>, argument: &'a Value) -> BoxFutureLocal<'a, CommandResult> {
		Box::pin(async move {
			if self.fail {
				return Err(CommandError::Failed(format!("{} failed", self.identifier)));
			}
			self.journal.lock().push(Event::Command(self.identifier.to_string(), argument.clone()));
			Ok(())
		})
	}
}

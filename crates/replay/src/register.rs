//! Register collaborator: named slots that may hold a macro recording.
//!
//! Only the recording side of registers is modeled here. Each register
//! carries capability flags; reading or writing a recording requires
//! [`RegisterFlags::MACROS`].

use rustc_hash::FxHashMap;
use xeno_history::Recording;

use crate::error::ReplayError;

bitflags::bitflags! {
	/// What a register may be used for.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct RegisterFlags: u8 {
		const READ_TEXT = 1 << 0;
		const WRITE_TEXT = 1 << 1;
		/// May hold a macro recording.
		const MACROS = 1 << 2;
	}
}

/// A named register.
#[derive(Debug, Clone)]
pub struct Register {
	name: char,
	flags: RegisterFlags,
	recording: Option<Recording>,
}

impl Register {
	pub fn new(name: char, flags: RegisterFlags) -> Self {
		Self {
			name,
			flags,
			recording: None,
		}
	}

	pub fn name(&self) -> char {
		self.name
	}

	pub fn flags(&self) -> RegisterFlags {
		self.flags
	}

	/// Returns the stored recording, if any.
	pub fn get_recording(&self) -> Result<Option<&Recording>, ReplayError> {
		self.ensure_macros()?;
		Ok(self.recording.as_ref())
	}

	/// Stores `recording`, replacing any previous one.
	pub fn set_recording(&mut self, recording: Recording) -> Result<(), ReplayError> {
		self.ensure_macros()?;
		self.recording = Some(recording);
		Ok(())
	}

	fn ensure_macros(&self) -> Result<(), ReplayError> {
		if self.flags.contains(RegisterFlags::MACROS) {
			Ok(())
		} else {
			Err(ReplayError::MacrosUnsupported(self.name))
		}
	}
}

/// The set of registers known to a session.
#[derive(Debug, Clone)]
pub struct Registers {
	registers: FxHashMap<char, Register>,
}

impl Default for Registers {
	/// `a`-`z` and `@` are general purpose; `%` (buffer name) and `.` (last
	/// inserted text) are read-only text registers.
	fn default() -> Self {
		let mut registers = Self::empty();
		for name in ('a'..='z').chain(['@']) {
			registers.insert(Register::new(name, RegisterFlags::all()));
		}
		for name in ['%', '.'] {
			registers.insert(Register::new(name, RegisterFlags::READ_TEXT));
		}
		registers
	}
}

impl Registers {
	/// Creates a set with no registers.
	pub fn empty() -> Self {
		Self {
			registers: FxHashMap::default(),
		}
	}

	/// Adds or replaces a register.
	pub fn insert(&mut self, register: Register) {
		self.registers.insert(register.name, register);
	}

	pub fn get(&self, name: char) -> Result<&Register, ReplayError> {
		self.registers.get(&name).ok_or(ReplayError::UnknownRegister(name))
	}

	pub fn get_mut(&mut self, name: char) -> Result<&mut Register, ReplayError> {
		self.registers.get_mut(&name).ok_or(ReplayError::UnknownRegister(name))
	}

	/// Fails unless `name` exists and can hold recordings.
	pub fn check_macros(&self, name: char) -> Result<(), ReplayError> {
		self.get(name)?.ensure_macros()
	}
}

#[cfg(test)]
mod tests {
	use xeno_history::{Entry, Mode};

	use super::*;

	#[test]
	fn default_capabilities() {
		let registers = Registers::default();
		assert!(registers.check_macros('q').is_ok());
		assert!(registers.check_macros('@').is_ok());
		assert_eq!(registers.check_macros('%'), Err(ReplayError::MacrosUnsupported('%')));
		assert_eq!(registers.check_macros('!'), Err(ReplayError::UnknownRegister('!')));
		assert_eq!(registers.get('.').unwrap().flags(), RegisterFlags::READ_TEXT);
	}

	#[test]
	fn set_recording_replaces_previous() {
		let mut registers = Registers::default();
		let register = registers.get_mut('q').unwrap();
		assert!(register.get_recording().unwrap().is_none());

		register.set_recording(Recording::new(vec![Entry::mode(Mode::Insert)])).unwrap();
		register.set_recording(Recording::new(vec![Entry::ExternalChange, Entry::ExternalChange])).unwrap();
		assert_eq!(register.get_recording().unwrap().map(Recording::len), Some(2));
	}

	#[test]
	fn read_only_register_refuses_recordings() {
		let mut registers = Registers::default();
		let register = registers.get_mut('%').unwrap();
		assert_eq!(register.set_recording(Recording::default()), Err(ReplayError::MacrosUnsupported('%')));
		assert!(register.get_recording().is_err());
	}
}

//! Replay engine over the command history.
//!
//! Provides the user-facing history operations of modal editing on top of
//! [`xeno_history`]:
//!
//! * [`Session::repeat`]: re-run the last command matching a filter.
//! * [`Session::repeat_edit`]: re-run the last insert session.
//! * [`Session::recording_start`], [`Session::recording_stop`] and
//!   [`Session::recording_play`]: macros bound to registers.

pub mod config;
pub mod error;
pub mod register;
pub mod session;

pub use config::SessionConfig;
pub use error::{ConfigError, ReplayError};
pub use register::{Register, RegisterFlags, Registers};
pub use session::Session;
pub use xeno_history;

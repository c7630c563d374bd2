use regex::Regex;
use serde::Deserialize;
use xeno_history::HistoryConfig;

use crate::error::ConfigError;

/// Register used by `recording_play` when none was given and nothing was
/// played or recorded yet.
pub const DEFAULT_REGISTER: char = '@';

/// Filter used by `repeat` when the caller passes none: any command.
pub const DEFAULT_REPEAT_FILTER: &str = ".+";

/// Session configuration.
///
/// ```toml
/// default-register = "q"
/// repeat-filter = "^(select|delete)"
///
/// [history]
/// capacity = 1024
/// normal-mode = "normal"
/// insert-mode = "insert"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SessionConfig {
	pub history: HistoryConfig,
	pub default_register: char,
	pub repeat_filter: String,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			history: HistoryConfig::default(),
			default_register: DEFAULT_REGISTER,
			repeat_filter: DEFAULT_REPEAT_FILTER.to_string(),
		}
	}
}

impl SessionConfig {
	/// Parses a TOML document. Missing keys take their defaults.
	pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(source)?;
		Regex::new(&config.repeat_filter)?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use xeno_history::Mode;

	use super::*;

	#[test]
	fn empty_document_is_default() {
		assert_eq!(SessionConfig::from_toml("").unwrap(), SessionConfig::default());
	}

	#[test]
	fn nested_history_table() {
		let config = SessionConfig::from_toml(
			r#"
			default-register = "q"

			[history]
			capacity = 8
			normal-mode = "command"
			"#,
		)
		.unwrap();
		assert_eq!(config.default_register, 'q');
		assert_eq!(config.repeat_filter, DEFAULT_REPEAT_FILTER);
		assert_eq!(config.history.capacity.get(), 8);
		assert_eq!(config.history.normal_mode, Mode::Named("command".into()));
		assert_eq!(config.history.insert_mode, Mode::Insert);
	}

	#[test]
	fn invalid_filter_is_rejected() {
		let err = SessionConfig::from_toml(r#"repeat-filter = "(""#).unwrap_err();
		assert!(matches!(err, ConfigError::Filter(_)));
	}

	#[test]
	fn unknown_key_is_rejected() {
		let err = SessionConfig::from_toml("history-size = 3").unwrap_err();
		assert!(matches!(err, ConfigError::Toml(_)));
	}
}

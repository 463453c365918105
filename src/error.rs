use std::path::PathBuf;

/// Library-level structured errors for revolver.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum RevolverError {
	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to resolve config directory")]
	ConfigDirectoryNotFound,

	#[error("no files specified")]
	NoFiles,

	#[error("files cannot have different types: {file}")]
	InconsistentFileTypes { file: String },

	#[error("Rule requests a terminal but ${var} is not set")]
	TerminalUnset { var: &'static str },

	#[error("Invalid terminal launcher in ${var}: {value}")]
	InvalidTerminal {
		var: &'static str,
		value: String,
		#[source]
		source: shell_words::ParseError,
	},

	#[error("Command not found: {command}")]
	CommandNotFound { command: String },

	#[error("Command execution failed: {command}")]
	LaunchFailed {
		command: String,
		#[source]
		source: std::io::Error,
	},
}

/// Result type alias using RevolverError.
pub type Result<T> = std::result::Result<T, RevolverError>;

use serde::Deserialize;

/// Top-level configuration from a `revolver.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// Methods for opening files, in priority order.
	/// First matching rule wins.
	#[serde(default)]
	pub rules: Vec<Rule>,
}

/// A method for opening a file type and the conditions it matches on.
///
/// File conditions (`mime`, `ext`, `name`) are evaluated as a union: any one
/// of them matching is enough. System conditions (`has`) are evaluated as an
/// intersection and checked first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Rule {
	/// Optional label shown by `--list`.
	#[serde(default)]
	pub label: String,

	/// Regex matched against the sniffed MIME type of the file.
	pub mime: Option<String>,

	/// Regex matched against the dotted extension, e.g. `.txt`.
	pub ext: Option<String>,

	/// Regex matched against the final path component.
	pub name: Option<String>,

	/// Program that must be on `$PATH` for this rule to apply.
	pub has: Option<String>,

	/// Detach the command and don't wait for it.
	#[serde(default)]
	pub fork: bool,

	/// Run the command inside a new terminal (`$TERMCMD`).
	#[serde(default)]
	pub term: bool,

	/// Command run in `${SHELL:-/bin/sh}`; files are available as `$@`.
	pub cmd: String,
}

impl Rule {
	/// Whether any file condition is configured.
	pub fn has_file_condition(&self) -> bool {
		self.mime.is_some() || self.ext.is_some() || self.name.is_some()
	}
}

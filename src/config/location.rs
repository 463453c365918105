use crate::error::{Result, RevolverError};
use std::path::PathBuf;

const CONFIG_DIR_NAME: &str = "revolver";
const CONFIG_FILE_NAME: &str = "revolver.toml";

/// Get the path to the user's config file.
///
/// This is `$XDG_CONFIG_HOME/revolver/revolver.toml` on Linux, falling back
/// to `~/.config` when the variable is unset.
pub fn default_config_path() -> Result<PathBuf> {
	let config_dir = dirs::config_dir().ok_or(RevolverError::ConfigDirectoryNotFound)?;
	Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Generate a starter config for `--init`.
pub fn generate_init_template() -> String {
	r#"# revolver configuration
#
# Rules are tried in order and the first match wins (`-p N` picks the Nth).
# A rule matches a file when `has` (if set) is on $PATH and at least one of
# `mime`, `ext` or `name` matches. All three are regular expressions:
#   mime - sniffed content type, e.g. "^image/"
#   ext  - extension including the dot, e.g. '\.pdf$'
#   name - final path component, e.g. '^Makefile$'
#
# `cmd` runs in ${SHELL:-/bin/sh} with the files as "$@".
# `fork = true` detaches the command; `term = true` runs it in $TERMCMD.

[[rules]]
label = "pdf"
ext = '\.pdf$'
has = "zathura"
fork = true
cmd = 'zathura -- "$@"'

[[rules]]
label = "image"
mime = "^image/"
has = "feh"
fork = true
cmd = 'feh -- "$@"'

[[rules]]
label = "text"
mime = "^text/"
name = '^(Makefile|Dockerfile|README)$'
cmd = '${EDITOR:-vi} -- "$@"'
"#
	.to_string()
}

//! Shell command line construction.

/// Quote a string as a single shell word.
///
/// Everything is wrapped in single quotes; embedded single quotes close the
/// quoted section, emit an escaped quote and reopen it (`'` becomes `'\''`).
pub fn shell_quote(word: &str) -> String {
	let mut quoted = String::with_capacity(word.len() + 2);
	quoted.push('\'');
	quoted.push_str(&word.replace('\'', r"'\''"));
	quoted.push('\'');
	quoted
}

/// Build the line passed to `$SHELL -c`.
///
/// Files become the positional parameters of `template` through `set --`, so
/// the template can use `$1`, `"$@"` and friends. Files containing a NUL byte
/// are dropped.
pub fn build_command<S: AsRef<str>>(template: &str, files: &[S]) -> String {
	let mut line = String::from("set --");
	for file in files.iter().map(AsRef::as_ref) {
		if file.contains('\0') {
			continue;
		}
		line.push(' ');
		line.push_str(&shell_quote(file));
	}
	line.push_str("; ");
	line.push_str(template);
	line
}

use crate::config::types::{Config, Rule};
use crate::error::{Result, RevolverError};
use crate::rules::oracle::Oracle;
use crate::rules::pattern::{Pattern, compile_regex};
use std::fmt;
use std::path::Path;
use tracing::{debug, trace, warn};

/// A compiled rule ready for matching.
#[derive(Debug)]
pub struct CompiledRule {
	/// Label shown when listing matches.
	pub label: String,

	/// Pattern for the sniffed MIME type.
	pub mime: Option<Box<dyn Pattern>>,

	/// Pattern for the dotted extension.
	pub ext: Option<Box<dyn Pattern>>,

	/// Pattern for the final path component.
	pub name: Option<Box<dyn Pattern>>,

	/// Program that must be on `$PATH`.
	pub has: Option<String>,

	/// Detach instead of waiting.
	pub fork: bool,

	/// Launch inside a new terminal.
	pub term: bool,

	/// Shell snippet run against the files.
	pub cmd: String,
}

impl CompiledRule {
	/// Compile a rule from its configured form.
	pub fn compile(rule: &Rule) -> Result<Self> {
		let compile = |p: &Option<String>| p.as_deref().map(compile_regex).transpose();

		Ok(CompiledRule {
			label: rule.label.clone(),
			mime: compile(&rule.mime)?,
			ext: compile(&rule.ext)?,
			name: compile(&rule.name)?,
			has: rule.has.clone(),
			fork: rule.fork,
			term: rule.term,
			cmd: rule.cmd.clone(),
		})
	}

	/// Whether any file condition is set. Rules without one never match.
	pub fn has_file_condition(&self) -> bool {
		self.mime.is_some() || self.ext.is_some() || self.name.is_some()
	}

	/// Check if this rule can open the given file.
	pub fn matches(&self, file: &str, oracle: &dyn Oracle) -> bool {
		// System conditions are an intersection and gate everything else
		if let Some(ref program) = self.has
			&& !oracle.has_executable(program)
		{
			trace!(rule = %self.label, program, "required program not found");
			return false;
		}

		// File conditions are a union, tried in priority order
		if let Some(ref pattern) = self.mime {
			match oracle.sniff_mime(Path::new(file)) {
				Ok(mime) if pattern.is_match(&mime) => return true,
				Ok(_) => {}
				Err(e) => debug!(file, error = %e, "failed to sniff content type"),
			}
		}

		if let Some(ref pattern) = self.ext
			&& pattern.is_match(dotted_extension(file))
		{
			return true;
		}

		if let Some(ref pattern) = self.name
			&& pattern.is_match(basename(file))
		{
			return true;
		}

		false
	}

	/// Flag letters for listing: `f` for fork, `t` for term.
	pub fn flags(&self) -> String {
		let mut flags = String::new();
		if self.fork {
			flags.push('f');
		}
		if self.term {
			flags.push('t');
		}
		flags
	}
}

impl fmt::Display for CompiledRule {
	/// Formats as `label:flags:cmd`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}", self.label, self.flags(), self.cmd)
	}
}

/// The final path component, ignoring trailing separators.
///
/// An empty path gives `.`, a path of only separators gives `/`.
fn basename(file: &str) -> &str {
	if file.is_empty() {
		return ".";
	}
	let trimmed = file.trim_end_matches('/');
	if trimmed.is_empty() {
		return "/";
	}
	match trimmed.rfind('/') {
		Some(i) => &trimmed[i + 1..],
		None => trimmed,
	}
}

/// The extension of the final path component including its dot.
///
/// `report.tar.gz` gives `.gz`, `.bashrc` gives `.bashrc` and a name with no
/// dot gives the empty string.
fn dotted_extension(file: &str) -> &str {
	let last = match file.rfind('/') {
		Some(i) => &file[i + 1..],
		None => file,
	};
	match last.rfind('.') {
		Some(i) => &last[i..],
		None => "",
	}
}

/// A rule chosen for a file, with its position among all matches.
#[derive(Debug, Clone, Copy)]
pub struct MatchSelection<'a> {
	/// The matching rule.
	pub rule: &'a CompiledRule,

	/// Zero-based ordinal among the rules matching the file.
	pub ordinal: usize,
}

/// All configured rules in priority order.
#[derive(Debug, Default)]
pub struct RuleSet {
	rules: Vec<CompiledRule>,
}

impl RuleSet {
	/// Compile every rule in a config.
	pub fn compile(config: &Config) -> Result<Self> {
		let rules = config
			.rules
			.iter()
			.map(CompiledRule::compile)
			.collect::<Result<Vec<_>>>()?;

		for (i, rule) in rules.iter().enumerate() {
			if !rule.has_file_condition() {
				warn!(index = i, label = %rule.label, "rule has no mime, ext or name condition and will never match");
			}
		}

		Ok(RuleSet { rules })
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// Find the nth (zero-based) rule matching a file.
	pub fn match_nth<'a>(
		&'a self,
		file: &str,
		n: usize,
		oracle: &dyn Oracle,
	) -> Option<MatchSelection<'a>> {
		self.rules
			.iter()
			.filter(|rule| rule.matches(file, oracle))
			.nth(n)
			.map(|rule| MatchSelection { rule, ordinal: n })
	}

	/// Find every rule matching a file, in configuration order.
	pub fn match_all<'a>(&'a self, file: &str, oracle: &dyn Oracle) -> Vec<MatchSelection<'a>> {
		self.rules
			.iter()
			.filter(|rule| rule.matches(file, oracle))
			.enumerate()
			.map(|(ordinal, rule)| MatchSelection { rule, ordinal })
			.collect()
	}

	/// Select the nth rule for the first file and check that it can open the
	/// rest of them too.
	///
	/// Returns `Ok(None)` when nothing matches the first file.
	pub fn select<'a>(
		&'a self,
		files: &[String],
		n: usize,
		oracle: &dyn Oracle,
	) -> Result<Option<MatchSelection<'a>>> {
		let (first, rest) = files.split_first().ok_or(RevolverError::NoFiles)?;

		let Some(selection) = self.match_nth(first, n, oracle) else {
			debug!(file = %first, n, "no matching rule");
			return Ok(None);
		};

		check_consistent(rest, &[selection], oracle)?;

		debug!(file = %first, ordinal = selection.ordinal, rule = %selection.rule, "selected rule");
		Ok(Some(selection))
	}

	/// Find every rule for the first file, requiring each of them to match the
	/// rest of the files as well.
	///
	/// A rule that fails on a later file aborts the whole listing instead of
	/// being dropped from it.
	pub fn select_all<'a>(
		&'a self,
		files: &[String],
		oracle: &dyn Oracle,
	) -> Result<Vec<MatchSelection<'a>>> {
		let (first, rest) = files.split_first().ok_or(RevolverError::NoFiles)?;

		let selections = self.match_all(first, oracle);
		check_consistent(rest, &selections, oracle)?;

		Ok(selections)
	}
}

/// Every file must be openable by every selected rule.
fn check_consistent(files: &[String], selections: &[MatchSelection], oracle: &dyn Oracle) -> Result<()> {
	for file in files {
		for selection in selections {
			if !selection.rule.matches(file, oracle) {
				return Err(RevolverError::InconsistentFileTypes { file: file.clone() });
			}
		}
	}
	Ok(())
}

use crate::error::{Result, RevolverError};
use regex::Regex;
use std::fmt;

/// A compiled string pattern a rule condition is tested with.
///
/// Matching only goes through this trait, so the regex engine can be swapped
/// without touching rule evaluation.
pub trait Pattern: fmt::Debug + Send + Sync {
	/// Whether the pattern matches anywhere in `haystack`.
	fn is_match(&self, haystack: &str) -> bool;

	/// The source text the pattern was compiled from.
	fn as_str(&self) -> &str;
}

impl Pattern for Regex {
	fn is_match(&self, haystack: &str) -> bool {
		Regex::is_match(self, haystack)
	}

	fn as_str(&self) -> &str {
		Regex::as_str(self)
	}
}

/// Compile a regex pattern string.
pub fn compile_regex(pattern: &str) -> Result<Box<dyn Pattern>> {
	let regex = Regex::new(pattern).map_err(|source| RevolverError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})?;
	Ok(Box::new(regex))
}

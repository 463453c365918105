//! Rule matching for revolver.
//!
//! This module handles:
//! - Compiling configured rules into patterns
//! - Matching files by content type, extension and basename
//! - Selecting the first, nth or all matching rules for a set of files

pub mod matcher;
pub mod oracle;
pub mod pattern;

pub use matcher::{CompiledRule, MatchSelection, RuleSet};
pub use oracle::{Oracle, SystemOracle};
pub use pattern::{Pattern, compile_regex};

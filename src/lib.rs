//! Revolver - open files with the first matching method from an ordered rule set.
//!
//! This library provides the core functionality for revolver, including:
//! - Configuration file parsing
//! - Rule matching on content type, extension and basename
//! - Safe shell command construction
//! - Launching in the foreground, detached, or in a new terminal
//!
//! # Example
//!
//! ```no_run
//! use revolver::config::{default_config_path, parse_config_file};
//! use revolver::exec::{LaunchEnv, dispatch};
//! use revolver::rules::{RuleSet, SystemOracle};
//!
//! let config = parse_config_file(&default_config_path().unwrap()).unwrap();
//! let rules = RuleSet::compile(&config).unwrap();
//!
//! let files = vec!["notes.txt".to_string()];
//! if let Some(selection) = rules.select(&files, 0, &SystemOracle).unwrap() {
//!     let outcome = dispatch(selection.rule, &files, &LaunchEnv::from_env()).unwrap();
//!     println!("exit code: {}", outcome.exit_code());
//! }
//! ```

pub mod config;
pub mod error;
pub mod exec;
pub mod rules;

pub use error::{Result, RevolverError};

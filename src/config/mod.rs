//! Configuration loading and parsing for revolver.
//!
//! This module handles:
//! - TOML config file parsing
//! - Default config location and the `--init` template

pub mod location;
pub mod parser;
pub mod types;

pub use location::{default_config_path, generate_init_template};
pub use parser::{parse_config_file, parse_config_str};
pub use types::{Config, Rule};

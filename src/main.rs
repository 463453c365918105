use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use revolver::config::{default_config_path, generate_init_template, parse_config_file};
use revolver::exec::{LaunchEnv, dispatch};
use revolver::rules::{RuleSet, SystemOracle};

/// Variable holding the log filter, e.g. `REVOLVER_LOG=debug`.
const LOG_ENV_VAR: &str = "REVOLVER_LOG";

#[derive(Parser)]
#[command(name = "revolver")]
#[command(
	author,
	version,
	about = "Open files with the first matching method from an ordered rule set"
)]
struct Cli {
	/// List matching methods instead of running one (format i:label:flags:cmd)
	#[arg(short, long)]
	list: bool,

	/// Which matching method to use, counting from 0
	#[arg(short, long, value_name = "N", default_value_t = 0)]
	pick: usize,

	/// Config file to use instead of the default location
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Write a template config file
	#[arg(long, conflicts_with_all = ["list", "pick", "files"])]
	init: bool,

	/// Overwrite an existing config file when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Files to open
	files: Vec<String>,
}

fn main() -> ExitCode {
	init_tracing();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	if !cli.init && cli.files.is_empty() {
		anyhow::bail!(revolver::RevolverError::NoFiles);
	}

	let config_path = match cli.config {
		Some(path) => path,
		None => default_config_path().context("Failed to locate config file")?,
	};

	if cli.init {
		return handle_init(&config_path, cli.force);
	}

	let config = parse_config_file(&config_path)
		.with_context(|| format!("Failed to load {}", config_path.display()))?;
	let rules = RuleSet::compile(&config).context("Failed to compile rules")?;
	debug!(config = %config_path.display(), rules = rules.len(), "loaded rules");

	if cli.list {
		return handle_list(&rules, &cli.files);
	}

	handle_open(&rules, &cli.files, cli.pick)
}

fn handle_init(config_path: &Path, force: bool) -> Result<ExitCode> {
	if config_path.exists() && !force {
		anyhow::bail!(
			"{} already exists. Use --force to overwrite.",
			config_path.display()
		);
	}

	if let Some(parent) = config_path.parent() {
		std::fs::create_dir_all(parent)
			.with_context(|| format!("Failed to create {}", parent.display()))?;
	}

	std::fs::write(config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {}", config_path.display());
	Ok(ExitCode::SUCCESS)
}

fn handle_list(rules: &RuleSet, files: &[String]) -> Result<ExitCode> {
	let matches = rules.select_all(files, &SystemOracle)?;

	for selection in matches {
		println!("{}:{}", selection.ordinal, selection.rule);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_open(rules: &RuleSet, files: &[String], pick: usize) -> Result<ExitCode> {
	let Some(selection) = rules.select(files, pick, &SystemOracle)? else {
		return Ok(ExitCode::SUCCESS);
	};

	let outcome = dispatch(selection.rule, files, &LaunchEnv::from_env())
		.with_context(|| format!("Failed to run command: {}", selection.rule.cmd))?;

	Ok(ExitCode::from(outcome.exit_code().clamp(0, 255) as u8))
}

//! Command execution for revolver.
//!
//! This module handles:
//! - Building the shell invocation for a rule
//! - Launching in the foreground, detached, or inside a new terminal
//! - Exit code propagation

pub mod command;
pub mod platform;

use crate::error::{Result, RevolverError};
use crate::rules::CompiledRule;
use command::build_command;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Shell used when `$SHELL` is unset or empty.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Variable naming the shell commands run in.
pub const SHELL_VAR: &str = "SHELL";

/// Variable naming the terminal launcher for `term` rules.
pub const TERMINAL_VAR: &str = "TERMCMD";

/// Whether the dispatcher waits for the launched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPolicy {
	/// Wait and propagate the exit code.
	Wait,
	/// Start in a new process group and return immediately.
	Detach,
}

impl WaitPolicy {
	pub fn for_rule(rule: &CompiledRule) -> Self {
		if rule.fork {
			WaitPolicy::Detach
		} else {
			WaitPolicy::Wait
		}
	}
}

/// What happened to a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	/// The command ran to completion with this exit code.
	Exited(i32),
	/// The command was started and left running.
	Detached { pid: u32 },
}

impl Outcome {
	/// The exit code revolver itself should report.
	pub fn exit_code(&self) -> i32 {
		match self {
			Outcome::Exited(code) => *code,
			Outcome::Detached { .. } => 0,
		}
	}
}

/// Environment the dispatcher launches commands with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchEnv {
	/// Interpreter for the command line.
	pub shell: String,

	/// Terminal launcher command, if configured.
	pub terminal: Option<String>,
}

impl LaunchEnv {
	/// Read `$SHELL` and `$TERMCMD`, ignoring empty values.
	pub fn from_env() -> Self {
		let non_empty = |var: &str| std::env::var(var).ok().filter(|v| !v.is_empty());

		LaunchEnv {
			shell: non_empty(SHELL_VAR).unwrap_or_else(|| DEFAULT_SHELL.to_string()),
			terminal: non_empty(TERMINAL_VAR),
		}
	}
}

impl Default for LaunchEnv {
	fn default() -> Self {
		LaunchEnv {
			shell: DEFAULT_SHELL.to_string(),
			terminal: None,
		}
	}
}

/// Build the process that opens `files` with `rule`, without starting it.
///
/// Terminal rules fail with [`RevolverError::TerminalUnset`] before anything
/// else is done when no launcher is configured.
pub fn build_process(rule: &CompiledRule, files: &[String], env: &LaunchEnv) -> Result<Command> {
	let launcher = if rule.term {
		Some(terminal_launcher(env)?)
	} else {
		None
	};

	let line = build_command(&rule.cmd, files);
	debug!(shell = %env.shell, %line, "built command line");

	let mut cmd = match launcher {
		Some(words) => {
			let (program, args) = words
				.split_first()
				.ok_or(RevolverError::TerminalUnset { var: TERMINAL_VAR })?;
			let mut cmd = Command::new(program);
			cmd.args(args).arg("-e").arg(&env.shell).arg("-c").arg(&line);
			cmd
		}
		None => {
			let mut cmd = Command::new(&env.shell);
			cmd.arg("-c").arg(&line);
			cmd
		}
	};

	if rule.fork {
		platform::detach(&mut cmd);
	}

	// A detached command only keeps stdio when a terminal provides it one
	if !rule.fork || rule.term {
		cmd.stdin(Stdio::inherit())
			.stdout(Stdio::inherit())
			.stderr(Stdio::inherit());
	} else {
		cmd.stdin(Stdio::null())
			.stdout(Stdio::null())
			.stderr(Stdio::null());
	}

	Ok(cmd)
}

/// Split the configured terminal launcher into words.
fn terminal_launcher(env: &LaunchEnv) -> Result<Vec<String>> {
	let value = env
		.terminal
		.as_deref()
		.ok_or(RevolverError::TerminalUnset { var: TERMINAL_VAR })?;

	let words = shell_words::split(value).map_err(|source| RevolverError::InvalidTerminal {
		var: TERMINAL_VAR,
		value: value.to_string(),
		source,
	})?;

	if words.is_empty() {
		return Err(RevolverError::TerminalUnset { var: TERMINAL_VAR });
	}
	Ok(words)
}

/// Open `files` with `rule`.
///
/// Forking rules are started in their own process group and not waited for.
/// Everything else runs to completion and its exit code is returned; a
/// non-zero exit is not an error.
pub fn dispatch(rule: &CompiledRule, files: &[String], env: &LaunchEnv) -> Result<Outcome> {
	let mut cmd = build_process(rule, files, env)?;
	let program = cmd.get_program().to_string_lossy().to_string();
	let policy = WaitPolicy::for_rule(rule);

	let map_err = |source: std::io::Error| {
		if source.kind() == std::io::ErrorKind::NotFound {
			RevolverError::CommandNotFound {
				command: program.clone(),
			}
		} else {
			RevolverError::LaunchFailed {
				command: program.clone(),
				source,
			}
		}
	};

	let mut child = cmd.spawn().map_err(map_err)?;
	info!(rule = %rule.label, pid = child.id(), ?policy, "launched");

	match policy {
		WaitPolicy::Detach => Ok(Outcome::Detached { pid: child.id() }),
		WaitPolicy::Wait => {
			let status = child.wait().map_err(map_err)?;
			let code = platform::exit_code(status);
			debug!(code, "command exited");
			Ok(Outcome::Exited(code))
		}
	}
}

//! Platform specific process detachment.
//!
//! On Unix a detached child gets its own process group so signals aimed at
//! the parent's group (e.g. Ctrl-C in the launching terminal) don't reach it.
//! Windows has no process groups in that sense; the closest equivalent is a
//! new console process group without an attached console.

use std::process::Command;

/// Configure `cmd` to run outside the caller's process group.
#[cfg(unix)]
pub fn detach(cmd: &mut Command) {
	use std::os::unix::process::CommandExt;

	cmd.process_group(0);
}

#[cfg(windows)]
pub fn detach(cmd: &mut Command) {
	use std::os::windows::process::CommandExt;

	const DETACHED_PROCESS: u32 = 0x0000_0008;
	const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

	cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

/// Targets without process groups or console groups run the child in the
/// caller's group; it is still not waited for.
#[cfg(not(any(unix, windows)))]
pub fn detach(_cmd: &mut Command) {}

/// Map an exit status to a process exit code.
///
/// A child killed by a signal reports `128 + signal`, the way shells do.
pub fn exit_code(status: std::process::ExitStatus) -> i32 {
	if let Some(code) = status.code() {
		return code;
	}

	#[cfg(unix)]
	{
		use std::os::unix::process::ExitStatusExt;

		if let Some(signal) = status.signal() {
			return 128 + signal;
		}
	}

	1
}

#[cfg(test)]
mod tests {
	use super::*;

	#[cfg(unix)]
	#[test]
	fn test_exit_code_from_signal() {
		let status = Command::new("/bin/sh")
			.arg("-c")
			.arg("kill -TERM $$")
			.status()
			.unwrap();
		assert_eq!(exit_code(status), 128 + 15);
	}

	#[cfg(unix)]
	#[test]
	fn test_exit_code_plain() {
		let status = Command::new("/bin/sh").arg("-c").arg("exit 3").status().unwrap();
		assert_eq!(exit_code(status), 3);
	}
}

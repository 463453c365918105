#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn revolver_cmd() -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("revolver").unwrap();
	cmd.env("SHELL", "/bin/sh").env_remove("TERMCMD");
	cmd
}

/// Write a config into `dir` and return its path.
fn write_config(dir: &Path, content: &str) -> PathBuf {
	let config_path = dir.join("revolver.toml");
	fs::write(&config_path, content).unwrap();
	config_path
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	revolver_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("Open files with the first matching method"));
}

#[test]
fn test_version_flag() {
	revolver_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("revolver"));
}

#[test]
fn test_no_args_reports_no_files() {
	revolver_cmd()
		.assert()
		.code(1)
		.stderr(predicate::str::contains("no files specified"));
}

#[test]
fn test_no_files_specified() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = write_config(temp_dir.path(), "");

	revolver_cmd()
		.arg("--list")
		.arg("--config")
		.arg(&config_path)
		.assert()
		.code(1)
		.stderr(predicate::str::contains("no files specified"));
}

#[test]
fn test_missing_config_file() {
	let temp_dir = tempfile::tempdir().unwrap();

	revolver_cmd()
		.arg("--config")
		.arg(temp_dir.path().join("absent.toml"))
		.arg("notes.txt")
		.assert()
		.failure()
		.stderr(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_pattern_reported() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = write_config(
		temp_dir.path(),
		r#"
[[rules]]
ext = "[unclosed"
cmd = "true"
"#,
	);

	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.arg("notes.txt")
		.assert()
		.failure()
		.stderr(predicate::str::contains("[unclosed"));
}

// ============================================================================
// --init tests
// ============================================================================

#[test]
fn test_init_creates_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join("nested").join("revolver.toml");

	revolver_cmd()
		.arg("--init")
		.arg("--config")
		.arg(&config_path)
		.assert()
		.success()
		.stdout(predicate::str::contains("Created"));

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("[[rules]]"));
}

#[test]
fn test_init_fails_if_exists() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = write_config(temp_dir.path(), "# existing");

	revolver_cmd()
		.arg("--init")
		.arg("--config")
		.arg(&config_path)
		.assert()
		.failure()
		.stderr(predicate::str::contains("already exists"));

	assert_eq!(fs::read_to_string(&config_path).unwrap(), "# existing");
}

#[test]
fn test_init_force_overwrites() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = write_config(temp_dir.path(), "# existing");

	revolver_cmd()
		.args(["--init", "--force", "--config"])
		.arg(&config_path)
		.assert()
		.success();

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("[[rules]]"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_default_config_location() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_dir = temp_dir.path().join("revolver");
	fs::create_dir(&config_dir).unwrap();
	fs::write(
		config_dir.join("revolver.toml"),
		r#"
[[rules]]
label = "from-xdg"
ext = '\.txt$'
cmd = "true"
"#,
	)
	.unwrap();

	revolver_cmd()
		.env("XDG_CONFIG_HOME", temp_dir.path())
		.args(["--list", "notes.txt"])
		.assert()
		.success()
		.stdout(predicate::str::contains("0:from-xdg::true"));
}

// ============================================================================
// Opening files (Unix only - commands run in /bin/sh)
// ============================================================================

#[cfg(unix)]
#[test]
fn test_open_runs_matching_rule() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = write_config(
		temp_dir.path(),
		r#"
[[rules]]
ext = "\\.txt$"
cmd = "echo opening $1"
"#,
	);

	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.arg("notes.txt")
		.assert()
		.success()
		.stdout("opening notes.txt\n");
}

#[cfg(unix)]
#[test]
fn test_first_match_wins_and_pick_selects_nth() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = write_config(
		temp_dir.path(),
		r#"
[[rules]]
ext = '\.md$'
cmd = "echo markdown"

[[rules]]
ext = '\.txt$'
cmd = "echo first"

[[rules]]
name = "^notes"
cmd = "echo second"
"#,
	);

	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.arg("notes.txt")
		.assert()
		.success()
		.stdout("first\n");

	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.args(["-p", "1", "notes.txt"])
		.assert()
		.success()
		.stdout("second\n");

	// Out of range picks match nothing
	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.args(["-p", "2", "notes.txt"])
		.assert()
		.success()
		.stdout("");
}

#[cfg(unix)]
#[test]
fn test_no_match_exits_successfully() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = write_config(
		temp_dir.path(),
		r#"
[[rules]]
ext = '\.txt$'
cmd = "exit 9"
"#,
	);

	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.arg("image.jpg")
		.assert()
		.success()
		.stdout("")
		.stderr("");
}

#[cfg(unix)]
#[test]
fn test_exit_code_propagates() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = write_config(
		temp_dir.path(),
		r#"
[[rules]]
name = ".*"
cmd = "exit 42"
"#,
	);

	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.arg("anything")
		.assert()
		.code(42);
}

#[cfg(unix)]
#[test]
fn test_inconsistent_file_types_launch_nothing() {
	let temp_dir = tempfile::tempdir().unwrap();
	let marker_path = temp_dir.path().join("command_ran");
	let config_path = write_config(
		temp_dir.path(),
		&format!(
			r#"
[[rules]]
ext = '\.txt$'
cmd = "touch '{}'"
"#,
			marker_path.display()
		),
	);

	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.args(["a.txt", "b.jpg"])
		.assert()
		.code(1)
		.stderr(predicate::str::contains("files cannot have different types"));

	assert!(!marker_path.exists(), "Command should not have run");
}

#[cfg(unix)]
#[test]
fn test_hostile_file_names_stay_quoted() {
	let temp_dir = tempfile::tempdir().unwrap();
	let marker_path = temp_dir.path().join("pwned");
	let config_path = write_config(
		temp_dir.path(),
		r#"
[[rules]]
name = ".*"
cmd = '''printf '[%s]\n' "$@"'''
"#,
	);

	let hostile = format!("x'; touch '{}'; '", marker_path.display());

	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.args(["it's here.txt", "$(touch nothing)", &hostile])
		.assert()
		.success()
		.stdout(format!("[it's here.txt]\n[$(touch nothing)]\n[{hostile}]\n"));

	assert!(!marker_path.exists(), "File name escaped its quotes");
}

#[cfg(unix)]
#[test]
fn test_required_program_gates_rule() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = write_config(
		temp_dir.path(),
		r#"
[[rules]]
ext = '\.txt$'
has = "nonexistent_command_12345"
cmd = "echo gated"

[[rules]]
ext = '\.txt$'
has = "sh"
cmd = "echo fallback"
"#,
	);

	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.arg("notes.txt")
		.assert()
		.success()
		.stdout("fallback\n");
}

#[cfg(unix)]
#[test]
fn test_mime_rule_sniffs_content() {
	let temp_dir = tempfile::tempdir().unwrap();
	let image_path = temp_dir.path().join("no-extension");
	fs::write(
		&image_path,
		[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D],
	)
	.unwrap();
	let config_path = write_config(
		temp_dir.path(),
		r#"
[[rules]]
mime = "^image/"
cmd = "echo image"
"#,
	);

	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.arg(&image_path)
		.assert()
		.success()
		.stdout("image\n");
}

#[cfg(unix)]
#[test]
fn test_mime_rule_matches_text_content_despite_extension() {
	let temp_dir = tempfile::tempdir().unwrap();
	let text_path = temp_dir.path().join("notes.doc");
	fs::write(&text_path, "plain words\n").unwrap();
	let config_path = write_config(
		temp_dir.path(),
		r#"
[[rules]]
mime = '^text/plain; charset=utf-8$'
cmd = "echo text"
"#,
	);

	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.arg(&text_path)
		.assert()
		.success()
		.stdout("text\n");
}

#[cfg(unix)]
#[test]
fn test_forked_rule_returns_immediately() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = write_config(
		temp_dir.path(),
		r#"
[[rules]]
name = ".*"
fork = true
cmd = "sleep 5; exit 3"
"#,
	);

	let start = std::time::Instant::now();
	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.arg("anything")
		.assert()
		.success();
	assert!(start.elapsed() < std::time::Duration::from_secs(4));
}

#[test]
fn test_terminal_rule_requires_launcher() {
	let temp_dir = tempfile::tempdir().unwrap();
	let marker_path = temp_dir.path().join("command_ran");
	let config_path = write_config(
		temp_dir.path(),
		&format!(
			r#"
[[rules]]
name = ".*"
term = true
cmd = "touch '{}'"
"#,
			marker_path.display()
		),
	);

	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.arg("anything")
		.assert()
		.failure()
		.stderr(predicate::str::contains("TERMCMD"));

	assert!(!marker_path.exists());
}

#[cfg(unix)]
#[test]
fn test_terminal_rule_runs_through_launcher() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = write_config(
		temp_dir.path(),
		r#"
[[rules]]
name = ".*"
term = true
cmd = "echo in-terminal $1"
"#,
	);

	// A fake terminal that drops its -e and runs the rest
	revolver_cmd()
		.env("TERMCMD", r#"sh -c 'shift; exec "$@"' fake-term"#)
		.arg("--config")
		.arg(&config_path)
		.arg("notes.txt")
		.assert()
		.success()
		.stdout("in-terminal notes.txt\n");
}

// ============================================================================
// --list tests
// ============================================================================

#[test]
fn test_list_prints_all_matches() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = write_config(
		temp_dir.path(),
		r#"
[[rules]]
label = "pager"
ext = '\.txt$'
cmd = 'less "$@"'

[[rules]]
label = "images"
ext = '\.png$'
fork = true
cmd = 'feh "$@"'

[[rules]]
label = "editor"
name = ".*"
fork = true
term = true
cmd = 'vi "$@"'
"#,
	);

	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.args(["--list", "notes.txt"])
		.assert()
		.success()
		.stdout("0:pager::less \"$@\"\n1:editor:ft:vi \"$@\"\n");
}

#[test]
fn test_list_aborts_on_inconsistent_files() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = write_config(
		temp_dir.path(),
		r#"
[[rules]]
label = "pager"
ext = '\.txt$'
cmd = 'less "$@"'

[[rules]]
label = "any"
name = ".*"
cmd = 'cat "$@"'
"#,
	);

	revolver_cmd()
		.arg("--config")
		.arg(&config_path)
		.args(["--list", "notes.txt", "image.png"])
		.assert()
		.code(1)
		.stdout("")
		.stderr(predicate::str::contains("files cannot have different types"));
}

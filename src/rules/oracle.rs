use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::trace;

/// Number of leading bytes read when sniffing a file's content type.
const SNIFF_LEN: u64 = 8192;

const FALLBACK_TEXT: &str = "text/plain";
const FALLBACK_BINARY: &str = "application/octet-stream";
const TEXT_CHARSET: &str = "charset=utf-8";

/// Answers the questions rule conditions depend on.
///
/// Both queries touch the system, so rule evaluation takes an oracle instead
/// of calling out directly.
pub trait Oracle {
	/// Detect the content type of a file, e.g. `image/png`.
	fn sniff_mime(&self, path: &Path) -> io::Result<String>;

	/// Whether `program` resolves to an executable on `$PATH`.
	fn has_executable(&self, program: &str) -> bool;
}

/// Oracle backed by the real filesystem and `$PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOracle;

impl Oracle for SystemOracle {
	fn sniff_mime(&self, path: &Path) -> io::Result<String> {
		let mut head = Vec::new();
		File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;

		let mime = detect_mime(path, &head);
		trace!(path = %path.display(), %mime, "sniffed content type");
		Ok(mime)
	}

	fn has_executable(&self, program: &str) -> bool {
		which::which(program).is_ok()
	}
}

/// Pick a content type from magic numbers, then from the content itself.
///
/// UTF-8 text is reported as text even when the name suggests otherwise;
/// the name only refines the subtype (`text/html`) or labels binary data.
fn detect_mime(path: &Path, head: &[u8]) -> String {
	if let Some(kind) = infer::get(head) {
		return kind.mime_type().to_string();
	}

	let guess = mime_guess::from_path(path).first();

	if is_text(head) {
		let essence = guess
			.as_ref()
			.map(|g| g.essence_str())
			.filter(|e| e.starts_with("text/"))
			.unwrap_or(FALLBACK_TEXT);
		return format!("{essence}; {TEXT_CHARSET}");
	}

	match guess {
		Some(guess) => guess.essence_str().to_string(),
		None => FALLBACK_BINARY.to_string(),
	}
}

fn is_text(head: &[u8]) -> bool {
	match std::str::from_utf8(head) {
		Ok(_) => true,
		// The read may have cut a multi-byte sequence in half
		Err(e) => e.error_len().is_none() && e.valid_up_to() + 4 > head.len(),
	}
}

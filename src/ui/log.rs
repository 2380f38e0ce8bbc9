//! Unified logging system

use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::Metric;

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	eprintln!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	eprintln!("{} {}", "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	eprintln!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		eprintln!("{} {}", "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	eprintln!("\n{}", text.bright_blue().bold());
}

/// Clickable file path (OSC 8 terminal hyperlink)
pub fn path_link(path: &std::path::Path, max_len: usize) -> String {
	let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

	let uri = if cfg!(windows) {
		let path_str = absolute.to_string_lossy();
		let cleaned = path_str.strip_prefix(r"\\?\").unwrap_or(&path_str);
		format!("file:///{}", cleaned.replace('\\', "/"))
	} else {
		format!("file://{}", absolute.display())
	};

	let filename = path
		.file_name()
		.and_then(|n| n.to_str())
		.unwrap_or("unknown");

	let display_name = if filename.chars().count() > max_len && max_len >= 8 {
		let chars: Vec<char> = filename.chars().collect();
		let head: String = chars[..max_len / 2].iter().collect();
		let tail: String = chars[chars.len() - (max_len / 2 - 3)..].iter().collect();
		format!("{}...{}", head, tail)
	} else {
		filename.to_string()
	};

	format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", uri, display_name)
}

/// Color `value` from red (at `min`) through yellow to green (at `max`)
pub fn color_gradient(value: f64, min: f64, max: f64, text: &str) -> ColoredString {
	let t = if max > min {
		((value - min) / (max - min)).clamp(0.0, 1.0)
	} else {
		1.0
	};

	let (r, g) = if t < 0.5 {
		(255, (t * 2.0 * 255.0) as u8)
	} else {
		(((1.0 - t) * 2.0 * 255.0) as u8, 255)
	};

	text.truecolor(r, g, 64)
}

/// Percentage metric colored by value, or a yellow "undefined"
pub fn metric(m: &Metric) -> ColoredString {
	match m.as_option() {
		Some(v) => color_gradient(v, 0.0, 100.0, &m.to_string()),
		None => m.to_string().yellow(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn verbose_flag_toggles() {
		Log::set_verbose(true);
		assert!(Log::is_verbose());
		Log::set_verbose(false);
		assert!(!Log::is_verbose());
	}

	#[test]
	fn path_link_shortens_long_names() {
		let link = path_link(std::path::Path::new("a_really_long_dataset_file_name_for_testing.json"), 20);
		assert!(link.contains("..."));
		assert!(link.starts_with("\x1b]8;;file://"));
	}

	#[test]
	fn metric_text_is_preserved() {
		let undefined = Metric::Undefined {
			name: "precision",
			reason: "none".into(),
		};
		assert!(metric(&undefined).to_string().contains("undefined"));
	}
}

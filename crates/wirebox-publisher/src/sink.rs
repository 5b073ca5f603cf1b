//! Log sinks the publisher writes to

use std::sync::{Mutex, PoisonError};

/// Destination for formatted log lines.
pub trait LogSink: Send + Sync {
	fn emit(&self, line: &str);
}

/// Forwards every line to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
	fn emit(&self, line: &str) {
		tracing::info!("{line}");
	}
}

/// Keeps every line in memory, in emission order.
///
/// # Examples
///
/// ```
/// use wirebox_publisher::{LogSink, MemorySink};
///
/// let sink = MemorySink::new();
/// sink.emit("publisher:hello");
/// assert_eq!(sink.lines(), vec!["publisher:hello"]);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
	lines: Mutex<Vec<String>>,
}

impl MemorySink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of the recorded lines.
	pub fn lines(&self) -> Vec<String> {
		self.lines
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}
}

impl LogSink for MemorySink {
	fn emit(&self, line: &str) {
		self.lines
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push(line.to_string());
	}
}

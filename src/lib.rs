//! # Wirebox
//!
//! Composition-root dependency injection for Rust, with a small publisher
//! program showing how a graph of typed providers is wired and run.
//!
//! ## Feature Flags
//!
//! - `publisher` (default) - the example consumer and the `wirebox` binary
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "publisher")]
//! # fn main() -> Result<(), wirebox::di::DiError> {
//! use std::sync::Arc;
//! use wirebox::publisher::{MemorySink, wiring};
//!
//! let sink = Arc::new(MemorySink::new());
//! let container = wiring::grouped(["hello", "goodbye"], sink.clone())?;
//! wiring::run(&container)?;
//! assert_eq!(sink.lines()[0], "publisher:hello");
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "publisher"))]
//! # fn main() {}
//! ```

pub use wirebox_di as di;

#[cfg(feature = "publisher")]
pub use wirebox_publisher as publisher;

pub use wirebox_di::{
	Container, DiError, DiResult, Group, GroupTag, Provider, ProviderKey,
};

pub mod prelude {
	pub use wirebox_di::{Container, DiError, DiResult, Group, GroupTag, Provider};

	#[cfg(feature = "publisher")]
	pub use wirebox_publisher::{LogSink, MainService, Publish, Publisher, Title, Titles};
}

//! # Wirebox Publisher
//!
//! Example consumer of `wirebox-di`: a publisher that logs its titles, a main
//! service that drives it, and the composition roots that wire them.
//!
//! ```rust
//! use std::sync::Arc;
//! use wirebox_publisher::{MemorySink, wiring};
//!
//! let sink = Arc::new(MemorySink::new());
//! let container = wiring::grouped(["hello", "goodbye"], sink.clone())?;
//! wiring::run(&container)?;
//!
//! assert_eq!(
//!     sink.lines(),
//!     vec!["publisher:hello", "publisher:goodbye", "main program"]
//! );
//! # Ok::<(), wirebox_di::DiError>(())
//! ```

pub mod publisher;
pub mod service;
pub mod sink;
pub mod title;
pub mod wiring;

pub use publisher::{Publish, Publisher};
pub use service::MainService;
pub use sink::{LogSink, MemorySink, TracingSink};
pub use title::{Title, Titles};

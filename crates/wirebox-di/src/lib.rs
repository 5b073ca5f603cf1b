//! # Wirebox Dependency Injection
//!
//! A small composition-root container: register typed providers, then invoke
//! an entry function whose parameters are resolved from them.
//!
//! ## Features
//!
//! - **Typed registration**: dependencies are read from a provider's parameter
//!   types when it is registered, not discovered at run time
//! - **Groups**: many providers of one type collected under a marker type,
//!   resolved in registration order
//! - **Singletons**: every provider runs at most once per container
//! - **Cycle detection**: circular chains fail before any provider on the
//!   cycle runs
//! - **Validation**: the declared graph can be checked and drawn as DOT
//!   without running anything
//!
//! ## Example
//!
//! ```rust
//! use wirebox_di::{Container, Group, GroupTag, Provider};
//! use std::sync::Arc;
//!
//! struct Title(&'static str);
//!
//! struct Titles;
//! impl GroupTag for Titles {
//!     const NAME: &'static str = "titles";
//! }
//!
//! let mut container = Container::new();
//! container.register(Provider::new(|| Title("hello")).in_group::<Titles>())?;
//! container.register(Provider::new(|| Title("goodbye")).in_group::<Titles>())?;
//!
//! let joined = container.invoke(|titles: Group<Title, Titles>| {
//!     titles.iter().map(|t| t.0).collect::<Vec<_>>().join(",")
//! })?;
//! assert_eq!(joined, "hello,goodbye");
//! # Ok::<(), wirebox_di::DiError>(())
//! ```

pub mod cache;
pub mod container;
pub mod cycle_detection;
pub mod dependency;
pub mod error;
pub mod graph;
pub mod key;
pub mod provider;

pub use cache::SingletonCache;
pub use container::{Container, ContainerBuilder, ContainerConfig};
pub use cycle_detection::MAX_RESOLUTION_DEPTH;
pub use dependency::{Dependency, Group, Injector, Requirement, RequirementKind};
pub use error::{DiError, DiResult};
pub use graph::{DependencyGraph, GraphStatistics, NodeKind};
pub use key::{GroupKey, GroupTag, ProviderKey, TypeKey};
pub use provider::{Provider, ProviderId};

//! Singleton instance cache

use crate::dependency::Instance;
use crate::provider::ProviderId;
use std::cell::RefCell;
use std::collections::HashMap;

/// Resolved instances keyed by the provider that produced them.
///
/// Grouped providers share a key but each keeps its own entry here, so every
/// provider runs at most once per container.
#[derive(Default)]
pub struct SingletonCache {
	entries: RefCell<HashMap<ProviderId, Instance>>,
}

impl SingletonCache {
	/// Creates an empty cache.
	///
	/// # Examples
	///
	/// ```
	/// use wirebox_di::SingletonCache;
	///
	/// let cache = SingletonCache::new();
	/// assert!(cache.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached instance for `id`, if any.
	pub fn get(&self, id: ProviderId) -> Option<Instance> {
		self.entries.borrow().get(&id).cloned()
	}

	/// Stores the instance for `id`. An existing entry is kept.
	pub fn insert(&self, id: ProviderId, instance: Instance) -> Instance {
		self.entries
			.borrow_mut()
			.entry(id)
			.or_insert(instance)
			.clone()
	}

	pub fn contains(&self, id: ProviderId) -> bool {
		self.entries.borrow().contains_key(&id)
	}

	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}
}

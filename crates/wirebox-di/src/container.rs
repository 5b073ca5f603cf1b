//! The dependency container
//!
//! A [`Container`] owns every registered [`Provider`], resolves requested types
//! depth-first and caches each provider's result so it runs at most once.
//! There is no global container; build one, register providers, then
//! [`invoke`](Container::invoke) the entry function.

use crate::cache::SingletonCache;
use crate::cycle_detection::{MAX_RESOLUTION_DEPTH, ResolutionStack};
use crate::dependency::{
	Arguments, Group, Injector, Instance, Requirement, RequirementKind, Resolved, downcast,
};
use crate::error::{BoxError, DiError, DiResult};
use crate::graph::{self, DependencyGraph, NodeKind};
use crate::key::{GroupTag, ProviderKey};
use crate::provider::{Provider, ProviderId};
use std::any::type_name;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Container settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerConfig {
	/// Deepest provider chain a single resolution may build
	pub max_resolution_depth: usize,
}

impl Default for ContainerConfig {
	fn default() -> Self {
		Self {
			max_resolution_depth: MAX_RESOLUTION_DEPTH,
		}
	}
}

/// Builder for [`Container`].
#[derive(Debug, Default)]
pub struct ContainerBuilder {
	config: ContainerConfig,
}

impl ContainerBuilder {
	pub fn max_resolution_depth(mut self, depth: usize) -> Self {
		self.config.max_resolution_depth = depth;
		self
	}

	pub fn build(self) -> Container {
		Container::with_config(self.config)
	}
}

/// Registry of providers plus the singleton cache built from them.
///
/// The container is single-threaded: resolution state lives in `RefCell`s and
/// the type is not `Sync`. Resolved values are `Send + Sync` and can be
/// shared once built.
///
/// # Examples
///
/// ```
/// use wirebox_di::Container;
/// use std::sync::Arc;
///
/// struct Host(String);
/// struct Url(String);
///
/// let mut container = Container::new();
/// container.provide(|| Host("localhost".into())).unwrap();
/// container.provide(|host: Arc<Host>| Url(format!("http://{}", host.0))).unwrap();
///
/// let url = container.invoke(|url: Arc<Url>| url.0.clone()).unwrap();
/// assert_eq!(url, "http://localhost");
/// ```
pub struct Container {
	providers: Vec<Provider>,
	singles: HashMap<ProviderKey, ProviderId>,
	groups: HashMap<ProviderKey, Vec<ProviderId>>,
	cache: SingletonCache,
	stack: ResolutionStack,
	config: ContainerConfig,
}

impl Container {
	pub fn new() -> Self {
		Self::with_config(ContainerConfig::default())
	}

	pub fn builder() -> ContainerBuilder {
		ContainerBuilder::default()
	}

	pub fn with_config(config: ContainerConfig) -> Self {
		Self {
			providers: Vec::new(),
			singles: HashMap::new(),
			groups: HashMap::new(),
			cache: SingletonCache::new(),
			stack: ResolutionStack::new(config.max_resolution_depth),
			config,
		}
	}

	pub fn config(&self) -> ContainerConfig {
		self.config
	}

	/// Adds a provider.
	///
	/// A non-grouped key may be registered once; grouped providers under the
	/// same key accumulate in registration order.
	pub fn register(&mut self, provider: Provider) -> DiResult<ProviderId> {
		let key = provider.key();
		let id = ProviderId::new(self.providers.len());

		if provider.is_grouped() {
			self.groups.entry(key).or_default().push(id);
		} else {
			if self.singles.contains_key(&key) {
				return Err(DiError::DuplicateProvider {
					key: key.to_string(),
				});
			}
			self.singles.insert(key, id);
		}

		debug!(provider = %key, id = id.index(), "registered provider");
		self.providers.push(provider);
		Ok(id)
	}

	/// Registers `injector` as the provider of its return type.
	pub fn provide<F, Args>(&mut self, injector: F) -> DiResult<ProviderId>
	where
		F: Injector<Args> + 'static,
		F::Output: Send + Sync + 'static,
		Args: 'static,
	{
		self.register(Provider::new(injector))
	}

	/// Registers `injector` as a member of group `K`.
	pub fn provide_into<K, F, Args>(&mut self, injector: F) -> DiResult<ProviderId>
	where
		K: GroupTag,
		F: Injector<Args> + 'static,
		F::Output: Send + Sync + 'static,
		Args: 'static,
	{
		self.register(Provider::new(injector).in_group::<K>())
	}

	pub fn len(&self) -> usize {
		self.providers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.providers.is_empty()
	}

	/// Whether a non-grouped provider of `T` is registered.
	pub fn contains<T: ?Sized + 'static>(&self) -> bool {
		self.singles.contains_key(&ProviderKey::of::<T>())
	}

	pub fn providers(&self) -> impl Iterator<Item = &Provider> {
		self.providers.iter()
	}

	/// Resolves the single value of `T`.
	pub fn resolve<T>(&self) -> DiResult<Arc<T>>
	where
		T: ?Sized + Send + Sync + 'static,
	{
		self.resolve_dependency::<Arc<T>>()
	}

	/// Resolves `T` if a provider exists.
	pub fn resolve_optional<T>(&self) -> DiResult<Option<Arc<T>>>
	where
		T: ?Sized + Send + Sync + 'static,
	{
		self.resolve_dependency::<Option<Arc<T>>>()
	}

	/// Resolves every member of group `K`, in registration order.
	pub fn resolve_group<T, K>(&self) -> DiResult<Group<T, K>>
	where
		T: ?Sized + Send + Sync + 'static,
		K: GroupTag,
	{
		self.resolve_dependency::<Group<T, K>>()
	}

	fn resolve_dependency<D: crate::dependency::Dependency>(&self) -> DiResult<D> {
		let requirement = D::requirement();
		let resolved = self.resolve_requirement(&requirement, &|| "<resolve>".to_string())?;
		D::extract(resolved)
	}

	/// Resolves the parameters of `entry` and calls it once.
	///
	/// Resolution errors are returned before `entry` runs; its return value is
	/// passed through untouched.
	pub fn invoke<F, Args>(&self, entry: F) -> DiResult<F::Output>
	where
		F: Injector<Args>,
	{
		let requested_by = || type_name::<F>().to_string();
		let values = entry
			.requirements()
			.iter()
			.map(|requirement| self.resolve_requirement(requirement, &requested_by))
			.collect::<DiResult<Vec<_>>>()?;

		debug!(entry = type_name::<F>(), "invoking entry function");
		entry.inject(Arguments::new(values))
	}

	/// Like [`invoke`](Self::invoke) for an entry function that can fail; its
	/// error is surfaced as [`DiError::Invocation`].
	pub fn try_invoke<F, Args, T, E>(&self, entry: F) -> DiResult<T>
	where
		F: Injector<Args, Output = Result<T, E>>,
		E: Into<BoxError>,
	{
		self.invoke(entry)?
			.map_err(|e| DiError::Invocation(e.into()))
	}

	/// Checks that every requirement of every provider can be met without
	/// invoking anything.
	pub fn validate(&self) -> DiResult<()> {
		self.dependency_ids().map(|_| ())
	}

	/// Provider keys in the order resolution would build them, dependencies
	/// first.
	pub fn resolution_order(&self) -> DiResult<Vec<ProviderKey>> {
		Ok(self
			.dependency_ids()?
			.into_iter()
			.map(|id| self.providers[id.index()].key())
			.collect())
	}

	/// Declared graph of every provider; missing keys are simply left out.
	pub fn dependency_graph(&self) -> DependencyGraph {
		let mut graph = DependencyGraph::new();

		for (index, provider) in self.providers.iter().enumerate() {
			let id = ProviderId::new(index);
			let kind = if provider.is_grouped() {
				NodeKind::Group
			} else {
				NodeKind::Single
			};
			graph.add_node(self.node_name(id), kind);

			for requirement in provider.requirements() {
				for target in self.targets(requirement).unwrap_or_default() {
					graph.add_dependency(self.node_name(id), self.node_name(target));
				}
			}
		}

		graph
	}

	fn dependency_ids(&self) -> DiResult<Vec<ProviderId>> {
		graph::dependency_order(
			self.providers.len(),
			|id| {
				let provider = &self.providers[id.index()];
				let mut edges = Vec::new();
				for requirement in provider.requirements() {
					match self.targets(requirement) {
						Some(ids) => edges.extend(ids),
						None => {
							return Err(DiError::UnresolvedDependency {
								key: requirement.key().to_string(),
								requested_by: provider.key().to_string(),
							});
						}
					}
				}
				Ok(edges)
			},
			|id| self.providers[id.index()].key().to_string(),
		)
	}

	/// Providers that satisfy `requirement`; `None` when a single value is
	/// required and nobody provides it.
	fn targets(&self, requirement: &Requirement) -> Option<Vec<ProviderId>> {
		let key = requirement.key();
		match requirement.kind() {
			RequirementKind::Single => self.singles.get(&key).map(|id| vec![*id]),
			RequirementKind::Optional => {
				Some(self.singles.get(&key).map(|id| vec![*id]).unwrap_or_default())
			}
			RequirementKind::Group => Some(self.groups.get(&key).cloned().unwrap_or_default()),
		}
	}

	fn node_name(&self, id: ProviderId) -> String {
		let key = self.providers[id.index()].key();
		match self.groups.get(&key) {
			Some(members) => {
				let position = members.iter().position(|m| *m == id).unwrap_or_default();
				format!("{}#{}", key, position)
			}
			None => key.to_string(),
		}
	}

	fn resolve_requirement(
		&self,
		requirement: &Requirement,
		requested_by: &dyn Fn() -> String,
	) -> DiResult<Resolved> {
		let key = requirement.key();
		match requirement.kind() {
			RequirementKind::Single => {
				let id = self.singles.get(&key).copied().ok_or_else(|| {
					DiError::UnresolvedDependency {
						key: key.to_string(),
						requested_by: requested_by(),
					}
				})?;
				self.instantiate(id).map(Resolved::Single)
			}
			RequirementKind::Optional => match self.singles.get(&key) {
				Some(id) => self.instantiate(*id).map(Resolved::Single),
				None => Ok(Resolved::Absent),
			},
			RequirementKind::Group => {
				let members = self.groups.get(&key).map(Vec::as_slice).unwrap_or_default();
				members
					.iter()
					.map(|id| self.instantiate(*id))
					.collect::<DiResult<Vec<_>>>()
					.map(Resolved::Group)
			}
		}
	}

	fn instantiate(&self, id: ProviderId) -> DiResult<Instance> {
		let provider = &self.providers[id.index()];

		if let Some(instance) = self.cache.get(id) {
			trace!(provider = %provider.key(), "cache hit");
			return Ok(instance);
		}

		let _guard = self.stack.enter(id, provider.key().to_string())?;

		let requested_by = || provider.key().to_string();
		let values = provider
			.requirements()
			.iter()
			.map(|requirement| self.resolve_requirement(requirement, &requested_by))
			.collect::<DiResult<Vec<_>>>()?;

		debug!(provider = %provider.key(), "invoking provider");
		let instance = provider.produce(Arguments::new(values))?;
		Ok(self.cache.insert(id, instance))
	}

	/// Number of providers that have already run.
	pub fn resolved_count(&self) -> usize {
		self.cache.len()
	}

	/// Cached value of a non-grouped `T` without resolving anything.
	pub fn cached<T>(&self) -> Option<Arc<T>>
	where
		T: ?Sized + Send + Sync + 'static,
	{
		let id = self.singles.get(&ProviderKey::of::<T>())?;
		self.cache.get(*id).and_then(|instance| downcast::<T>(&instance).ok())
	}
}

impl Default for Container {
	fn default() -> Self {
		Self::new()
	}
}

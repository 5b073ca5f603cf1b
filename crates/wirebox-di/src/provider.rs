//! Dependency providers

use crate::dependency::{Arguments, Injector, Instance, Requirement};
use crate::error::{DiError, DiResult};
use crate::key::{GroupKey, GroupTag, ProviderKey, TypeKey};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Registration index of a provider inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProviderId(usize);

impl ProviderId {
	pub fn new(index: usize) -> Self {
		Self(index)
	}

	pub fn index(&self) -> usize {
		self.0
	}
}

type FactoryFn = Box<dyn Fn(Arguments) -> DiResult<Instance>>;

/// A factory together with the key it produces and the keys it consumes.
///
/// # Examples
///
/// ```
/// use wirebox_di::Provider;
/// use std::sync::Arc;
///
/// struct Greeting(String);
///
/// let provider = Provider::new(|name: Arc<String>| Greeting(format!("hi {name}")));
/// assert_eq!(provider.requirements().len(), 1);
/// ```
pub struct Provider {
	key: ProviderKey,
	requirements: Vec<Requirement>,
	factory: FactoryFn,
}

impl Provider {
	/// Provider for the value returned by `injector`, registered under its type.
	pub fn new<F, Args>(injector: F) -> Self
	where
		F: Injector<Args> + 'static,
		F::Output: Send + Sync + 'static,
		Args: 'static,
	{
		let requirements = injector.requirements();
		Self {
			key: ProviderKey::of::<F::Output>(),
			requirements,
			factory: Box::new(move |args| {
				let value = injector.inject(args)?;
				Ok(Arc::new(Arc::new(value)) as Instance)
			}),
		}
	}

	/// Provider for an already shared value, registered under `U`.
	///
	/// This is how a concrete type is bound as a trait object: the factory
	/// returns `Arc<dyn Trait>` and dependents ask for `Arc<dyn Trait>`.
	pub fn shared<F, Args, U>(injector: F) -> Self
	where
		F: Injector<Args, Output = Arc<U>> + 'static,
		U: ?Sized + Send + Sync + 'static,
		Args: 'static,
	{
		let requirements = injector.requirements();
		Self {
			key: ProviderKey::of::<U>(),
			requirements,
			factory: Box::new(move |args| {
				let value = injector.inject(args)?;
				Ok(Arc::new(value) as Instance)
			}),
		}
	}

	/// Provider whose factory can fail. The error is reported with this
	/// provider's key and nothing is cached.
	pub fn fallible<F, Args, T, E>(injector: F) -> Self
	where
		F: Injector<Args, Output = Result<T, E>> + 'static,
		T: Send + Sync + 'static,
		E: StdError + Send + Sync + 'static,
		Args: 'static,
	{
		let requirements = injector.requirements();
		let key = ProviderKey::of::<T>();
		Self {
			key,
			requirements,
			factory: Box::new(move |args| {
				let value = injector.inject(args)?.map_err(|e| DiError::Provider {
					key: key.to_string(),
					source: Box::new(e),
				})?;
				Ok(Arc::new(Arc::new(value)) as Instance)
			}),
		}
	}

	/// Moves this provider into group `K`.
	pub fn in_group<K: GroupTag>(mut self) -> Self {
		self.key = self.key.with_group(GroupKey::of::<K>());
		self
	}

	pub fn key(&self) -> ProviderKey {
		self.key
	}

	pub fn type_key(&self) -> TypeKey {
		self.key.type_key()
	}

	pub fn is_grouped(&self) -> bool {
		self.key.group().is_some()
	}

	pub fn requirements(&self) -> &[Requirement] {
		&self.requirements
	}

	pub(crate) fn produce(&self, args: Arguments) -> DiResult<Instance> {
		(self.factory)(args)
	}
}

impl fmt::Debug for Provider {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Provider")
			.field("key", &self.key)
			.field("requirements", &self.requirements)
			.finish_non_exhaustive()
	}
}

//! Dependency parameters and injectable functions
//!
//! A function becomes injectable when every parameter implements
//! [`Dependency`]. The parameter types are turned into a list of
//! [`Requirement`]s at registration time, so the container knows the shape of
//! the graph before any provider runs.

use crate::error::{DiError, DiResult};
use crate::key::{GroupTag, ProviderKey};
use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

/// Type-erased cached value. The concrete type stored is always `Arc<T>`.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// How a parameter wants its key satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
	/// Exactly one provider must exist
	Single,
	/// Zero or one provider
	Optional,
	/// Every provider registered under the grouped key, in registration order
	Group,
}

/// A declared dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
	key: ProviderKey,
	kind: RequirementKind,
}

impl Requirement {
	pub fn new(key: ProviderKey, kind: RequirementKind) -> Self {
		Self { key, kind }
	}

	pub fn key(&self) -> ProviderKey {
		self.key
	}

	pub fn kind(&self) -> RequirementKind {
		self.kind
	}
}

/// Value produced for one requirement before it is handed to a factory.
pub enum Resolved {
	Single(Instance),
	Group(Vec<Instance>),
	Absent,
}

/// Parameter type that can be injected into a provider or invoked function.
///
/// Implemented for `Arc<T>` (single value), `Option<Arc<T>>` (optional
/// value) and [`Group<T, K>`] (all values of a group).
pub trait Dependency: Sized + 'static {
	fn requirement() -> Requirement;

	fn extract(resolved: Resolved) -> DiResult<Self>;
}

pub(crate) fn downcast<T>(instance: &Instance) -> DiResult<Arc<T>>
where
	T: ?Sized + Send + Sync + 'static,
{
	instance
		.downcast_ref::<Arc<T>>()
		.cloned()
		.ok_or(DiError::TypeMismatch {
			expected: type_name::<T>(),
		})
}

fn mismatch<T: ?Sized>() -> DiError {
	DiError::TypeMismatch {
		expected: type_name::<T>(),
	}
}

impl<T> Dependency for Arc<T>
where
	T: ?Sized + Send + Sync + 'static,
{
	fn requirement() -> Requirement {
		Requirement::new(ProviderKey::of::<T>(), RequirementKind::Single)
	}

	fn extract(resolved: Resolved) -> DiResult<Self> {
		match resolved {
			Resolved::Single(instance) => downcast::<T>(&instance),
			_ => Err(mismatch::<T>()),
		}
	}
}

impl<T> Dependency for Option<Arc<T>>
where
	T: ?Sized + Send + Sync + 'static,
{
	fn requirement() -> Requirement {
		Requirement::new(ProviderKey::of::<T>(), RequirementKind::Optional)
	}

	fn extract(resolved: Resolved) -> DiResult<Self> {
		match resolved {
			Resolved::Single(instance) => downcast::<T>(&instance).map(Some),
			Resolved::Absent => Ok(None),
			Resolved::Group(_) => Err(mismatch::<T>()),
		}
	}
}

/// Ordered values of every provider registered under group `K`.
///
/// # Examples
///
/// ```
/// use wirebox_di::{Container, Group, GroupTag, Provider};
///
/// struct Ports;
/// impl GroupTag for Ports {
///     const NAME: &'static str = "ports";
/// }
///
/// let mut container = Container::new();
/// container.register(Provider::new(|| 80u16).in_group::<Ports>()).unwrap();
/// container.register(Provider::new(|| 443u16).in_group::<Ports>()).unwrap();
///
/// let ports = container.resolve_group::<u16, Ports>().unwrap();
/// assert_eq!(ports.iter().map(|p| **p).collect::<Vec<_>>(), vec![80, 443]);
/// ```
pub struct Group<T: ?Sized, K> {
	items: Vec<Arc<T>>,
	_tag: PhantomData<fn() -> K>,
}

impl<T: ?Sized, K> Group<T, K> {
	pub fn new(items: Vec<Arc<T>>) -> Self {
		Self {
			items,
			_tag: PhantomData,
		}
	}

	pub fn into_vec(self) -> Vec<Arc<T>> {
		self.items
	}
}

impl<T: ?Sized, K> Clone for Group<T, K> {
	fn clone(&self) -> Self {
		Self::new(self.items.clone())
	}
}

impl<T: ?Sized, K> Deref for Group<T, K> {
	type Target = [Arc<T>];

	fn deref(&self) -> &Self::Target {
		&self.items
	}
}

impl<T: ?Sized + fmt::Debug, K> fmt::Debug for Group<T, K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.items.iter()).finish()
	}
}

impl<T, K> Dependency for Group<T, K>
where
	T: ?Sized + Send + Sync + 'static,
	K: GroupTag,
{
	fn requirement() -> Requirement {
		Requirement::new(ProviderKey::grouped::<T, K>(), RequirementKind::Group)
	}

	fn extract(resolved: Resolved) -> DiResult<Self> {
		match resolved {
			Resolved::Group(instances) => instances
				.iter()
				.map(downcast::<T>)
				.collect::<DiResult<Vec<_>>>()
				.map(Self::new),
			_ => Err(mismatch::<T>()),
		}
	}
}

/// Resolved values in parameter order.
pub struct Arguments {
	values: std::vec::IntoIter<Resolved>,
	index: usize,
}

impl Arguments {
	pub fn new(values: Vec<Resolved>) -> Self {
		Self {
			values: values.into_iter(),
			index: 0,
		}
	}

	/// Takes the next value and converts it to `D`.
	pub fn take<D: Dependency>(&mut self) -> DiResult<D> {
		let index = self.index;
		self.index += 1;
		let resolved = self
			.values
			.next()
			.ok_or(DiError::MissingArgument { index })?;
		D::extract(resolved)
	}
}

/// A function whose parameters can all be injected.
///
/// Implemented for every `Fn` of up to eight [`Dependency`] parameters; the
/// `Args` parameter is the tuple of parameter types and only serves to keep
/// the implementations apart.
pub trait Injector<Args> {
	type Output;

	/// Declared requirements, one per parameter.
	fn requirements(&self) -> Vec<Requirement>;

	fn inject(&self, args: Arguments) -> DiResult<Self::Output>;
}

macro_rules! impl_injector {
	($($ty:ident),*) => {
		impl<Func, Out, $($ty,)*> Injector<($($ty,)*)> for Func
		where
			Func: Fn($($ty),*) -> Out,
			$($ty: Dependency,)*
		{
			type Output = Out;

			fn requirements(&self) -> Vec<Requirement> {
				vec![$($ty::requirement()),*]
			}

			#[allow(non_snake_case, unused_mut, unused_variables)]
			fn inject(&self, mut args: Arguments) -> DiResult<Out> {
				$(let $ty = args.take::<$ty>()?;)*
				Ok((self)($($ty),*))
			}
		}
	};
}

impl_injector!();
impl_injector!(T1);
impl_injector!(T1, T2);
impl_injector!(T1, T2, T3);
impl_injector!(T1, T2, T3, T4);
impl_injector!(T1, T2, T3, T4, T5);
impl_injector!(T1, T2, T3, T4, T5, T6);
impl_injector!(T1, T2, T3, T4, T5, T6, T7);
impl_injector!(T1, T2, T3, T4, T5, T6, T7, T8);

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	struct Name(&'static str);
	struct Tags;

	impl GroupTag for Tags {
		const NAME: &'static str = "tags";
	}

	fn single(value: &'static str) -> Resolved {
		let instance: Instance = Arc::new(Arc::new(Name(value)));
		Resolved::Single(instance)
	}

	#[rstest]
	fn test_requirements_follow_parameter_order() {
		// Arrange
		let f = |_: Arc<Name>, _: Group<Name, Tags>, _: Option<Arc<u8>>| ();

		// Act
		let requirements = Injector::requirements(&f);

		// Assert
		let kinds: Vec<_> = requirements.iter().map(Requirement::kind).collect();
		assert_eq!(
			kinds,
			vec![
				RequirementKind::Single,
				RequirementKind::Group,
				RequirementKind::Optional
			]
		);
		assert_eq!(requirements[1].key(), ProviderKey::grouped::<Name, Tags>());
	}

	#[rstest]
	fn test_inject_passes_extracted_values() {
		// Arrange
		let f = |name: Arc<Name>, missing: Option<Arc<u8>>| (name.0, missing.is_none());
		let args = Arguments::new(vec![single("hello"), Resolved::Absent]);

		// Act
		let output = f.inject(args).unwrap();

		// Assert
		assert_eq!(output, ("hello", true));
	}

	#[rstest]
	fn test_wrong_shape_is_a_type_mismatch() {
		// Arrange
		let args = Arguments::new(vec![Resolved::Group(Vec::new())]);
		let f = |_: Arc<Name>| ();

		// Act
		let result = f.inject(args);

		// Assert
		assert!(matches!(result, Err(DiError::TypeMismatch { .. })));
	}

	#[rstest]
	fn test_missing_argument_reports_position() {
		// Arrange
		let f = |_: Arc<Name>, _: Arc<Name>| ();
		let args = Arguments::new(vec![single("only")]);

		// Act
		let result = f.inject(args);

		// Assert
		assert!(matches!(result, Err(DiError::MissingArgument { index: 1 })));
	}
}

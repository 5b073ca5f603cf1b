//! Provider keys and group tags

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a provided type.
///
/// Equality and hashing use the `TypeId` only; the name is kept for messages.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
	id: TypeId,
	name: &'static str,
}

impl TypeKey {
	/// Key for `T`. Unsized types such as `dyn Trait` are allowed.
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: type_name::<T>(),
		}
	}

	pub fn id(&self) -> TypeId {
		self.id
	}

	pub fn name(&self) -> &'static str {
		self.name
	}
}

impl PartialEq for TypeKey {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Display for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// Marker type naming a group of providers.
///
/// # Examples
///
/// ```
/// use wirebox_di::GroupTag;
///
/// struct Titles;
///
/// impl GroupTag for Titles {
///     const NAME: &'static str = "titles";
/// }
/// ```
pub trait GroupTag: 'static {
	const NAME: &'static str;
}

/// Identity of a group, derived from its tag type.
#[derive(Debug, Clone, Copy)]
pub struct GroupKey {
	id: TypeId,
	name: &'static str,
}

impl GroupKey {
	pub fn of<K: GroupTag>() -> Self {
		Self {
			id: TypeId::of::<K>(),
			name: K::NAME,
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}
}

impl PartialEq for GroupKey {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for GroupKey {}

impl Hash for GroupKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

/// Registry key: the produced type plus an optional group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderKey {
	ty: TypeKey,
	group: Option<GroupKey>,
}

impl ProviderKey {
	pub fn new(ty: TypeKey, group: Option<GroupKey>) -> Self {
		Self { ty, group }
	}

	pub fn of<T: ?Sized + 'static>() -> Self {
		Self::new(TypeKey::of::<T>(), None)
	}

	pub fn grouped<T: ?Sized + 'static, K: GroupTag>() -> Self {
		Self::new(TypeKey::of::<T>(), Some(GroupKey::of::<K>()))
	}

	pub fn type_key(&self) -> TypeKey {
		self.ty
	}

	pub fn group(&self) -> Option<GroupKey> {
		self.group
	}

	pub(crate) fn with_group(self, group: GroupKey) -> Self {
		Self {
			group: Some(group),
			..self
		}
	}
}

impl fmt::Display for ProviderKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.group {
			Some(group) => write!(f, "{}[group={}]", self.ty, group.name),
			None => write!(f, "{}", self.ty),
		}
	}
}

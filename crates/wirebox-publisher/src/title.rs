//! Title values and their group

use std::fmt;
use wirebox_di::GroupTag;

/// A title handed to the publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Title {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Title {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

/// Group collecting every title provider.
#[derive(Debug)]
pub struct Titles;

impl GroupTag for Titles {
	const NAME: &'static str = "titles";
}

//! Wiring errors

use std::error::Error as StdError;

/// Boxed source error carried by provider and invocation failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors raised while registering providers or resolving the graph.
#[derive(Debug, thiserror::Error)]
pub enum DiError {
	/// A non-grouped key was registered more than once
	#[error("Duplicate provider: {key} is already provided")]
	DuplicateProvider {
		/// Display form of the provider key
		key: String,
	},

	/// No provider exists for a required key
	#[error("Unresolved dependency: {key} (required by {requested_by})")]
	UnresolvedDependency {
		/// Display form of the missing key
		key: String,
		/// Provider or function that asked for it
		requested_by: String,
	},

	/// Resolution revisited a provider that is still in progress
	#[error(
		"Circular dependency detected: {type_name}\n  Path: {path}\nThis forms a cycle that cannot be resolved."
	)]
	CyclicDependency {
		/// Key of the provider that closed the cycle
		type_name: String,
		/// Circular path (format: A -> B -> C -> A)
		path: String,
	},

	/// Resolution nested deeper than the configured limit
	#[error(
		"Maximum resolution depth exceeded: {0}\nThis likely indicates an extremely deep dependency chain."
	)]
	MaxDepthExceeded(usize),

	/// A fallible provider returned an error
	#[error("Provider for {key} failed: {source}")]
	Provider {
		key: String,
		#[source]
		source: BoxError,
	},

	/// The invoked terminal function returned an error
	#[error("Invocation failed: {0}")]
	Invocation(#[source] BoxError),

	/// A cached instance did not hold the expected type
	#[error("Type mismatch: expected {expected}")]
	TypeMismatch { expected: &'static str },

	/// A factory asked for more arguments than were resolved
	#[error("Missing argument at position {index}")]
	MissingArgument { index: usize },
}

pub type DiResult<T> = Result<T, DiError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_unresolved_message_names_both_sides() {
		// Arrange
		let err = DiError::UnresolvedDependency {
			key: "Title".to_string(),
			requested_by: "Publisher".to_string(),
		};

		// Act
		let message = err.to_string();

		// Assert
		assert_eq!(
			message,
			"Unresolved dependency: Title (required by Publisher)"
		);
	}

	#[rstest]
	fn test_invocation_keeps_source() {
		// Arrange
		let io = std::io::Error::other("boom");

		// Act
		let err = DiError::Invocation(Box::new(io));

		// Assert
		assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("boom"));
	}
}

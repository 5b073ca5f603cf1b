//! Facade re-exports wire the same program as the member crates

use rstest::*;
use std::sync::Arc;
use wirebox::prelude::*;
use wirebox::publisher::{MemorySink, wiring};

#[rstest]
fn prelude_builds_the_grouped_program() {
	// Arrange
	let sink = Arc::new(MemorySink::new());
	let mut container = Container::new();
	for title in ["hello", "goodbye"] {
		container
			.register(Provider::new(move || Title::new(title)).in_group::<Titles>())
			.unwrap();
	}
	container
		.register(Provider::shared(
			|titles: Group<Title, Titles>, sink: Arc<dyn LogSink>| -> Arc<dyn Publish> {
				Arc::new(Publisher::from_group(titles, sink))
			},
		))
		.unwrap();
	wiring::register_service(&mut container, sink.clone()).unwrap();

	// Act
	container
		.invoke(|service: Arc<MainService>| service.run())
		.unwrap();

	// Assert
	assert_eq!(
		sink.lines(),
		vec!["publisher:hello", "publisher:goodbye", "main program"]
	);
}

#[rstest]
fn duplicate_registration_is_a_facade_error() {
	// Arrange
	let mut container = Container::new();
	container.provide(|| Title::new("hello")).unwrap();

	// Act
	let result: DiResult<_> = container.provide(|| Title::new("hello"));

	// Assert
	assert!(matches!(result, Err(DiError::DuplicateProvider { .. })));
}

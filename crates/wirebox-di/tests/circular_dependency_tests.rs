//! Tests for circular dependency detection

use rstest::*;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use wirebox_di::{Container, DiError, Group, GroupTag};

struct ServiceA;
struct ServiceB;
struct ServiceC;

struct Plugins;

impl GroupTag for Plugins {
	const NAME: &'static str = "plugins";
}

struct Plugin;

fn counted<T: 'static>(calls: &Rc<Cell<usize>>, value: fn() -> T) -> impl Fn() -> T + 'static {
	let calls = Rc::clone(calls);
	move || {
		calls.set(calls.get() + 1);
		value()
	}
}

#[rstest]
fn two_node_cycle_fails_before_any_provider_runs() {
	// Arrange
	let calls = Rc::new(Cell::new(0));
	let (a_calls, b_calls) = (Rc::clone(&calls), Rc::clone(&calls));
	let mut container = Container::new();
	container
		.provide(move |_: Arc<ServiceB>| {
			a_calls.set(a_calls.get() + 1);
			ServiceA
		})
		.unwrap();
	container
		.provide(move |_: Arc<ServiceA>| {
			b_calls.set(b_calls.get() + 1);
			ServiceB
		})
		.unwrap();

	// Act
	let result = container.resolve::<ServiceA>();

	// Assert
	match result {
		Err(DiError::CyclicDependency { path, .. }) => {
			let names: Vec<&str> = path.split(" -> ").collect();
			assert_eq!(names.len(), 3);
			assert!(names[0].ends_with("ServiceA"));
			assert!(names[1].ends_with("ServiceB"));
			assert!(names[2].ends_with("ServiceA"));
		}
		Err(other) => panic!("Expected CyclicDependency, got {:?}", other),
		Ok(_) => panic!("Expected CyclicDependency, got a value"),
	}
	assert_eq!(calls.get(), 0);
	assert_eq!(container.resolved_count(), 0);
}

#[rstest]
fn three_node_cycle_is_reported_by_validate() {
	// Arrange
	let mut container = Container::new();
	container.provide(|_: Arc<ServiceB>| ServiceA).unwrap();
	container.provide(|_: Arc<ServiceC>| ServiceB).unwrap();
	container.provide(|_: Arc<ServiceA>| ServiceC).unwrap();

	// Act
	let result = container.validate();

	// Assert
	match result {
		Err(DiError::CyclicDependency { path, .. }) => assert_eq!(path.matches(" -> ").count(), 3),
		other => panic!("Expected CyclicDependency, got {:?}", other),
	}
}

#[rstest]
fn cycle_through_a_group_is_detected() {
	// Arrange
	let mut container = Container::new();
	container
		.provide_into::<Plugins, _, _>(|_: Arc<ServiceA>| Plugin)
		.unwrap();
	container
		.provide(|_: Group<Plugin, Plugins>| ServiceA)
		.unwrap();

	// Act
	let result = container.invoke(|_: Arc<ServiceA>| ());

	// Assert
	assert!(matches!(result, Err(DiError::CyclicDependency { .. })));
}

#[rstest]
fn diamond_is_not_a_cycle() {
	// Arrange: A -> B, A -> C, B -> C
	let calls = Rc::new(Cell::new(0));
	let mut container = Container::new();
	container.provide(counted(&calls, || ServiceC)).unwrap();
	container.provide(|_: Arc<ServiceC>| ServiceB).unwrap();
	container
		.provide(|_: Arc<ServiceB>, _: Arc<ServiceC>| ServiceA)
		.unwrap();

	// Act
	let validated = container.validate();
	let resolved = container.resolve::<ServiceA>();

	// Assert
	assert!(validated.is_ok());
	assert!(resolved.is_ok());
	assert_eq!(calls.get(), 1, "shared leaf must be built once");
}

#[rstest]
fn failed_resolution_leaves_stack_clean() {
	// Arrange
	let mut container = Container::new();
	container.provide(|_: Arc<ServiceB>| ServiceA).unwrap();

	// Act
	let first = container.resolve::<ServiceA>();
	container.provide(|| ServiceB).unwrap();
	let second = container.resolve::<ServiceA>();

	// Assert
	assert!(matches!(first, Err(DiError::UnresolvedDependency { .. })));
	assert!(second.is_ok());
}

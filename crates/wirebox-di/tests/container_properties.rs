//! Property-based tests for the container
//!
//! 1. Group order - N grouped providers resolve to N values in registration order
//! 2. Singleton idempotency - repeated resolution never re-runs a provider
//! 3. Validation agrees with resolution on chains of any length

use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use wirebox_di::{Container, Group, GroupTag};

struct Numbers;

impl GroupTag for Numbers {
	const NAME: &'static str = "numbers";
}

struct Total(u64);

proptest! {
	#[test]
	fn prop_group_preserves_registration_order(values in prop::collection::vec(any::<u32>(), 0..16)) {
		let mut container = Container::new();
		for value in values.clone() {
			container.provide_into::<Numbers, _, _>(move || value).unwrap();
		}

		let resolved: Vec<u32> = container
			.invoke(|numbers: Group<u32, Numbers>| numbers.iter().map(|n| **n).collect::<Vec<u32>>())
			.unwrap();

		prop_assert_eq!(resolved, values);
	}

	#[test]
	fn prop_singleton_idempotency(requests in 1usize..20) {
		let calls = Rc::new(Cell::new(0usize));
		let counter = Rc::clone(&calls);
		let mut container = Container::new();
		container.provide(|| 7u64).unwrap();
		container
			.provide(move |base: Arc<u64>| {
				counter.set(counter.get() + 1);
				Total(*base * 6)
			})
			.unwrap();

		let first = container.resolve::<Total>().unwrap();
		for _ in 1..requests {
			let again = container.resolve::<Total>().unwrap();
			prop_assert!(Arc::ptr_eq(&first, &again));
		}

		prop_assert_eq!(first.0, 42);
		prop_assert_eq!(calls.get(), 1);
	}

	#[test]
	fn prop_validate_matches_resolution(grouped in 0usize..8) {
		let mut container = Container::new();
		for index in 0..grouped {
			container.provide_into::<Numbers, _, _>(move || index as u32).unwrap();
		}
		container
			.provide(|numbers: Group<u32, Numbers>| Total(numbers.iter().map(|n| u64::from(**n)).sum()))
			.unwrap();

		prop_assert!(container.validate().is_ok());
		prop_assert_eq!(container.resolution_order().unwrap().len(), grouped + 1);

		let expected = (0..grouped as u64).sum::<u64>();
		prop_assert_eq!(container.resolve::<Total>().unwrap().0, expected);
	}
}

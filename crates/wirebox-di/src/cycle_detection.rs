//! Circular dependency detection during resolution
//!
//! The container owns one [`ResolutionStack`] and enters every provider it is
//! about to build. Entering a provider that is already on the stack is a
//! cycle; the path is reported from the first occurrence to the repeat.
//!
//! - **O(1) detection**: membership lookup in a `HashSet<ProviderId>`
//! - **Depth limiting**: a configurable maximum guards pathological chains
//! - **RAII**: [`ResolutionGuard`] pops the provider when it goes out of scope,
//!   including on early return through `?`

use crate::error::DiError;
use crate::provider::ProviderId;
use std::cell::RefCell;
use std::collections::HashSet;

/// Default maximum resolution depth
pub const MAX_RESOLUTION_DEPTH: usize = 100;

#[derive(Debug, Default)]
struct StackState {
	/// Providers currently being resolved
	in_progress: HashSet<ProviderId>,
	/// Resolution path with display names, outermost first
	path: Vec<(ProviderId, String)>,
}

/// Providers in progress for the current resolution pass.
#[derive(Debug)]
pub struct ResolutionStack {
	state: RefCell<StackState>,
	max_depth: usize,
}

impl ResolutionStack {
	pub fn new(max_depth: usize) -> Self {
		Self {
			state: RefCell::new(StackState::default()),
			max_depth,
		}
	}

	/// Current nesting depth.
	pub fn depth(&self) -> usize {
		self.state.borrow().path.len()
	}

	/// Records the start of resolving `id`.
	///
	/// Fails if `id` is already in progress or if the depth limit would be
	/// exceeded. On success the returned guard removes `id` when dropped.
	pub fn enter(&self, id: ProviderId, name: String) -> Result<ResolutionGuard<'_>, DiError> {
		let mut state = self.state.borrow_mut();

		if state.in_progress.contains(&id) {
			let path = cycle_path(&state, id, &name);
			return Err(DiError::CyclicDependency {
				type_name: name,
				path,
			});
		}

		let depth = state.path.len() + 1;
		if depth > self.max_depth {
			return Err(DiError::MaxDepthExceeded(depth));
		}

		state.in_progress.insert(id);
		state.path.push((id, name));
		Ok(ResolutionGuard { stack: self, id })
	}

	fn leave(&self, id: ProviderId) {
		let mut state = self.state.borrow_mut();
		state.in_progress.remove(&id);
		if let Some(pos) = state.path.iter().rposition(|(entry, _)| *entry == id) {
			state.path.remove(pos);
		}
	}
}

fn cycle_path(state: &StackState, id: ProviderId, name: &str) -> String {
	match state.path.iter().position(|(entry, _)| *entry == id) {
		Some(start) => {
			let cycle: Vec<&str> = state.path[start..]
				.iter()
				.map(|(_, name)| name.as_str())
				.collect();
			format!("{} -> {}", cycle.join(" -> "), name)
		}
		None => format!("Unknown cycle involving {}", name),
	}
}

/// RAII guard: pops its provider from the stack on drop
#[derive(Debug)]
pub struct ResolutionGuard<'a> {
	stack: &'a ResolutionStack,
	id: ProviderId,
}

impl Drop for ResolutionGuard<'_> {
	fn drop(&mut self) {
		self.stack.leave(self.id);
	}
}

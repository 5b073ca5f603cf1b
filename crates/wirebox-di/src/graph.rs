//! Dependency graph walking and visualization
//!
//! The container declares its graph as data, so it can be checked and drawn
//! without running a single provider. [`DependencyGraph::to_dot`] renders DOT
//! output for Graphviz.
//!
//! ## Example
//!
//! ```rust
//! use wirebox_di::graph::{DependencyGraph, NodeKind};
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_node("Title", NodeKind::Group);
//! graph.add_node("Publisher", NodeKind::Single);
//! graph.add_dependency("Publisher", "Title");
//!
//! let dot = graph.to_dot();
//! assert!(dot.contains("\"Publisher\" -> \"Title\""));
//! ```

use crate::error::{DiError, DiResult};
use crate::provider::ProviderId;
use std::collections::HashSet;
use std::fmt::Write as _;

/// Whether a node stands for a plain or a grouped provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
	Single,
	Group,
}

/// Represents a node in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
	/// Name of the dependency
	pub name: String,
	pub kind: NodeKind,
}

/// Dependency graph for visualization
#[derive(Debug, Default)]
pub struct DependencyGraph {
	nodes: Vec<GraphNode>,
	edges: Vec<(String, String)>,
}

impl DependencyGraph {
	/// Create a new empty dependency graph
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a node to the graph. Re-adding a name replaces its kind.
	pub fn add_node(&mut self, name: impl Into<String>, kind: NodeKind) {
		let name = name.into();
		match self.nodes.iter_mut().find(|node| node.name == name) {
			Some(node) => node.kind = kind,
			None => self.nodes.push(GraphNode { name, kind }),
		}
	}

	/// Add a dependency edge from `from` to `to`
	pub fn add_dependency(&mut self, from: impl Into<String>, to: impl Into<String>) {
		self.edges.push((from.into(), to.into()));
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[(String, String)] {
		&self.edges
	}

	/// Generate DOT format output for Graphviz
	pub fn to_dot(&self) -> String {
		let mut output = String::from("digraph DependencyGraph {\n");
		output.push_str("  rankdir=LR;\n");
		output.push_str("  node [shape=box, style=rounded];\n\n");

		for node in &self.nodes {
			let color = match node.kind {
				NodeKind::Single => "lightblue",
				NodeKind::Group => "lightgreen",
			};
			let _ = writeln!(
				output,
				"  \"{}\" [label=\"{}\", fillcolor={}, style=filled];",
				node.name, node.name, color
			);
		}

		output.push('\n');

		for (from, to) in &self.edges {
			let _ = writeln!(output, "  \"{}\" -> \"{}\";", from, to);
		}

		output.push_str("}\n");
		output
	}

	/// Detect circular dependencies in the graph
	///
	/// Returns every cycle found, each as the list of node names on it.
	pub fn detect_cycles(&self) -> Vec<Vec<String>> {
		let mut cycles = Vec::new();
		let mut visited = HashSet::new();
		let mut rec_stack = HashSet::new();

		for node in &self.nodes {
			if !visited.contains(node.name.as_str()) {
				let mut path = Vec::new();
				self.dfs_detect_cycles(
					&node.name,
					&mut visited,
					&mut rec_stack,
					&mut path,
					&mut cycles,
				);
			}
		}

		cycles
	}

	fn dfs_detect_cycles<'a>(
		&'a self,
		node: &'a str,
		visited: &mut HashSet<&'a str>,
		rec_stack: &mut HashSet<&'a str>,
		path: &mut Vec<&'a str>,
		cycles: &mut Vec<Vec<String>>,
	) {
		visited.insert(node);
		rec_stack.insert(node);
		path.push(node);

		let dependencies = self
			.edges
			.iter()
			.filter(|(from, _)| from == node)
			.map(|(_, to)| to.as_str());

		for dep in dependencies {
			if !visited.contains(dep) {
				self.dfs_detect_cycles(dep, visited, rec_stack, path, cycles);
			} else if rec_stack.contains(dep) {
				if let Some(cycle_start) = path.iter().position(|p| *p == dep) {
					cycles.push(path[cycle_start..].iter().map(ToString::to_string).collect());
				}
			}
		}

		path.pop();
		rec_stack.remove(node);
	}

	/// Get statistics about the dependency graph
	pub fn statistics(&self) -> GraphStatistics {
		let group_count = self
			.nodes
			.iter()
			.filter(|n| n.kind == NodeKind::Group)
			.count();

		GraphStatistics {
			node_count: self.nodes.len(),
			edge_count: self.edges.len(),
			single_count: self.nodes.len() - group_count,
			group_count,
		}
	}
}

/// Statistics about a dependency graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStatistics {
	/// Total number of nodes
	pub node_count: usize,
	/// Total number of edges
	pub edge_count: usize,
	pub single_count: usize,
	pub group_count: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
	Unvisited,
	InProgress,
	Done,
}

/// Depth-first walk over `count` providers in registration order.
///
/// `edges` returns the providers a provider depends on, or the error for a
/// requirement nobody provides. Returns every provider in dependency-first
/// order; fails on the first missing key or cycle, naming the cycle with
/// `name`.
pub(crate) fn dependency_order(
	count: usize,
	edges: impl Fn(ProviderId) -> DiResult<Vec<ProviderId>>,
	name: impl Fn(ProviderId) -> String,
) -> DiResult<Vec<ProviderId>> {
	let mut marks = vec![Mark::Unvisited; count];
	let mut order = Vec::with_capacity(count);
	let mut path = Vec::new();

	for index in 0..count {
		visit(
			ProviderId::new(index),
			&edges,
			&name,
			&mut marks,
			&mut path,
			&mut order,
		)?;
	}

	Ok(order)
}

fn visit(
	id: ProviderId,
	edges: &impl Fn(ProviderId) -> DiResult<Vec<ProviderId>>,
	name: &impl Fn(ProviderId) -> String,
	marks: &mut [Mark],
	path: &mut Vec<ProviderId>,
	order: &mut Vec<ProviderId>,
) -> DiResult<()> {
	match marks[id.index()] {
		Mark::Done => return Ok(()),
		Mark::InProgress => {
			let start = path.iter().position(|entry| *entry == id).unwrap_or(0);
			let mut names: Vec<String> = path[start..].iter().map(|entry| name(*entry)).collect();
			names.push(name(id));
			return Err(DiError::CyclicDependency {
				type_name: name(id),
				path: names.join(" -> "),
			});
		}
		Mark::Unvisited => {}
	}

	marks[id.index()] = Mark::InProgress;
	path.push(id);
	for dep in edges(id)? {
		visit(dep, edges, name, marks, path, order)?;
	}
	path.pop();
	marks[id.index()] = Mark::Done;
	order.push(id);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn id(index: usize) -> ProviderId {
		ProviderId::new(index)
	}

	fn names(index: ProviderId) -> String {
		["A", "B", "C"][index.index()].to_string()
	}

	#[rstest]
	fn test_order_puts_leaves_first() {
		// Arrange: A -> B -> C
		let edges = |p: ProviderId| -> DiResult<Vec<ProviderId>> {
			Ok(match p.index() {
				0 => vec![id(1)],
				1 => vec![id(2)],
				_ => vec![],
			})
		};

		// Act
		let order = dependency_order(3, edges, names).unwrap();

		// Assert
		assert_eq!(order, vec![id(2), id(1), id(0)]);
	}

	#[rstest]
	fn test_order_reports_cycle_path() {
		// Arrange: A -> B -> A
		let edges = |p: ProviderId| -> DiResult<Vec<ProviderId>> {
			Ok(match p.index() {
				0 => vec![id(1)],
				1 => vec![id(0)],
				_ => vec![],
			})
		};

		// Act
		let result = dependency_order(3, edges, names);

		// Assert
		match result {
			Err(DiError::CyclicDependency { path, .. }) => assert_eq!(path, "A -> B -> A"),
			other => panic!("Expected CyclicDependency, got {:?}", other),
		}
	}

	#[rstest]
	fn test_dot_output_lists_nodes_and_edges() {
		// Arrange
		let mut graph = DependencyGraph::new();
		graph.add_node("Publisher", NodeKind::Single);
		graph.add_node("Title#0", NodeKind::Group);
		graph.add_dependency("Publisher", "Title#0");

		// Act
		let dot = graph.to_dot();

		// Assert
		assert!(dot.starts_with("digraph DependencyGraph {"));
		assert!(dot.contains("\"Title#0\" [label=\"Title#0\", fillcolor=lightgreen, style=filled];"));
		assert!(dot.contains("\"Publisher\" -> \"Title#0\";"));
	}

	#[rstest]
	fn test_detect_cycles_and_statistics() {
		// Arrange
		let mut graph = DependencyGraph::new();
		graph.add_node("A", NodeKind::Single);
		graph.add_node("B", NodeKind::Group);
		graph.add_dependency("A", "B");
		graph.add_dependency("B", "A");

		// Act
		let cycles = graph.detect_cycles();
		let stats = graph.statistics();

		// Assert
		assert_eq!(cycles, vec![vec!["A".to_string(), "B".to_string()]]);
		assert_eq!(
			stats,
			GraphStatistics {
				node_count: 2,
				edge_count: 2,
				single_count: 1,
				group_count: 1,
			}
		);
	}
}

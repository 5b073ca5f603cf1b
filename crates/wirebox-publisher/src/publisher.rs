//! The title publisher

use crate::sink::LogSink;
use crate::title::{Title, Titles};
use std::sync::Arc;
use wirebox_di::Group;

/// Something that publishes its titles.
pub trait Publish: Send + Sync {
	fn publish(&self);
}

/// Publishes an ordered list of titles to a log sink, one line each.
pub struct Publisher {
	titles: Vec<Arc<Title>>,
	sink: Arc<dyn LogSink>,
}

impl Publisher {
	pub fn new(titles: Vec<Arc<Title>>, sink: Arc<dyn LogSink>) -> Self {
		Self { titles, sink }
	}

	/// Publisher over a single title.
	pub fn with_title(title: Arc<Title>, sink: Arc<dyn LogSink>) -> Self {
		Self::new(vec![title], sink)
	}

	/// Publisher over every title in the group, in registration order.
	pub fn from_group(titles: Group<Title, Titles>, sink: Arc<dyn LogSink>) -> Self {
		Self::new(titles.into_vec(), sink)
	}

	pub fn titles(&self) -> &[Arc<Title>] {
		&self.titles
	}
}

impl Publish for Publisher {
	fn publish(&self) {
		for title in &self.titles {
			self.sink.emit(&format!("publisher:{title}"));
		}
	}
}

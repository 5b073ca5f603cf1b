//! Main service driving the publisher

use crate::publisher::Publish;
use crate::sink::LogSink;
use std::sync::Arc;

pub struct MainService {
	publisher: Arc<dyn Publish>,
	sink: Arc<dyn LogSink>,
}

impl MainService {
	pub fn new(publisher: Arc<dyn Publish>, sink: Arc<dyn LogSink>) -> Self {
		Self { publisher, sink }
	}

	/// Publishes every title, then reports that the program ran.
	pub fn run(&self) {
		self.publisher.publish();
		self.sink.emit("main program");
	}
}

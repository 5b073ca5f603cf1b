//! Composition roots
//!
//! Three ways of building the same program: by hand, with a single injected
//! title, and with titles collected from a group. The container variants are
//! validated before they are returned, so a wiring mistake surfaces when the
//! container is built rather than when it runs.

use crate::publisher::{Publish, Publisher};
use crate::service::MainService;
use crate::sink::LogSink;
use crate::title::{Title, Titles};
use std::sync::Arc;
use wirebox_di::{Container, DiResult, Group, Provider};

/// Wires the service directly, without a container.
pub fn manual(title: Title, sink: Arc<dyn LogSink>) -> MainService {
	let publisher = Publisher::with_title(Arc::new(title), Arc::clone(&sink));
	MainService::new(Arc::new(publisher), sink)
}

/// Container with one title injected as a single value.
pub fn single(title: Title, sink: Arc<dyn LogSink>) -> DiResult<Container> {
	let mut container = Container::new();
	container.provide(move || title.clone())?;
	container.register(Provider::shared(
		|title: Arc<Title>, sink: Arc<dyn LogSink>| -> Arc<dyn Publish> {
			Arc::new(Publisher::with_title(title, sink))
		},
	))?;
	register_service(&mut container, sink)?;
	container.validate()?;
	Ok(container)
}

/// Container with every title registered into the [`Titles`] group.
pub fn grouped<I>(titles: I, sink: Arc<dyn LogSink>) -> DiResult<Container>
where
	I: IntoIterator,
	I::Item: Into<Title>,
{
	let mut container = Container::new();
	for title in titles {
		let title = title.into();
		container.provide_into::<Titles, _, _>(move || title.clone())?;
	}
	container.register(Provider::shared(
		|titles: Group<Title, Titles>, sink: Arc<dyn LogSink>| -> Arc<dyn Publish> {
			Arc::new(Publisher::from_group(titles, sink))
		},
	))?;
	register_service(&mut container, sink)?;
	container.validate()?;
	Ok(container)
}

/// Registers the log sink and the main service every variant shares.
pub fn register_service(container: &mut Container, sink: Arc<dyn LogSink>) -> DiResult<()> {
	container.register(Provider::shared(move || Arc::clone(&sink)))?;
	container.provide(|publisher: Arc<dyn Publish>, sink: Arc<dyn LogSink>| {
		MainService::new(publisher, sink)
	})?;
	Ok(())
}

/// Entry point: resolves the main service and runs it once.
pub fn run(container: &Container) -> DiResult<()> {
	tracing::debug!(providers = container.len(), "running main service");
	container.invoke(|service: Arc<MainService>| service.run())
}

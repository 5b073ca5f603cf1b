use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wirebox::publisher::{TracingSink, wiring};

fn main() -> anyhow::Result<()> {
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "info".into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	let container = wiring::grouped(["hello", "goodbye"], Arc::new(TracingSink))?;
	tracing::debug!(providers = container.len(), "container built");

	wiring::run(&container)?;
	Ok(())
}

use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

pub type TelemetryError = Box<dyn std::error::Error + Send + Sync>;

/// Builds the subscriber used by the service. `RUST_LOG` takes precedence over
/// the level implied by `debug`. Output is JSON unless running in debug mode.
pub fn get_subscriber(debug: bool) -> Box<dyn Subscriber + Send + Sync> {
    let default_level = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = Registry::default().with(env_filter);

    if debug {
        Box::new(registry.with(fmt::layer().with_target(true)))
    } else {
        Box::new(registry.with(fmt::layer().json().with_current_span(true)))
    }
}

/// Installs `subscriber` globally and forwards `log` records into it.
pub fn init_subscriber(
    subscriber: impl Subscriber + Send + Sync + 'static,
) -> Result<(), TelemetryError> {
    tracing_log::LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}

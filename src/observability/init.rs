//! Tracing subscriber setup.

use super::tracer;
use crate::infrastructure::paths::{get_data_dir, trace_file_in};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name reported in the trace resource.
const SERVICE_NAME: &str = "geolookup";

/// Installs the global subscriber exporting to `/data/geolookup-otlp.json`.
///
/// `config.trace_level` is an [`EnvFilter`] directive (`"debug"`,
/// `"geolookup=trace"`, ...); an unparseable directive falls back to `info`.
/// Tracing never fails the plugin: a missing data directory disables export
/// and a second call is a no-op.
///
/// # Example
///
/// ```rust
/// use geolookup::observability::init_tracing;
/// use geolookup::Config;
///
/// let config = Config {
///     trace_level: "debug".to_string(),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(trace_file_in(&data_dir), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}

//! OpenTelemetry-based observability with file-based trace export.
//!
//! `tracing` spans and events are bridged into OpenTelemetry and exported as
//! OTLP/JSON lines into the plugin's data directory, for offline inspection
//! with any OTLP-aware viewer:
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → /data/geolookup-otlp.json
//! ```
//!
//! The file rotates at 10 MiB and keeps 3 timestamped backups. The filter
//! comes from the `trace_level` plugin option (default `info`).
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `tracer`: tracer provider with the file exporter
//! - `span_formatter`: OTLP/JSON encoding
//! - `file_writer`: size-rotated writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;

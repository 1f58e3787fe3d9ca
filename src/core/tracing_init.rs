use crate::core::config::LoggingConfig;
use tracing::Subscriber;
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber. `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(output_layer(config))
        .init();
}

fn output_layer<S>(config: &LoggingConfig) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let span_events = span_events(config);

    if uses_console(config) {
        fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_span_events(span_events)
            .boxed()
    } else {
        // Span list carries the enclosing request and statement spans on each record
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_span_events(span_events)
            .boxed()
    }
}

fn uses_console(config: &LoggingConfig) -> bool {
    config.console || config.format == "console"
}

/// Closing a `SELECT users` span then yields one record with its busy/idle time
fn span_events(config: &LoggingConfig) -> FmtSpan {
    if config.span_timings {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

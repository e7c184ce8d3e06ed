use std::borrow::Cow;

use sentry::integrations::tracing::EventFilter;
use sentry::{ClientInitGuard, ClientOptions};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::prelude::*;

/// Initialises tracing.
pub fn init(sentry_dsn: Option<String>, traces_sample_rate: f32) -> Result<ClientInitGuard> {
    let guard = sentry::init((
        sentry_dsn,
        ClientOptions {
            release: Some(Cow::Borrowed(env!("CARGO_PKG_VERSION"))),
            traces_sample_rate,
            ..Default::default()
        },
    ));

    let sentry_filter = EnvFilter::try_from_env("GONE_PAGES_SENTRY_LOG")
        .or_else(|_| EnvFilter::try_new("gone_pages=info"))?;
    let sentry_layer = sentry::integrations::tracing::layer()
        .event_filter(|metadata| event_filter(*metadata.level()))
        .span_filter(|metadata| is_traced_span(*metadata.level()))
        .with_filter(sentry_filter);

    let format_filter = EnvFilter::try_from_env("GONE_PAGES_LOG")
        .or_else(|_| EnvFilter::try_new("gone_pages=info,poem=info"))?;
    let format_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_filter(format_filter);

    tracing_subscriber::Registry::default()
        .with(sentry_layer)
        .with(format_layer)
        .try_init()
        .context("failed to initialise tracing")?;

    Ok(guard)
}

/// Errors become Sentry events, a missing 410 page is logged as a warning and stays a breadcrumb.
fn event_filter(level: Level) -> EventFilter {
    match level {
        Level::ERROR => EventFilter::Event,
        Level::WARN | Level::INFO => EventFilter::Breadcrumb,
        _ => EventFilter::Ignore,
    }
}

/// Repository spans are `debug` and stay out of the traces.
fn is_traced_span(level: Level) -> bool {
    level <= Level::INFO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_filter_ok() {
        assert!(matches!(event_filter(Level::ERROR), EventFilter::Event));
        assert!(matches!(event_filter(Level::WARN), EventFilter::Breadcrumb));
        assert!(matches!(event_filter(Level::DEBUG), EventFilter::Ignore));
    }

    #[test]
    fn is_traced_span_ok() {
        assert!(is_traced_span(Level::INFO));
        assert!(is_traced_span(Level::WARN));
        assert!(!is_traced_span(Level::DEBUG));
    }
}

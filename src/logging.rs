use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber, logging to stderr so command output on
/// stdout stays clean. Later calls are no-ops.
///
/// An unparsable `filter` falls back to warnings only.
pub(crate) fn init_tracing(filter: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}

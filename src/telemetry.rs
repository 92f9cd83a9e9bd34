//! Logging setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber (fmt output filtered by `filter`)
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("Invalid log filter {:?} ({}), falling back to info", filter, e);
        EnvFilter::new("info")
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

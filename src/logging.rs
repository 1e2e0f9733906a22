use tracing_subscriber::EnvFilter;

/// Initialise logging. The default level is `info`; `debug` can be enabled
/// via the settings file. The `RUST_LOG` environment variable is only
/// honored when debug logging is enabled.
pub fn init(debug: bool) {
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        // Force `info` regardless of the environment so a stray RUST_LOG
        // doesn't make the app verbose.
        EnvFilter::new(level)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

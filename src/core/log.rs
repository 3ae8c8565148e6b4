// Define a new module for logging initialization
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber. `RUST_LOG` overrides `level` when set.
pub fn init_logging(level: LevelFilter) {
    let app_filter = Targets::new()
        .with_target("xrate", level)
        .with_target("tower_http", level);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(app_filter)
        .with(env_filter)
        .init();
}

/// Picks the default level: `debug` when verbose, `info` for the long-running
/// server, `warn` for one-shot commands.
pub fn default_level(verbose: bool, long_running: bool) -> LevelFilter {
    match (verbose, long_running) {
        (true, _) => LevelFilter::DEBUG,
        (false, true) => LevelFilter::INFO,
        (false, false) => LevelFilter::WARN,
    }
}

use tracing_subscriber::EnvFilter;

/// Used when neither the debug flag nor `RUST_LOG` is set.
const DEFAULT_FILTER: &str = "warn,decimal_spin=info";

/// Debug mode also surfaces per-keystroke rejections from the primitive.
const DEBUG_FILTER: &str = "info,decimal_spin=trace";

/// Filter directives for the subscriber. The debug flag wins over
/// `rust_log`; a blank or missing `rust_log` falls back to the default.
pub fn filter_directives(enable_debug: bool, rust_log: Option<&str>) -> String {
    if enable_debug {
        return DEBUG_FILTER.to_string();
    }
    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_string(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Initialize tracing and bridge `log` to `tracing`.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(enable_debug: bool) {
    // The app layer logs through `log`, the library through `tracing`
    let _ = tracing_log::LogTracer::init();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(enable_debug, rust_log.as_deref());
    let env_filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("ignoring malformed {}: {e}", EnvFilter::DEFAULT_ENV);
        EnvFilter::new(DEFAULT_FILTER)
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init()
        .ok();

    tracing::debug!(filter = %directives, "tracing initialized");
}

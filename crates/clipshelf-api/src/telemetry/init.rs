use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "clipshelf=info,tower_http=info";
const DEBUG_FILTER: &str = "clipshelf=debug,tower_http=debug";

/// Initialize tracing. `RUST_LOG` wins over the debug flag.
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init_telemetry(debug_logging: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_filter = if debug_logging { DEBUG_FILTER } else { DEFAULT_FILTER };

    // Console: compact format with structured fields inline
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );

    let initialized = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(console_fmt)
        .try_init()
        .is_ok();

    if initialized {
        tracing::info!(debug_logging, "Tracing initialized");
    }
    Ok(())
}

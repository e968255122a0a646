use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global JSON log subscriber. `RUST_LOG` overrides the
/// default filter, which keeps the query-level sqlx/sea-orm output down
/// while this crate logs at debug.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,backend=debug,sqlx=warn,sea_orm=warn"));

    let json_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .init();
}

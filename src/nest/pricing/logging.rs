use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::nest::pricing::error::{Result, ToolError};

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// default filter.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "nest_pricing=debug"
    } else {
        "nest_pricing=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

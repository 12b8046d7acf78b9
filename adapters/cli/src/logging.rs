use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` selects the filter unless `verbose` forces debug output.
pub(crate) fn init(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::Layer::new()
                .with_writer(std::io::stderr)
                .with_target(false),
        );

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")
}

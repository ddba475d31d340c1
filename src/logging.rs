use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber for the command-line tool.
///
/// `RUST_LOG` takes precedence over the `verbose` flag.
pub fn init_cli_logger(verbose: bool) {
    let default_filter = if verbose {
        "wpct=debug,wpct_core=debug,wpct_components=debug"
    } else {
        "wpct=info,wpct_core=warn,wpct_components=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

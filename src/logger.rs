use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "kino_program=debug,tower_http=debug,info"
    } else {
        "kino_program=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// JSON lines for serverless hosts that index structured logs.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .json(),
        )
        .init();
}

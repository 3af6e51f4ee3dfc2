use signal_router::{RouterConfig, SignalRouter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        r#"Signal Router - routing agent for SigmaGrid market signals

USAGE:
    signal-router [OPTIONS]

OPTIONS:
    --config <PATH>     JSON configuration file (env variables still override it)
    --help              Show this message

ENVIRONMENT VARIABLES:
    HOST                    Server host (default: 0.0.0.0)
    PORT                    Server port (default: 8000)
    SIGMAGRID_API_BASE      Upstream API base URL (default: https://api.sigmagrid.app)
    SIGMAGRID_TIMEOUT_MS    Per-request upstream timeout (default: 10000)
    RUST_LOG                Log level filter

EXAMPLES:
    signal-router
    signal-router --config router.json
    PORT=9000 SIGMAGRID_API_BASE=http://127.0.0.1:9100 signal-router
"#
    );
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Run { config_path: Option<String> },
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Command> {
    let mut config_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" => return Ok(Command::Help),
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a path argument"))?;
                config_path = Some(path);
            }
            other => anyhow::bail!("unknown argument: {}", other),
        }
    }
    Ok(Command::Run { config_path })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signal_router=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Help) => {
            print_help();
            return Ok(());
        }
        Ok(Command::Run { config_path }) => config_path,
        Err(e) => {
            print_help();
            return Err(e);
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            RouterConfig::from_file(&path)?
        }
        None => {
            tracing::info!("Using default configuration");
            RouterConfig::default()
        }
    };
    config.apply_env(|key| std::env::var(key).ok())?;
    config.validate()?;

    tracing::info!("Upstream: {}", config.upstream.base_url);
    tracing::info!("Upstream timeout: {}ms", config.upstream.timeout_ms);
    for (name, template) in config.upstream.endpoints.iter() {
        tracing::info!("  {:<10} {}", name, template);
    }
    tracing::info!("Available endpoints:");
    tracing::info!("  GET  /");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /route?ticker=TSLA");

    let router = SignalRouter::new(config)?;
    router.run().await
}

mod cli;
mod console;
mod decoder;
mod scan;
mod settings;
mod sign;

use scanlink_config::ScanlinkConfig;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "scanlink=info";

/// `--log-level` wins, then `[logging] level` from the config file.
fn log_directive(cli_level: Option<&str>, config: Option<&ScanlinkConfig>) -> String {
    match (cli_level, config) {
        (Some(level), _) if level.contains('=') => level.to_string(),
        (Some(level), _) => format!("scanlink={level}"),
        (None, Some(config)) => format!("scanlink={}", config.logging.level.as_directive()),
        (None, None) => DEFAULT_DIRECTIVE.to_string(),
    }
}

fn load_config(args: &cli::Args) -> Result<ScanlinkConfig, scanlink_common::ConfigError> {
    match &args.config {
        Some(path) => scanlink_config::load_config_from(path),
        None => scanlink_config::load_config(),
    }
}

#[tokio::main]
async fn main() {
    let args = cli::parse();

    // Config is loaded before logging so its level can apply; problems are
    // reported once the subscriber is up.
    let loaded = load_config(&args);

    let directive = log_directive(args.log_level.as_deref(), loaded.as_ref().ok());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| DEFAULT_DIRECTIVE.parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("scanlink v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        ScanlinkConfig::default()
    });

    let result = match args.command {
        cli::Command::Scan(scan_args) => scan::run(scan_args, &config).await,
        cli::Command::Sign(sign_args) => sign::run(sign_args, &config),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

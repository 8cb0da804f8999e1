use clap::Parser;
use repolens::cli::{Cli, Commands};
use repolens::types::config::Config;
use repolens::RepoLensResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> RepoLensResult<()> {
    let cli = Cli::parse();

    // .env is optional; real environment variables win
    let _ = dotenvy::dotenv();

    // Load configuration first (no logging yet)
    let config = if cli.config.exists() {
        Config::load(&cli.config).unwrap_or_else(|_| Config::default_config())
    } else {
        Config::default_config()
    };

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("repolens={}", log_level)
            .parse()
            .unwrap_or_else(|_| "repolens=info".parse().expect("fallback directive is valid")),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if config.general.log_format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Analyze { user, json } => {
            repolens::cli::commands::analyze(&user, json, &config).await?;
        }
        Commands::Init { path } => {
            repolens::cli::commands::init(path).await?;
        }
        Commands::Doctor => {
            repolens::cli::commands::doctor(&cli.config, &config).await?;
        }
        Commands::Version => {
            repolens::cli::commands::version();
        }
    }

    Ok(())
}

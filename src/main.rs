use clap::Parser;
use rso_status::cli::{Cli, Commands};
use rso_status::types::config::Config;
use rso_status::RsoResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> RsoResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default_config()
    };

    // CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("rso_status={}", log_level)
            .parse()
            .unwrap_or_else(|_| "rso_status=info".parse().expect("fallback directive is valid")),
    );

    if config.general.log_format == "json" {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Init { path } => {
            rso_status::cli::commands::init(path).await?;
        }
        Commands::Evaluate {
            rso,
            members,
            no_record,
            json,
        } => {
            rso_status::cli::commands::evaluate(rso, &members, no_record, json, &config).await?;
        }
        Commands::Status { rso } => {
            rso_status::cli::commands::status(rso, &config)?;
        }
        Commands::List { json } => {
            rso_status::cli::commands::list(json, &config)?;
        }
        Commands::Set { rso, status } => {
            rso_status::cli::commands::set(rso, &status, &config)?;
        }
        Commands::Clear { rso } => {
            rso_status::cli::commands::clear(rso, &config)?;
        }
        Commands::Version => {
            rso_status::cli::commands::version();
        }
    }

    Ok(())
}

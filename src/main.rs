use clap::Parser;
use mini_commerce::cli::{self, output, Cli};
use mini_commerce::config::{AppConfig, LoggingConfig};
use mini_commerce::error::{CommerceError, Result};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(2);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = cli::run(cli.command, &config, cli.json).await {
        error!("{}", e);
        // The failed order outcome has already been printed.
        if !matches!(e, CommerceError::OrderFailed(_)) {
            output::print_error(&e.user_message());
        }
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load_from(&cli.config)?;
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    config.validate().map_err(CommerceError::InvalidConfig)?;
    Ok(config)
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,mini_commerce={}", logging.level))
    });

    // stdout is reserved for command output
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

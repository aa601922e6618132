pub mod commands;
pub mod output;
pub mod shell;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::error::Result;
use output::OutputMode;

#[derive(Parser, Debug)]
#[command(name = "mini-commerce")]
#[command(version)]
#[command(about = "Browse the catalog and place orders against the store backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON instead of human-readable tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// Config directory
    #[arg(short, long, global = true, default_value = "config")]
    pub config: String,

    /// Backend base URL (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List products with price and stock
    Products,
    /// Place an order for one product
    Order {
        /// Product ID
        #[arg(long)]
        product: i64,
        /// Quantity (positive integer)
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        quantity: String,
        /// Resubmit this many times on failure, reusing the idempotency key
        #[arg(long, default_value_t = 0)]
        retries: u32,
    },
    /// Show one order
    OrderStatus {
        /// Order ID
        order_id: i64,
    },
    /// Interactive checkout shell
    Shell,
}

pub async fn run(command: Commands, config: &AppConfig, json: bool) -> Result<()> {
    let mode = OutputMode::from_json_flag(json);

    match command {
        Commands::Products => commands::list_products(config, mode).await,
        Commands::Order {
            product,
            quantity,
            retries,
        } => commands::place_order(config, product, &quantity, retries, mode).await,
        Commands::OrderStatus { order_id } => commands::order_status(config, order_id, mode).await,
        Commands::Shell => shell::run(config).await,
    }
}

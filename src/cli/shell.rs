//! `mini-commerce shell`: interactive checkout session.
//!
//! Each line is one user intent dispatched into a [`CheckoutSession`]; the
//! checkout panel is printed again after every command.

use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::output::{self, OutputMode};
use crate::adapters::HttpStoreClient;
use crate::checkout::{CheckoutSession, KeyGenerator, RandomKeyGenerator};
use crate::config::AppConfig;
use crate::error::Result;
use crate::store::StoreApi;

/// Internal CLI struct for shell parsing.
#[derive(Parser, Debug)]
#[command(name = "shop", no_binary_name = true, disable_help_subcommand = true)]
struct ShellCli {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    /// Show the product list
    #[command(alias = "ls")]
    List,
    /// Reload products from the backend
    Refresh,
    /// Select a product by id
    Select { id: i64 },
    /// Set the quantity text
    Qty {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Increase quantity
    Inc {
        #[arg(default_value_t = 1)]
        by: i64,
    },
    /// Decrease quantity
    Dec {
        #[arg(default_value_t = 1)]
        by: i64,
    },
    /// Place the order
    Place,
    /// Show the checkout panel
    Status,
}

/// Map `+`/`-` shorthands onto `inc`/`dec` before clap sees the line.
fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace()
        .enumerate()
        .map(|(i, word)| match (i, word) {
            (0, "+") => "inc".to_string(),
            (0, "-") => "dec".to_string(),
            _ => word.to_string(),
        })
        .collect()
}

fn parse_line(line: &str) -> std::result::Result<ShellCommand, clap::Error> {
    ShellCli::try_parse_from(tokenize(line)).map(|cli| cli.command)
}

pub async fn run(config: &AppConfig) -> Result<()> {
    let client = HttpStoreClient::from_config(&config.api)?;
    let keys = RandomKeyGenerator::new(config.checkout.key_format);
    let mut session = CheckoutSession::with_key_generator(client, keys);

    println!("\x1b[36mMini Commerce\x1b[0m");
    println!("Backend: {}", session.store().base_url());
    println!("Type 'help' for available commands, 'exit' to quit.");
    println!();

    if session.refresh_products().await.is_ok() {
        print_catalog(&session, config);
    }
    output::print_checkout(&session);

    let history_path = dirs::data_dir().map(|d| d.join("mini-commerce").join("history.txt"));

    let mut rl = DefaultEditor::new().map_err(|e| anyhow::anyhow!("readline init: {e}"))?;
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline("\x1b[36mshop>\x1b[0m ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match line {
                    "exit" | "quit" | "q" => break,
                    "help" | "?" => {
                        print_shell_help();
                        continue;
                    }
                    _ => {}
                }

                match parse_line(line) {
                    Ok(cmd) => dispatch(&mut session, cmd, config).await,
                    Err(e) => {
                        eprintln!("{e}");
                        continue;
                    }
                }
                output::print_checkout(&session);
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("readline error: {e}");
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.save_history(path);
    }

    Ok(())
}

async fn dispatch<S: StoreApi, K: KeyGenerator>(
    session: &mut CheckoutSession<S, K>,
    cmd: ShellCommand,
    config: &AppConfig,
) {
    match cmd {
        ShellCommand::List => print_catalog(session, config),
        ShellCommand::Refresh => {
            if session.refresh_products().await.is_ok() {
                print_catalog(session, config);
            }
        }
        ShellCommand::Select { id } => {
            if let Err(e) = session.select_product(id) {
                output::print_error(&e.to_string());
            }
        }
        ShellCommand::Qty { text } => session.set_quantity_text(text),
        ShellCommand::Inc { by } => session.step_quantity(by),
        ShellCommand::Dec { by } => session.step_quantity(by.saturating_neg()),
        ShellCommand::Place => {
            session.place_order().await;
        }
        ShellCommand::Status => {}
    }
}

fn print_catalog<S: StoreApi, K: KeyGenerator>(
    session: &CheckoutSession<S, K>,
    config: &AppConfig,
) {
    let _ = output::print_products(
        session.products(),
        session.selected_id(),
        config.catalog.low_stock_threshold,
        OutputMode::Table,
    );
}

fn print_shell_help() {
    println!("Available commands:");
    println!("  list | ls        show products");
    println!("  refresh          reload products");
    println!("  select <id>      choose a product");
    println!("  qty <n>          set quantity");
    println!("  + [n] | inc [n]  increase quantity");
    println!("  - [n] | dec [n]  decrease quantity");
    println!("  place            place the order");
    println!("  status           show checkout");
    println!("  help             (this message)");
    println!("  exit             (quit shell)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shorthands() {
        assert_eq!(parse_line("+").unwrap(), ShellCommand::Inc { by: 1 });
        assert_eq!(parse_line("- 3").unwrap(), ShellCommand::Dec { by: 3 });
        assert_eq!(parse_line("ls").unwrap(), ShellCommand::List);
    }

    #[test]
    fn qty_keeps_raw_text() {
        assert_eq!(
            parse_line("qty -2").unwrap(),
            ShellCommand::Qty {
                text: "-2".to_string()
            }
        );
        assert_eq!(
            parse_line("qty 2.5").unwrap(),
            ShellCommand::Qty {
                text: "2.5".to_string()
            }
        );
    }

    #[test]
    fn select_requires_numeric_id() {
        assert_eq!(parse_line("select 7").unwrap(), ShellCommand::Select { id: 7 });
        assert!(parse_line("select seven").is_err());
        assert!(parse_line("fly").is_err());
    }
}

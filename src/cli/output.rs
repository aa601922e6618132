//! Output formatting for storefront commands.
//!
//! Supports two modes: human-readable tables (default) and JSON (--json).

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::checkout::{CheckoutSession, KeyGenerator, OrderAttempt};
use crate::domain::{OrderDetails, Product};
use crate::error::Result;
use crate::format::format_money;
use crate::store::StoreApi;

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: String,
    #[tabled(rename = "")]
    selected: &'static str,
}

pub fn print_products(
    products: &[Product],
    selected_id: Option<i64>,
    low_stock_threshold: u32,
    mode: OutputMode,
) -> Result<()> {
    match mode {
        OutputMode::Json => print_json(&products),
        OutputMode::Table => {
            if products.is_empty() {
                println!("(no products)");
                return Ok(());
            }
            let rows: Vec<ProductRow> = products
                .iter()
                .map(|p| ProductRow {
                    id: p.id,
                    name: p.name.clone(),
                    price: format_money(p.price),
                    stock: p.stock_level(low_stock_threshold).to_string(),
                    selected: if Some(p.id) == selected_id {
                        "Selected"
                    } else {
                        ""
                    },
                })
                .collect();
            println!("{}", Table::new(rows));
            Ok(())
        }
    }
}

pub fn print_order_details(details: &OrderDetails, mode: OutputMode) -> Result<()> {
    match mode {
        OutputMode::Json => print_json(details),
        OutputMode::Table => {
            print_kv("Order", &details.id.to_string());
            print_kv("Product", &details.product_id.to_string());
            println!("{}", details_line(details));
            print_kv("Total", &format_money(details.total_price));
            Ok(())
        }
    }
}

fn details_line(details: &OrderDetails) -> String {
    format!(
        "Qty {} · Unit {} · Created {}",
        details.quantity,
        format_money(details.unit_price),
        details
            .created_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
    )
}

pub fn print_attempt(attempt: &OrderAttempt, mode: OutputMode) -> Result<()> {
    match mode {
        OutputMode::Json => print_json(attempt),
        OutputMode::Table => {
            match attempt {
                OrderAttempt::Idle => {}
                OrderAttempt::Placing => print_warn("Placing…"),
                OrderAttempt::Succeeded(confirmation) => {
                    print_success(&confirmation.message);
                    if let Some(details) = &confirmation.details {
                        println!("  {}", details_line(details));
                    }
                }
                OrderAttempt::Failed(msg) => print_error(msg),
            }
            Ok(())
        }
    }
}

/// Checkout panel: selection, quantity, total and the last outcome.
pub fn print_checkout<S: StoreApi, K: KeyGenerator>(session: &CheckoutSession<S, K>) {
    match session.selected_product() {
        Some(p) => println!(
            "{} · {} · Stock {}",
            p.name,
            format_money(p.price),
            p.stock
        ),
        None => println!("Select a product to begin."),
    }

    let total = session
        .total_preview()
        .map(format_money)
        .unwrap_or_else(|| "-".to_string());
    println!(
        "Qty: {:<6} Total: {:<10} {}",
        session.quantity_text(),
        total,
        if session.can_place() {
            "[place order]"
        } else {
            "[place order: disabled]"
        }
    );

    if let Some(msg) = session.catalog_error() {
        print_error(msg);
    }
    let _ = print_attempt(session.attempt(), OutputMode::Table);
}

fn print_json<T: Serialize + ?Sized>(item: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(item)?);
    Ok(())
}

/// Print a simple key-value pair.
pub fn print_kv(key: &str, value: &str) {
    println!("{key}: {value}");
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("\x1b[32m{msg}\x1b[0m");
}

/// Print a warning message.
pub fn print_warn(msg: &str) {
    println!("\x1b[33m{msg}\x1b[0m");
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("\x1b[31m{msg}\x1b[0m");
}

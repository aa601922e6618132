use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock at or below this count is shown as low.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 3;

/// Product snapshot as served by `GET /products`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

impl Product {
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    pub fn stock_level(&self, low_threshold: u32) -> StockLevel {
        StockLevel::classify(self.stock, low_threshold)
    }

    /// Price of `quantity` units
    pub fn total_for(&self, quantity: u32) -> Decimal {
        self.price * Decimal::from(quantity)
    }
}

/// Stock badge shown next to a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockLevel {
    OutOfStock,
    Low(u32),
    InStock(u32),
}

impl StockLevel {
    pub fn classify(stock: u32, low_threshold: u32) -> Self {
        match stock {
            0 => StockLevel::OutOfStock,
            n if n <= low_threshold => StockLevel::Low(n),
            n => StockLevel::InStock(n),
        }
    }
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockLevel::OutOfStock => write!(f, "Out of stock"),
            StockLevel::Low(n) => write!(f, "Low stock · {n}"),
            StockLevel::InStock(n) => write!(f, "In stock · {n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn deserializes_numeric_price() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[{"id":1,"name":"Widget","price":9.99,"stock":5}]"#,
        )
        .expect("product list should parse");

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, dec!(9.99));
        assert_eq!(products[0].total_for(3), dec!(29.97));
    }

    #[test]
    fn stock_level_boundaries() {
        assert_eq!(StockLevel::classify(0, 3), StockLevel::OutOfStock);
        assert_eq!(StockLevel::classify(1, 3), StockLevel::Low(1));
        assert_eq!(StockLevel::classify(3, 3), StockLevel::Low(3));
        assert_eq!(StockLevel::classify(4, 3), StockLevel::InStock(4));
        assert_eq!(StockLevel::Low(2).to_string(), "Low stock · 2");
    }
}

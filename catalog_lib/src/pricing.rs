//! Display pricing and stock availability.

use std::fmt;

use catalog_api::types::Product;

/// Units at or below which stock is reported as low.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Price after applying `discount_percentage`, rounded to cents. A missing,
/// zero, or negative discount leaves the listed price unchanged.
pub fn discounted_price(price: f64, discount_percentage: Option<f64>) -> f64 {
    match discount_percentage {
        Some(d) if d > 0.0 => round_cents(price * (1.0 - d / 100.0)),
        _ => price,
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a USD amount as `$1,234.50`.
pub fn format_currency(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Badge colour for a stock level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Green,
    Amber,
    Red,
}

/// Stock availability shown next to a product.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StockBadge {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockBadge {
    pub fn for_stock(stock: u32) -> Self {
        match stock {
            0 => StockBadge::OutOfStock,
            1..=LOW_STOCK_THRESHOLD => StockBadge::LowStock,
            _ => StockBadge::InStock,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockBadge::InStock => "In Stock",
            StockBadge::LowStock => "Low Stock",
            StockBadge::OutOfStock => "Out of Stock",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            StockBadge::InStock => Tone::Green,
            StockBadge::LowStock => Tone::Amber,
            StockBadge::OutOfStock => Tone::Red,
        }
    }
}

impl fmt::Display for StockBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Price fields of a product as a card or detail view shows them.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceTag {
    pub listed: f64,
    pub final_price: f64,
    /// Whole-percent discount, present only when a discount applies.
    pub discount: Option<u32>,
}

impl PriceTag {
    pub fn for_product(product: &Product) -> Self {
        let discount = product
            .discount_percentage
            .filter(|d| *d > 0.0)
            .map(|d| d.round() as u32);
        Self {
            listed: product.price,
            final_price: discounted_price(product.price, product.discount_percentage),
            discount,
        }
    }

    pub fn has_discount(&self) -> bool {
        self.discount.is_some()
    }
}

impl fmt::Display for PriceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_currency(self.final_price))?;
        if let Some(discount) = self.discount {
            write!(f, " (was {}, -{}%)", format_currency(self.listed), discount)?;
        }
        Ok(())
    }
}

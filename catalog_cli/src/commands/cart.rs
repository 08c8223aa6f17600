use anyhow::Result;
use clap::Subcommand;
use catalog_lib::{CartCounter, LocalStorage};

use crate::output::{print_json, OutputFormat};

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the number of items in the cart
    Show,
    /// Add one item to the cart
    Add,
}

pub fn run<S: LocalStorage>(
    action: &CartAction,
    cart: &CartCounter<S>,
    format: OutputFormat,
) -> Result<()> {
    let count = match action {
        CartAction::Show => cart.read(),
        CartAction::Add => cart.increment(),
    };
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({ "cart": count })),
        _ => println!("Cart: {}", count),
    }
    Ok(())
}

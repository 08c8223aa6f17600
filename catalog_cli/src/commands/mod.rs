//! CLI subcommand implementations.

pub mod browse;
pub mod cart;
pub mod categories;
pub mod product;
pub mod products;

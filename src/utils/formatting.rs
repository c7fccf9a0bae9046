use console::style;
use tabled::{
    settings::{Alignment, Style},
    Table, Tabled,
};

use crate::{
    models::Category,
    services::cart_view::CartSummary,
};

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "Plant")]
    name: String,
    #[tabled(rename = "Price")]
    cost: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "")]
    button: String,
}

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "Plant")]
    name: String,
    #[tabled(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Subtotal")]
    subtotal: String,
}

/// Label of a product's add control, as the catalog screen shows it.
pub fn add_button_label(added: bool) -> &'static str {
    if added {
        "Added to Cart"
    } else {
        "Add to Cart"
    }
}

pub fn format_category_table<F>(category: &Category, is_added: F) -> String
where
    F: Fn(&str) -> bool,
{
    let rows: Vec<ProductTableRow> = category
        .plants
        .iter()
        .map(|plant| ProductTableRow {
            name: plant.name.clone(),
            cost: plant.cost.to_string(),
            description: if plant.description.chars().count() > 50 {
                format!("{}...", plant.description.chars().take(47).collect::<String>())
            } else {
                plant.description.clone()
            },
            button: add_button_label(is_added(&plant.name)).to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    format!(
        "{}\n{}",
        style(&category.category).bold().green(),
        table
    )
}

pub fn format_cart_table(summary: &CartSummary, currency: &str) -> String {
    if summary.lines.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = summary
        .lines
        .iter()
        .map(|line| CartTableRow {
            name: line.name.clone(),
            unit_price: format!("{}{}", currency, line.unit_price),
            quantity: line.quantity,
            subtotal: format!("{}{}", currency, line.subtotal),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());
    table.to_string()
}

pub fn format_cart_header(summary: &CartSummary, currency: &str) -> String {
    format!(
        "{}: {}",
        style("Total Cart Amount").bold(),
        style(format!("{}{}", currency, summary.total_amount)).green()
    )
}

pub fn format_cart_footer(summary: &CartSummary) -> String {
    format!(
        "{}: {}",
        style("Total Quantity").bold(),
        style(summary.total_quantity).cyan()
    )
}

/// Navbar line with the cart badge, hidden when the cart is empty.
pub fn format_navbar(badge: Option<u64>) -> String {
    let cart = match badge {
        Some(count) => format!("Cart ({})", count),
        None => "Cart".to_string(),
    };
    format!(
        "{}  {}  |  {}",
        style("Paradise Nursery").bold().green(),
        style("Plants").dim(),
        style(cart).cyan()
    )
}

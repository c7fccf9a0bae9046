use regex::Regex;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::{
    models::{CartEntry, Cost},
    store::CartStore,
};

lazy_static::lazy_static! {
    static ref NON_NUMERIC: Regex = Regex::new(r"[^0-9.]").unwrap();
    static ref LEADING_DECIMAL: Regex = Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]+)").unwrap();
}

pub const CHECKOUT_MESSAGE: &str = "Functionality to be added for future reference";

/// Numeric value of a cost.
///
/// Text costs lose every character that is not a digit or a period, then the
/// longest leading decimal is read, so `"$1,299.50"` is 1299.5 and `"1.2.3"`
/// is 1.2. Nothing parseable gives NaN.
pub fn cost_of(cost: &Cost) -> f64 {
    match cost {
        Cost::Amount(amount) => *amount,
        Cost::Text(text) => parse_cost(text),
    }
}

pub fn parse_cost(raw: &str) -> f64 {
    let stripped = NON_NUMERIC.replace_all(raw, "");
    LEADING_DECIMAL
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Two decimal places; NaN and infinities are spelled out.
///
/// A value exactly halfway between two cents rounds away from zero, so
/// 0.125 is "0.13". Negative zero prints as "0.00".
pub fn format_amount(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        "0.00".to_string()
    } else if is_cent_tie(value) {
        let cents = (value.abs() * 100.0).floor() as u64 + 1;
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, cents / 100, cents % 100)
    } else {
        format!("{:.2}", value)
    }
}

/// An f64 lands exactly on a half cent only when it is an odd number of
/// eighths; scaling by 8 is exact.
fn is_cent_tie(value: f64) -> bool {
    let eighths = value.abs() * 8.0;
    eighths.fract() == 0.0 && eighths % 2.0 == 1.0
}

fn line_amount(entry: &CartEntry) -> f64 {
    cost_of(&entry.cost) * f64::from(entry.quantity)
}

pub fn unit_price(entry: &CartEntry) -> String {
    format_amount(cost_of(&entry.cost))
}

pub fn subtotal(entry: &CartEntry) -> String {
    format_amount(line_amount(entry))
}

/// Sum of unrounded line amounts, rounded once at the end.
pub fn cart_total(entries: &[CartEntry]) -> String {
    format_amount(entries.iter().map(line_amount).sum())
}

pub fn total_quantity(entries: &[CartEntry]) -> u64 {
    entries.iter().map(|e| u64::from(e.quantity)).sum()
}

pub fn increment(store: &mut CartStore, entry: &CartEntry) {
    store.update_quantity(&entry.name, entry.quantity.saturating_add(1));
}

/// The only path that takes a line below its current quantity; a line at 1
/// is removed instead of reaching 0.
pub fn decrement(store: &mut CartStore, entry: &CartEntry) {
    if entry.quantity > 1 {
        store.update_quantity(&entry.name, entry.quantity - 1);
    } else {
        store.remove_item(&entry.name);
    }
}

pub fn remove(store: &mut CartStore, entry: &CartEntry) {
    store.remove_item(&entry.name);
}

/// Shown to the user instead of running a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutNotice {
    pub message: String,
}

impl fmt::Display for CheckoutNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

pub fn checkout() -> CheckoutNotice {
    warn!("Checkout requested but not available");
    CheckoutNotice {
        message: CHECKOUT_MESSAGE.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub name: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub subtotal: String,
}

/// Everything the cart screen shows, computed from one snapshot of entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total_amount: String,
    pub total_quantity: u64,
}

pub fn summarize(entries: &[CartEntry]) -> CartSummary {
    let lines: Vec<CartLine> = entries
        .iter()
        .map(|entry| CartLine {
            name: entry.name.clone(),
            image: entry.image.clone(),
            unit_price: unit_price(entry),
            quantity: entry.quantity,
            subtotal: subtotal(entry),
        })
        .collect();

    let summary = CartSummary {
        lines,
        total_amount: cart_total(entries),
        total_quantity: total_quantity(entries),
    };
    debug!(
        "Cart summary: {} lines, total {}, quantity {}",
        summary.lines.len(),
        summary.total_amount,
        summary.total_quantity
    );
    summary
}

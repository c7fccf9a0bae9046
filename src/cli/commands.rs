use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Select};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::{
    catalog::{CatalogSource, EmbeddedCatalog, JsonFileCatalog},
    cli::args::Commands,
    services::{Gesture, Outcome, Storefront, View},
    utils::{
        formatting::{
            add_button_label, format_cart_footer, format_cart_header, format_cart_table,
            format_category_table, format_navbar,
        },
        Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static SEEDLING: Emoji<'_, '_> = Emoji("🌱 ", "");

const CATALOG_MENU: [&str; 3] = ["Add to cart", "View cart", "Quit"];
const CART_MENU: [&str; 6] = [
    "Increase quantity",
    "Decrease quantity",
    "Delete",
    "Checkout",
    "Continue shopping",
    "Quit",
];

pub struct CliApp {
    storefront: Storefront,
    config: Config,
}

impl CliApp {
    /// Load the catalog and open a fresh session. `catalog_override` wins over
    /// `CATALOG_PATH`; with neither, the built-in catalog is used.
    pub fn new(config: Config, catalog_override: Option<PathBuf>) -> Result<Self> {
        let source: Box<dyn CatalogSource> =
            match catalog_override.or_else(|| config.catalog_path.clone()) {
                Some(path) => Box::new(JsonFileCatalog::new(path)),
                None => Box::new(EmbeddedCatalog),
            };

        let catalog = source
            .load()
            .with_context(|| format!("Failed to load {}", source.describe()))?;
        info!(
            "Loaded {} products from {}",
            catalog.len(),
            source.describe()
        );

        Ok(Self {
            storefront: Storefront::new(catalog),
            config,
        })
    }

    pub fn storefront(&self) -> &Storefront {
        &self.storefront
    }

    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Catalog { category } => self.handle_catalog(category),
            Commands::Shop => self.handle_shop(),
            Commands::Replay { file, json } => self.handle_replay(&file, json),
        }
    }

    fn handle_catalog(&self, category: Option<String>) -> Result<()> {
        match category {
            Some(name) => match self.storefront.catalog().category(&name) {
                Some(category) => {
                    println!("{}", format_category_table(category, |p| self.storefront.is_added(p)));
                }
                None => {
                    println!("{} No category named '{}'", CROSS, style(name).red());
                }
            },
            None => self.render_catalog(),
        }
        Ok(())
    }

    fn handle_replay(&mut self, file: &Path, json: bool) -> Result<()> {
        let raw = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read script {}", file.display()))?;
        let gestures: Vec<Gesture> =
            serde_json::from_str(&raw).context("Script must be a JSON array of gestures")?;
        info!("Replaying {} gestures from {}", gestures.len(), file.display());

        let results = self.storefront.replay(gestures);
        if !json {
            for result in &results {
                match result {
                    Ok(outcome) => self.print_outcome(outcome),
                    Err(e) => println!("{} {}", CROSS, style(e).red()),
                }
            }
        }

        if json {
            let summary = self.storefront.summary();
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("Failed to encode cart")?
            );
        } else {
            self.render_cart();
        }
        Ok(())
    }

    fn handle_shop(&mut self) -> Result<()> {
        let theme = ColorfulTheme::default();
        println!("{} {}", SEEDLING, style("Welcome to Paradise Nursery").bold().green());
        println!("{}", style("Where Green Meets Serenity").italic().dim());

        loop {
            println!();
            println!("{}", format_navbar(self.storefront.badge()));

            match self.storefront.view() {
                View::Catalog => {
                    self.render_catalog();
                    let choice = Select::with_theme(&theme)
                        .with_prompt("What would you like to do?")
                        .items(&CATALOG_MENU)
                        .default(0)
                        .interact()?;

                    match choice {
                        0 => {
                            if let Some(name) = self.pick_product(&theme)? {
                                self.perform(Gesture::AddToCart { name });
                            }
                        }
                        1 => self.perform(Gesture::ShowCart),
                        _ => break,
                    }
                }
                View::Cart => {
                    self.render_cart();
                    let choice = Select::with_theme(&theme)
                        .with_prompt("What would you like to do?")
                        .items(&CART_MENU)
                        .default(0)
                        .interact()?;

                    match choice {
                        0..=2 => {
                            if let Some(name) = self.pick_entry(&theme)? {
                                let gesture = match choice {
                                    0 => Gesture::Increment { name },
                                    1 => Gesture::Decrement { name },
                                    _ => Gesture::Remove { name },
                                };
                                self.perform(gesture);
                            }
                        }
                        3 => self.perform(Gesture::Checkout),
                        4 => self.storefront.continue_shopping(),
                        _ => break,
                    }
                }
            }
        }

        println!("{} Thanks for visiting!", SEEDLING);
        info!("Session {} ended", self.storefront.session_id());
        Ok(())
    }

    fn pick_product(&self, theme: &ColorfulTheme) -> Result<Option<String>> {
        let products: Vec<_> = self.storefront.catalog().products().collect();
        let mut labels: Vec<String> = products
            .iter()
            .map(|p| {
                format!(
                    "{} ({}) - {}",
                    p.name,
                    p.cost,
                    add_button_label(self.storefront.is_added(&p.name))
                )
            })
            .collect();
        labels.push("Back".to_string());

        let choice = Select::with_theme(theme)
            .with_prompt("Pick a plant")
            .items(&labels)
            .default(0)
            .interact()?;

        Ok(products.get(choice).map(|p| p.name.clone()))
    }

    fn pick_entry(&self, theme: &ColorfulTheme) -> Result<Option<String>> {
        let entries = self.storefront.store().entries();
        if entries.is_empty() {
            println!("{} Your cart is empty", INFO);
            return Ok(None);
        }

        let mut labels: Vec<String> = entries
            .iter()
            .map(|e| format!("{} (x{})", e.name, e.quantity))
            .collect();
        labels.push("Back".to_string());

        let choice = Select::with_theme(theme)
            .with_prompt("Pick a cart item")
            .items(&labels)
            .default(0)
            .interact()?;

        Ok(entries.get(choice).map(|e| e.name.clone()))
    }

    fn perform(&mut self, gesture: Gesture) {
        match self.storefront.apply(gesture) {
            Ok(outcome) => self.print_outcome(&outcome),
            Err(e) => {
                println!("{} {}", CROSS, style(&e).red());
                error!("Gesture failed: {}", e);
            }
        }
    }

    fn print_outcome(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Added { name, .. } => {
                println!("{} {} added to cart", CHECKMARK, style(name).green());
            }
            Outcome::Updated { name, quantity } => {
                println!(
                    "{} {} quantity is now {}",
                    CHECKMARK,
                    style(name).green(),
                    style(quantity).cyan()
                );
            }
            Outcome::Removed { name } => {
                println!("{} {} removed from cart", CHECKMARK, style(name).green());
            }
            Outcome::Checkout(notice) => {
                println!("{} {}", WARNING, style(notice).yellow());
            }
            Outcome::Navigated(view) => {
                println!("{} Showing {:?}", INFO, view);
            }
        }
    }

    fn render_catalog(&self) {
        for category in self.storefront.catalog().categories() {
            println!(
                "{}",
                format_category_table(category, |p| self.storefront.is_added(p))
            );
        }
    }

    fn render_cart(&self) {
        let summary = self.storefront.summary();
        let currency = &self.config.currency_symbol;

        println!("{}", format_cart_header(&summary, currency));
        if summary.lines.is_empty() {
            println!("{} Your cart is empty", INFO);
        } else {
            println!("{}", format_cart_table(&summary, currency));
        }
        println!("{}", format_cart_footer(&summary));
    }
}

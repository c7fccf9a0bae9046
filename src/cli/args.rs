use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "paradise-nursery")]
#[command(about = "Paradise Nursery, where green meets serenity: browse plants and fill a cart")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog JSON file (overrides CATALOG_PATH)
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the plants for sale
    Catalog {
        /// Only show this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Start an interactive shopping session
    Shop,
    /// Replay a JSON script of gestures against a fresh cart
    Replay {
        /// Script file path
        file: PathBuf,
        /// Print the resulting cart as JSON
        #[arg(long)]
        json: bool,
    },
}

pub mod catalog;
pub mod cli;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

pub use anyhow::{Error, Result};

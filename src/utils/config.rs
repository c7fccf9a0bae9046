use std::env;
use std::path::PathBuf;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
    pub log_level: String,
    pub environment: String,
    pub currency_symbol: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config {
            catalog_path: lookup("CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            log_level: lookup("LOG_LEVEL").unwrap_or_default().to_lowercase(),
            environment: lookup("APP_ENV").unwrap_or("development".to_string()),
            currency_symbol: lookup("CURRENCY_SYMBOL").unwrap_or("$".to_string()),
        };

        if config.log_level.is_empty() {
            config.log_level = config.default_log_level().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(anyhow::anyhow!(
                "LOG_LEVEL must be one of {}",
                LOG_LEVELS.join(", ")
            ));
        }

        if self.currency_symbol.is_empty() {
            return Err(anyhow::anyhow!("CURRENCY_SYMBOL must not be empty"));
        }

        if let Some(path) = &self.catalog_path {
            if !path.is_file() {
                return Err(anyhow::anyhow!(
                    "CATALOG_PATH does not point to a file: {}",
                    path.display()
                ));
            }
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Level used when LOG_LEVEL is unset: quieter in production.
    fn default_log_level(&self) -> &'static str {
        if self.is_production() {
            "warn"
        } else {
            "info"
        }
    }
}

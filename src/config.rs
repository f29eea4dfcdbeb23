use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

/// Spreadsheet-as-API endpoint serving the mentor directory rows.
const DEFAULT_MENTOR_URL: &str =
    "https://api.sheetbest.com/sheets/d44f71d5-6c8c-4c03-aa04-42f263f8f6e0";

pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub mentor_url: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "1111"),
            data_dir: PathBuf::from(try_load::<String>("LGBTECH_DATA_DIR", "data")),
            mentor_url: try_load("LGBTECH_MENTOR_URL", DEFAULT_MENTOR_URL),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

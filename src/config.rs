use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};

const DEFAULT_IMAGE_DIR: &str = "images";
const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Runtime settings read from the environment (after `.env` is loaded).
///
/// The bot token itself is picked up by `Bot::from_env` from `TELOXIDE_TOKEN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_location: String,
    pub image_dir: PathBuf,
    pub download_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_location =
            lookup("DATABASE_LOCATION").context("DATABASE_LOCATION must be set")?;
        if database_location.trim().is_empty() {
            bail!("DATABASE_LOCATION must not be empty");
        }

        let image_dir = lookup("IMAGE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_DIR.to_string());

        let download_timeout_secs = match lookup("DOWNLOAD_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("DOWNLOAD_TIMEOUT_SECS is not a number: {:?}", raw))?,
            None => DEFAULT_DOWNLOAD_TIMEOUT_SECS,
        };
        if download_timeout_secs == 0 {
            bail!("DOWNLOAD_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            database_location,
            image_dir: PathBuf::from(image_dir),
            download_timeout: Duration::from_secs(download_timeout_secs),
        })
    }
}

//! Runtime configuration, resolved once at startup from the environment.

use anyhow::{bail, Context, Result};
use reqwest::Url;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub webhook_url: Url,
    pub port: u16,
    pub frontend_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_url = lookup("WEBHOOK_URL").context("WEBHOOK_URL is not set")?;
        let webhook_url = parse_webhook_url(&webhook_url)?;

        let port = match lookup("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT: {port}"))?,
            None => DEFAULT_PORT,
        };

        let frontend_dir = lookup("FRONTEND_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            webhook_url,
            port,
            frontend_dir,
        })
    }
}

fn parse_webhook_url(value: &str) -> Result<Url> {
    let url = Url::parse(value).with_context(|| format!("Invalid WEBHOOK_URL: {value}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => bail!("WEBHOOK_URL must be http or https, got: {scheme}"),
    }
}

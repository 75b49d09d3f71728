use std::env;

use anyhow::{Context, Result};
use clap::Parser;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Command-line flags; anything given here wins over the environment.
#[derive(Debug, Default, Parser)]
#[command(name = "recordkeeper")]
#[command(about = "In-memory rectangle, student and task records over HTTP")]
pub struct Cli {
    /// Interface to bind (overrides APP_HOST)
    #[arg(long)]
    pub host: Option<String>,
    /// Port to listen on (overrides APP_PORT / PORT)
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("APP_PORT").or_else(|| lookup("PORT")) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("APP_PORT/PORT must be a valid u16, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    pub fn with_overrides(mut self, cli: Cli) -> Self {
        if let Some(host) = cli.host {
            self.host = host;
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

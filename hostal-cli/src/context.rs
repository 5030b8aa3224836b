use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use hostal_core::{ApiClient, HostalConfig};
use tracing::debug;

/// Loaded configuration plus the API client every command talks through.
pub struct CliContext {
    pub config: HostalConfig,
    pub api: ApiClient,
}

impl CliContext {
    pub fn new(mut config: HostalConfig, api_url: Option<&str>) -> Result<Self> {
        if let Some(url) = api_url {
            config.api.base_url = url.to_string();
            config.validate().context("Invalid --api-url")?;
        }

        if !config.display.color {
            colored::control::set_override(false);
        }

        let api = ApiClient::from_config(&config.api)?;
        debug!(
            base_url = api.base_url(),
            authenticated = config.api.token.is_some(),
            page_size = config.display.page_size,
            "API client ready"
        );
        Ok(Self { config, api })
    }

    pub fn page_size(&self) -> u32 {
        self.config.display.page_size
    }

    pub fn money(&self, amount: f64) -> String {
        format!("{:.2} {}", amount, self.config.display.currency)
    }

    pub fn date(&self, date: Option<NaiveDate>) -> String {
        date.map(|d| d.format(&self.config.display.date_format).to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn timestamp(&self, at: Option<DateTime<Utc>>) -> String {
        at.map(|t| {
            format!(
                "{} {}",
                t.format(&self.config.display.date_format),
                t.format("%H:%M")
            )
        })
        .unwrap_or_else(|| "-".to_string())
    }
}

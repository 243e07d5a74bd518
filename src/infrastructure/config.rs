use crate::domain::charts::{ChartSpec, default_layout};
use crate::domain::series::DEFAULT_CAPACITY;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const MAX_HISTORY_SECONDS: u32 = 86_400;
const MAX_CHART_CAPACITY: usize = 86_400;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub vehicle: VehicleSettings,
    #[serde(default)]
    pub polling: PollingSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub charts: ChartSettings,
    #[serde(default)]
    pub render: RenderSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub listen: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct VehicleSettings {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

impl Default for VehicleSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_ms: 2000,
        }
    }
}

impl VehicleSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PollingSettings {
    pub hud_interval_ms: u64,
    pub chart_interval_ms: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            hud_interval_ms: 200,
            chart_interval_ms: 1000,
        }
    }
}

impl PollingSettings {
    pub fn hud_interval(&self) -> Duration {
        Duration::from_millis(self.hud_interval_ms)
    }

    pub fn chart_interval(&self) -> Duration {
        Duration::from_millis(self.chart_interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HistorySettings {
    pub seconds: u32,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { seconds: 600 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChartSettings {
    pub capacity: usize,
    pub layout: Option<Vec<ChartSpec>>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            layout: None,
        }
    }
}

impl ChartSettings {
    pub fn layout(&self) -> Vec<ChartSpec> {
        self.layout.clone().unwrap_or_else(default_layout)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RenderSettings {
    /// Whether the display can draw the 3D car; otherwise CSS fallback.
    pub webgl: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { webgl: true }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("history.seconds must be within 1..=86400, got {0}")]
    HistoryRange(u32),
    #[error("charts.capacity must be within 1..=86400, got {0}")]
    CapacityRange(usize),
    #[error("vehicle.base_url must not be empty")]
    EmptyBaseUrl,
}

impl ConsoleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vehicle.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.vehicle.request_timeout_ms == 0 {
            return Err(ConfigError::Zero("vehicle.request_timeout_ms"));
        }
        if self.polling.hud_interval_ms == 0 {
            return Err(ConfigError::Zero("polling.hud_interval_ms"));
        }
        if self.polling.chart_interval_ms == 0 {
            return Err(ConfigError::Zero("polling.chart_interval_ms"));
        }
        if !(1..=MAX_CHART_CAPACITY).contains(&self.charts.capacity) {
            return Err(ConfigError::CapacityRange(self.charts.capacity));
        }
        if !(1..=MAX_HISTORY_SECONDS).contains(&self.history.seconds) {
            return Err(ConfigError::HistoryRange(self.history.seconds));
        }
        Ok(())
    }
}

/// Optional `config/console.*` file, overridden by `CONSOLE__SECTION__KEY`
/// environment variables.
pub fn load_console_config() -> anyhow::Result<ConsoleConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/console").required(false))
        .add_source(
            config::Environment::with_prefix("CONSOLE")
                .separator("__")
                .try_parsing(true),
        );

    build_config(builder)
}

fn build_config(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<ConsoleConfig> {
    let settings = builder.build()?;
    let console: ConsoleConfig = settings.try_deserialize()?;
    console.validate()?;
    Ok(console)
}

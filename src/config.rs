use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::{InventoryPolicy, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub inventory: InventorySettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self { seed_demo_data: true }
    }
}

fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct InventorySettings {
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,
    #[serde(default = "default_expiring_soon_days")]
    pub expiring_soon_days: i64,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            low_stock_threshold: default_low_stock_threshold(),
            expiring_soon_days: default_expiring_soon_days(),
        }
    }
}

fn default_low_stock_threshold() -> u32 { 500 }
fn default_expiring_soon_days() -> i64 { 90 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_expiry_horizon_days")]
    pub expiry_horizon_days: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            expiry_horizon_days: default_expiry_horizon_days(),
        }
    }
}

fn default_expiry_horizon_days() -> f64 { 90.0 }

impl ScoringSettings {
    /// Reject settings that would make a match score non-finite or negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let horizon = self.expiry_horizon_days;
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(ConfigError::Message(format!(
                "scoring.expiry_horizon_days must be a positive number, got {}",
                horizon
            )));
        }

        let weights = [
            ("urgency", self.weights.urgency),
            ("expiry", self.weights.expiry),
            ("quantity", self.weights.quantity),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::Message(format!(
                    "scoring.weights.{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_urgency_weight")]
    pub urgency: f64,
    #[serde(default = "default_expiry_weight")]
    pub expiry: f64,
    #[serde(default = "default_quantity_weight")]
    pub quantity: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            urgency: default_urgency_weight(),
            expiry: default_expiry_weight(),
            quantity: default_quantity_weight(),
        }
    }
}

fn default_urgency_weight() -> f64 { 0.4 }
fn default_expiry_weight() -> f64 { 0.3 }
fn default_quantity_weight() -> f64 { 0.3 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MEDSHARE_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MEDSHARE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MEDSHARE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_platform_overrides(settings)?;

        let settings: Self = settings.try_deserialize()?;
        settings.scoring.validate()?;
        Ok(settings)
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights {
            urgency: self.scoring.weights.urgency,
            expiry: self.scoring.weights.expiry,
            quantity: self.scoring.weights.quantity,
            expiry_horizon_days: self.scoring.expiry_horizon_days,
        }
    }

    pub fn inventory_policy(&self) -> InventoryPolicy {
        InventoryPolicy {
            low_stock_threshold: self.inventory.low_stock_threshold,
            expiring_soon_days: self.inventory.expiring_soon_days,
        }
    }
}

/// Honour the bare PORT variable set by most container platforms
fn apply_platform_overrides(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(port) = std::env::var("PORT") {
        if let Ok(port) = port.parse::<u16>() {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
    }

    builder.build()
}

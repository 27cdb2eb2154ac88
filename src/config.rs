use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};


// TOML configuration structure
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct UiConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default values
fn default_endpoint() -> String {
    "http://localhost:8000/analyze".to_string()
}
fn default_locale() -> String {
    "fa".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}

static CONFIG: Lazy<Config> = Lazy::new(|| {
    load_config().unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config files: {}. Using defaults.",
            e
        );
        Config::default()
    })
});

static CONFIG_STORE: Lazy<Arc<Mutex<HashMap<String, String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(HashMap::new())));

pub fn get(name: &str) -> Result<String> {
    // Priority 1: CONFIG_STORE (runtime overrides)
    if let Some(value) = get_from_store(name) {
        if value.is_empty() {
            return Err(anyhow!("{} is empty", name));
        }
        return Ok(value);
    }

    // Priority 2: Environment variables
    if let Ok(val) = std::env::var(name)
        && !val.is_empty()
    {
        return Ok(val);
    }

    // Priority 3: TOML config
    let toml_value = lookup(&CONFIG, name);
    if let Some(value) = toml_value
        && !value.is_empty()
    {
        return Ok(value);
    }

    Err(anyhow!("Configuration key not found: {}", name))
}

pub fn set(name: &str, value: &str) {
    if let Ok(mut store) = CONFIG_STORE.lock() {
        store.insert(name.to_string(), value.to_string());
    }
}

pub fn unset(name: &str) {
    if let Ok(mut store) = CONFIG_STORE.lock() {
        store.remove(name);
    }
}

fn get_from_store(name: &str) -> Option<String> {
    if let Ok(store) = CONFIG_STORE.lock() {
        store.get(name).cloned()
    } else {
        None
    }
}

fn lookup(config: &Config, name: &str) -> Option<String> {
    match name {
        "ANALYZE_ENDPOINT" => Some(config.analysis.endpoint.clone()),
        "UI_LOCALE" => Some(config.ui.locale.clone()),
        "LOG_FORMAT" => Some(config.logging.format.clone()),
        _ => None,
    }
}

/// Load configuration from TOML files with priority:
/// 1. config/config.local.toml (git-ignored, for local overrides)
/// 2. config/config.toml (git-managed template)
/// 3. Default values
fn load_config() -> Result<Config> {
    load_config_from(Path::new("config"))
}

fn load_config_from(dir: &Path) -> Result<Config> {
    let mut config = Config::default();

    let base_path = dir.join("config.toml");
    if base_path.exists() {
        let content = fs::read_to_string(&base_path)?;
        config = toml::from_str(&content)?;
    }

    let local_path = dir.join("config.local.toml");
    if local_path.exists() {
        let content = fs::read_to_string(&local_path)?;
        let local: LocalConfig = toml::from_str(&content)?;
        merge_config(&mut config, local);
    }

    Ok(config)
}

// Local overrides only replace the keys they actually set
#[derive(Debug, Deserialize, Default)]
struct LocalConfig {
    #[serde(default)]
    analysis: LocalAnalysisConfig,
    #[serde(default)]
    ui: LocalUiConfig,
    #[serde(default)]
    logging: LocalLoggingConfig,
}

#[derive(Debug, Deserialize, Default)]
struct LocalAnalysisConfig {
    endpoint: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct LocalUiConfig {
    locale: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct LocalLoggingConfig {
    format: Option<String>,
}

fn merge_config(base: &mut Config, local: LocalConfig) {
    if let Some(endpoint) = local.analysis.endpoint {
        base.analysis.endpoint = endpoint;
    }
    if let Some(locale) = local.ui.locale {
        base.ui.locale = locale;
    }
    if let Some(format) = local.logging.format {
        base.logging.format = format;
    }
}

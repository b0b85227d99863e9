use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub check_in: CheckInConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NavigationConfig {
    /// Simulated page transition delay in milliseconds
    #[serde(default = "default_transition_delay_ms")]
    pub transition_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Byte cap for the in-memory session storage. Unlimited when absent.
    #[serde(default)]
    pub quota_bytes: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_otp_length")]
    pub otp_length: usize,

    #[serde(default = "default_organization_code_length")]
    pub organization_code_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_events_per_page")]
    pub events_per_page: usize,

    #[serde(default = "default_dashboard_items_per_page")]
    pub dashboard_items_per_page: usize,

    #[serde(default = "default_hero_count")]
    pub hero_count: usize,

    #[serde(default = "default_featured_count")]
    pub featured_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckInConfig {
    /// Delay before a camera scan resolves, in milliseconds
    #[serde(default = "default_scan_delay_ms")]
    pub scan_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// One of `pretty`, `compact` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Emit an event when each span closes.
    #[serde(default)]
    pub span_events: bool,
}

// Default value functions
fn default_transition_delay_ms() -> u64 {
    300
}
fn default_key_prefix() -> String {
    "hegira".to_string()
}
fn default_otp_length() -> usize {
    6
}
fn default_organization_code_length() -> usize {
    6
}
fn default_events_per_page() -> usize {
    9
}
fn default_dashboard_items_per_page() -> usize {
    10
}
fn default_hero_count() -> usize {
    3
}
fn default_featured_count() -> usize {
    6
}
fn default_scan_delay_ms() -> u64 {
    2000
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            transition_delay_ms: default_transition_delay_ms(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            quota_bytes: None,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            otp_length: default_otp_length(),
            organization_code_length: default_organization_code_length(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            events_per_page: default_events_per_page(),
            dashboard_items_per_page: default_dashboard_items_per_page(),
            hero_count: default_hero_count(),
            featured_count: default_featured_count(),
        }
    }
}

impl Default for CheckInConfig {
    fn default() -> Self {
        Self {
            scan_delay_ms: default_scan_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            span_events: false,
        }
    }
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with HEGIRA__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("HEGIRA").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Builds from embedded defaults so tests never touch config files.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [navigation]
            transition_delay_ms = 300

            [storage]
            key_prefix = "hegira"

            [auth]
            otp_length = 6
            organization_code_length = 6

            [catalog]
            events_per_page = 9
            dashboard_items_per_page = 10
            hero_count = 3
            featured_count = 6

            [check_in]
            scan_delay_ms = 2000

            [logging]
            level = "debug"
            format = "pretty"
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        // Validation is left to the caller so tests can build invalid configs.
        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.storage.key_prefix.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "HEGIRA__STORAGE__KEY_PREFIX cannot be empty".to_string(),
            ));
        }

        if self.catalog.events_per_page == 0 || self.catalog.dashboard_items_per_page == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "page size cannot be 0".to_string(),
            ));
        }

        if self.auth.otp_length == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "otp_length cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.navigation.transition_delay_ms)
    }

    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.check_in.scan_delay_ms)
    }
}

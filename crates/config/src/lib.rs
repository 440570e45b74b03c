use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "attendance.toml",
    "config/attendance.toml",
    "crates/config/attendance.toml",
    "../attendance.toml",
    "../config/attendance.toml",
    "../crates/config/attendance.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub messaging: MessagingConfig,
    #[serde(default)]
    pub aggregator: AggregatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://attendance.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Settings for the FCM HTTP v1 push provider.
///
/// Without both a project id and an access token the backend runs in dry-run
/// mode and only logs outgoing messages.
///
/// ```
/// use attendance_config::MessagingConfig;
///
/// let messaging = MessagingConfig::default();
/// assert_eq!(messaging.base_url, "https://fcm.googleapis.com");
/// assert_eq!(messaging.request_timeout_seconds, 10);
/// assert!(!messaging.is_configured());
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct MessagingConfig {
    #[serde(default = "MessagingConfig::default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "MessagingConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl MessagingConfig {
    fn default_base_url() -> String {
        "https://fcm.googleapis.com".to_string()
    }

    const fn default_request_timeout() -> u64 {
        10
    }

    pub fn is_configured(&self) -> bool {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
        present(&self.project_id) && present(&self.access_token)
    }
}

impl std::fmt::Debug for MessagingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagingConfig")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            project_id: None,
            access_token: None,
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

/// Schedule for the repeated-absence job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "AggregatorConfig::default_interval")]
    pub interval_seconds: u64,
}

impl AggregatorConfig {
    /// Longest accepted interval, one year.
    pub const MAX_INTERVAL_SECONDS: u64 = 365 * 86_400;

    const fn default_interval() -> u64 {
        86_400
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_seconds: Self::default_interval(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use attendance_config::load;
///
/// std::env::remove_var("ATTENDANCE_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("messaging.base_url", defaults.messaging.base_url.clone())?
        .set_default(
            "messaging.request_timeout_seconds",
            i64::try_from(defaults.messaging.request_timeout_seconds).unwrap_or(i64::MAX),
        )?
        .set_default("aggregator.enabled", defaults.aggregator.enabled)?
        .set_default(
            "aggregator.interval_seconds",
            i64::try_from(defaults.aggregator.interval_seconds).unwrap_or(i64::MAX),
        )?;

    let environment_overrides = config::Environment::with_prefix("ATTENDANCE").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ATTENDANCE_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ATTENDANCE_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.aggregator.interval_seconds == 0 {
        anyhow::bail!("aggregator.interval_seconds must be greater than zero");
    }
    if config.aggregator.interval_seconds > AggregatorConfig::MAX_INTERVAL_SECONDS {
        anyhow::bail!(
            "aggregator.interval_seconds must not exceed {} (one year)",
            AggregatorConfig::MAX_INTERVAL_SECONDS
        );
    }

    debug!(?config, "loaded backend configuration");
    Ok(config)
}

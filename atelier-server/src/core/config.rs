use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/atelier | Working directory (database, uploads, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | WHATSAPP_API_URL | (unset) | Messaging proxy base URL; notifier disabled when unset |
/// | WHATSAPP_LANGUAGE | en | Template language code |
/// | MEASUREMENT_VERSION_CAP | 10 | Versions retained per measurement |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory: database, uploaded images, logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Messaging proxy base URL; `None` disables outbound notifications
    pub whatsapp_api_url: Option<String>,
    /// Template language code sent with every notification
    pub whatsapp_language: String,
    /// Number of versions retained per measurement before pruning
    pub measurement_version_cap: u32,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/atelier".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            whatsapp_api_url: std::env::var("WHATSAPP_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            whatsapp_language: std::env::var("WHATSAPP_LANGUAGE").unwrap_or_else(|_| "en".into()),
            measurement_version_cap: std::env::var("MEASUREMENT_VERSION_CAP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Override the filesystem/network bits; used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// SQLite database file path
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database").join("atelier.db")
    }

    /// Directory for uploaded reference images
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }
}

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::{self, DbService};
use crate::notify::Notifier;

/// Server state - shared handles for all services
///
/// Cloning is cheap: the pool and notifier are reference-counted.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Status-transition notifier (fire-and-forget)
    pub notifier: Arc<Notifier>,
}

impl ServerState {
    /// Initialize server state:
    ///
    /// 1. Ensure the work directory structure exists
    /// 2. Open the database (runs migrations)
    /// 3. Seed display settings defaults
    /// 4. Build the notifier from config
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db_path = config.database_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::create_dir_all(config.uploads_dir())?;

        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        db::repository::settings::seed_defaults(&db_service.pool).await?;

        let notifier = Notifier::from_config(config);
        if notifier.is_enabled() {
            tracing::info!("Outbound notifications enabled");
        } else {
            tracing::info!("WHATSAPP_API_URL not set, outbound notifications disabled");
        }

        Ok(Self {
            config: config.clone(),
            pool: db_service.pool,
            notifier: Arc::new(notifier),
        })
    }

    /// Build state on top of an existing pool; used by tests.
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let notifier = Notifier::from_config(&config);
        Self {
            config,
            pool,
            notifier: Arc::new(notifier),
        }
    }
}

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::auth::password::hash_password;
use crate::config::Config;
use crate::error::Result;
use crate::storage::SqliteStore;
use crate::uploads::MediaStore;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// The relational store. Each request locks it for its read/write.
    pub store: Arc<Mutex<SqliteStore>>,
    /// Where uploaded media lives on disk.
    pub media: MediaStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: SqliteStore, media: MediaStore, config: Config) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            media,
            config: Arc::new(config),
        }
    }

    /// Open the database, seed the admin account and prepare the media
    /// directory.
    pub async fn bootstrap(config: Config) -> Result<Self> {
        let store = SqliteStore::open(&config.database)?;
        info!(path = %config.database.display(), "Database opened");

        seed_admin(&store, &config)?;

        let media = MediaStore::new(config.upload_dir.clone()).await?;
        Ok(Self::new(store, media, config))
    }
}

/// Create the admin account from config when it does not exist yet.
pub fn seed_admin(store: &SqliteStore, config: &Config) -> Result<bool> {
    if store.find_user_by_username(&config.admin_username)?.is_some() {
        return Ok(false);
    }

    let hash = hash_password(&config.admin_password)?;
    let created = store.ensure_admin(&config.admin_username, &hash)?;
    if created {
        info!(username = %config.admin_username, "Seeded admin account");
        if config.uses_default_admin_password() {
            warn!("Admin account was seeded with the default password; change it from the admin panel");
        }
    }
    Ok(created)
}

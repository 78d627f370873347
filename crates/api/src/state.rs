use std::sync::Arc;

use crate::config::ServerConfig;
use crate::image_check::ImageUrlChecker;
use crate::invitation::InvitationMailer;
use crate::storage::{LocalStorage, StorageBackend};

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is already a handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: rouge_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Media object store.
    pub storage: Arc<dyn StorageBackend>,
    /// Validates externally hosted image URLs.
    pub image_checker: Arc<ImageUrlChecker>,
    /// Delivers invitation emails (SMTP, or the log mailer in development).
    pub mailer: Arc<dyn InvitationMailer>,
}

impl AppState {
    /// Wire the state from configuration, with local filesystem storage
    /// rooted at `STORAGE_DIR`.
    pub fn new(
        pool: rouge_db::DbPool,
        config: ServerConfig,
        mailer: Arc<dyn InvitationMailer>,
    ) -> Self {
        let storage = Arc::new(LocalStorage::new(&config.storage_dir));
        let image_checker = Arc::new(ImageUrlChecker::new(&config.image_check));
        Self {
            pool,
            config: Arc::new(config),
            storage,
            image_checker,
            mailer,
        }
    }
}

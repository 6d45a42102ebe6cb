use std::path::Path;
use std::sync::Arc;

use storage::Storage;

use crate::Clock;
use crate::config::PracticeConfig;
use crate::error::AppServicesError;
use crate::sessions::PracticeService;

/// Assembles storage and the practice session for a front end.
///
/// Construct once at startup and call [`PracticeServices::shutdown`] before
/// exit so queued snapshots reach storage.
#[derive(Clone)]
pub struct PracticeServices {
    storage: Storage,
    practice: Arc<PracticeService>,
}

impl PracticeServices {
    /// Build services backed by `SQLite` at `config.db_url()`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database file cannot be prepared or
    /// storage initialization fails.
    pub async fn new_sqlite(
        clock: Clock,
        config: &PracticeConfig,
    ) -> Result<Self, AppServicesError> {
        prepare_sqlite_file(config.db_url())?;
        let storage = Storage::sqlite(config.db_url()).await?;
        Ok(Self::with_storage(clock, storage, config).await)
    }

    /// Build services over a throwaway in-memory store.
    pub async fn in_memory(clock: Clock, config: &PracticeConfig) -> Self {
        Self::with_storage(clock, Storage::in_memory(), config).await
    }

    pub async fn with_storage(clock: Clock, storage: Storage, config: &PracticeConfig) -> Self {
        let practice = Arc::new(
            PracticeService::open(clock, Arc::clone(&storage.session), config).await,
        );
        Self { storage, practice }
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Flush the session to storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Practice` if the snapshot writer failed.
    pub async fn shutdown(&self) -> Result<(), AppServicesError> {
        self.practice.close().await?;
        Ok(())
    }
}

/// Make sure the file behind a `sqlite://` URL exists so the pool can open it.
fn prepare_sqlite_file(db_url: &str) -> Result<(), AppServicesError> {
    if db_url == "sqlite::memory:" || db_url.contains("mode=memory") {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| AppServicesError::InvalidDbUrl(db_url.to_string()))?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(AppServicesError::InvalidDbUrl(db_url.to_string()));
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_urls_need_no_file() {
        prepare_sqlite_file("sqlite::memory:").unwrap();
        prepare_sqlite_file("sqlite:file:memdb?mode=memory&cache=shared").unwrap();
    }

    #[test]
    fn non_sqlite_urls_are_rejected() {
        let err = prepare_sqlite_file("postgres://localhost/db").unwrap_err();
        assert!(matches!(err, AppServicesError::InvalidDbUrl(_)));
        let err = prepare_sqlite_file("sqlite://?mode=rwc").unwrap_err();
        assert!(matches!(err, AppServicesError::InvalidDbUrl(_)));
    }
}

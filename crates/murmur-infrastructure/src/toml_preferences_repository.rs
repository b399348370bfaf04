//! TOML-file preferences repository.
//!
//! Persists the preference snapshot under the platform config directory.
//! File I/O runs in a blocking task so callers never stall the async runtime
//! on disk access.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use murmur_core::error::{MurmurError, Result};
use murmur_core::preferences::{Preferences, PreferencesRepository};

use crate::paths::MurmurPaths;
use crate::storage::AtomicTomlFile;

/// `PreferencesRepository` backed by a TOML snapshot file.
pub struct TomlPreferencesRepository {
    file: Arc<AtomicTomlFile<Preferences>>,
}

impl TomlPreferencesRepository {
    /// Creates a repository at the default platform location.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform config directory cannot be
    /// determined.
    pub fn new() -> Result<Self> {
        Ok(Self::at_path(MurmurPaths::preferences_file()?))
    }

    /// Creates a repository at an explicit path.
    pub fn at_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        }
    }
}

#[async_trait]
impl PreferencesRepository for TomlPreferencesRepository {
    async fn load(&self) -> Result<Option<Preferences>> {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| MurmurError::internal(format!("failed to join blocking task: {e}")))?
    }

    async fn save(&self, preferences: &Preferences) -> Result<()> {
        let file = self.file.clone();
        let snapshot = preferences.clone();
        debug!("persisting preference snapshot");
        tokio::task::spawn_blocking(move || file.save(&snapshot))
            .await
            .map_err(|e| MurmurError::internal(format!("failed to join blocking task: {e}")))?
    }
}

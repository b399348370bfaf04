//! Preferences repository trait.

use async_trait::async_trait;

use super::model::Preferences;
use crate::error::Result;

/// Opaque persistence capability for the preference snapshot.
///
/// The store only ever saves or loads the whole snapshot; how and where it is
/// stored (TOML file, browser storage, key-value service) is the
/// implementation's concern.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Loads the persisted snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Preferences))`: A snapshot was found
    /// - `Ok(None)`: Nothing persisted yet (first run)
    /// - `Err(_)`: Error occurred during retrieval
    async fn load(&self) -> Result<Option<Preferences>>;

    /// Persists the snapshot, replacing any previous one.
    async fn save(&self, preferences: &Preferences) -> Result<()>;
}

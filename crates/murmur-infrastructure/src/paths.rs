//! Unified path management for murmur client files.
//!
//! The only durable client state is the preference snapshot; conversations
//! are always re-fetched from the gateway on startup.

use std::path::PathBuf;

use murmur_core::error::{MurmurError, Result};

/// Unified path management for murmur.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/murmur/            # Config directory (XDG on Linux)
/// └── preferences.toml         # Persisted user preferences
/// ```
pub struct MurmurPaths;

impl MurmurPaths {
    /// Returns the murmur configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an IO error when the platform config directory cannot be
    /// determined.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("murmur"))
            .ok_or_else(|| MurmurError::io("cannot determine config directory"))
    }

    /// Returns the path to the preference snapshot.
    pub fn preferences_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("preferences.toml"))
    }
}

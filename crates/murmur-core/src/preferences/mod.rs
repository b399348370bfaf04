//! Preference sub-state: models and persistence contract.

mod model;
mod repository;

pub use model::{CodeTheme, FontSize, MessageSpacing, Preferences, PreferencesUpdate, Theme};
pub use repository::PreferencesRepository;

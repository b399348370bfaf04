//! User preference domain models.
//!
//! Preferences are the only client state that survives a restart; everything
//! conversation-shaped is re-fetched from the gateway on startup.

use serde::{Deserialize, Serialize};

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the operating system setting.
    #[default]
    System,
}

/// Base font size preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Sm,
    #[default]
    Md,
    Lg,
}

/// Vertical spacing between messages in the thread view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageSpacing {
    Compact,
    #[default]
    Comfortable,
}

/// Syntax highlighting theme for code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CodeTheme {
    #[default]
    Github,
    Dracula,
}

/// User preferences.
///
/// Initialized to defaults on first run and mutated only through
/// [`Preferences::merge`], which shallow-merges the supplied fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default)]
    pub message_spacing: MessageSpacing,
    #[serde(default)]
    pub code_theme: CodeTheme,
}

/// Partial preference update; only supplied fields are applied.
#[derive(Debug, Clone, Default)]
pub struct PreferencesUpdate {
    pub theme: Option<Theme>,
    pub font_size: Option<FontSize>,
    pub message_spacing: Option<MessageSpacing>,
    pub code_theme: Option<CodeTheme>,
}

impl Preferences {
    /// Shallow-merges the supplied fields into this preference set.
    pub fn merge(&mut self, update: PreferencesUpdate) {
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(font_size) = update.font_size {
            self.font_size = font_size;
        }
        if let Some(message_spacing) = update.message_spacing {
            self.message_spacing = message_spacing;
        }
        if let Some(code_theme) = update.code_theme {
            self.code_theme = code_theme;
        }
    }
}

//! Conversation domain model.
//!
//! This module contains the core Conversation entity that the store operates
//! on, plus the partial-update type used for shallow merges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::Message;

/// Model identifier used when the server omits one.
pub const DEFAULT_MODEL: &str = "gemini";

pub(crate) fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// A single conversation owned by a user.
///
/// Identifiers are opaque, unique across the whole collection, and stable for
/// the conversation's lifetime. `updated_at` is bumped on every mutation to
/// the conversation or its messages and never moves backwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation identifier.
    pub id: String,
    /// Owner reference.
    pub user_id: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Message sequence in insertion order.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Identifier of the currently selected model.
    #[serde(default = "default_model")]
    pub model: String,
    /// Whether the user pinned this conversation as a favorite.
    #[serde(default)]
    pub favorite: bool,
    /// Timestamp when the conversation was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last mutation to the conversation or its messages.
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Bumps `updated_at`, keeping it monotonically non-decreasing.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    /// Returns the most recent message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Partial update for a conversation.
///
/// Only the supplied fields are merged into the target; everything else is
/// left untouched.
#[derive(Debug, Clone, Default)]
pub struct ConversationUpdate {
    pub title: Option<String>,
    pub model: Option<String>,
    pub favorite: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn conversation(updated_at: DateTime<Utc>) -> Conversation {
        Conversation {
            id: "conv-1".to_string(),
            user_id: "user-1".to_string(),
            title: String::new(),
            messages: Vec::new(),
            model: DEFAULT_MODEL.to_string(),
            favorite: false,
            created_at: updated_at,
            updated_at,
        }
    }

    #[test]
    fn test_touch_never_moves_backwards() {
        let now = Utc::now();
        let mut conv = conversation(now);

        conv.touch(now - Duration::seconds(10));
        assert_eq!(conv.updated_at, now);

        let later = now + Duration::seconds(5);
        conv.touch(later);
        assert_eq!(conv.updated_at, later);
    }

    #[test]
    fn test_decodes_sparse_list_entry() {
        // List responses may omit messages, model, and the favorite flag.
        let json = r#"{
            "id": "conv-9",
            "user_id": "user-1",
            "title": "Trip planning",
            "created_at": "2025-04-02T10:00:00Z",
            "updated_at": "2025-04-02T10:05:00Z"
        }"#;

        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert!(conv.messages.is_empty());
        assert!(!conv.favorite);
        assert_eq!(conv.model, DEFAULT_MODEL);
    }
}

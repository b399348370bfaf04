//! Conversation message types.
//!
//! This module contains types for representing messages in a conversation,
//! including roles, citations, and attachments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::default_model;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
    /// System-generated message.
    System,
}

/// A source citation attached to a message by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub id: String,
    /// Display text for the citation.
    pub text: String,
    pub url: String,
}

/// Kind of an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    File,
}

/// A file or image attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
    pub name: String,
}

/// A single message in a conversation.
///
/// Messages are append-only from the client's perspective: once accepted into
/// a conversation's sequence they are never reordered, only replaced wholesale
/// when the server-confirmed list supersedes the local one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier within the owning conversation.
    pub id: String,
    /// The conversation this message belongs to.
    pub conversation_id: String,
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message. May contain embedded structured segments
    /// such as fenced code blocks; rendering them is the view's concern.
    pub content: String,
    /// Identifier of the model that originated the message.
    #[serde(default = "default_model")]
    pub model: String,
    /// Timestamp when the message was created.
    pub created_at: DateTime<Utc>,
    /// Source citations injected by the server, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<Citation>>,
    /// Attachments uploaded alongside the message, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl Message {
    /// Synthesizes a local user message for optimistic display.
    ///
    /// The message gets a fresh unique identifier and the current timestamp so
    /// it is visible immediately, independent of the network round trip.
    pub fn user(conversation_id: &str, content: &str, model: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            conversation_id: conversation_id.to_string(),
            role: MessageRole::User,
            content: content.to_string(),
            model: model.to_string(),
            created_at: Utc::now(),
            citations: None,
            attachments: None,
        }
    }
}

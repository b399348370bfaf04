//! Conversation domain module.
//!
//! This module contains the conversation and message domain models, the
//! canonical collection ordering, and the conversation store itself.
//!
//! # Module Structure
//!
//! - `model`: Core conversation entity (`Conversation`, `ConversationUpdate`)
//! - `message`: Message types (`Message`, `MessageRole`, `Citation`, `Attachment`)
//! - `ordering`: Pure collection normalizer (`reorder`)
//! - `store`: The observable state container (`ConversationStore`)

mod message;
mod model;
mod ordering;
mod store;

// Re-export public API
pub use message::{Attachment, AttachmentKind, Citation, Message, MessageRole};
pub use model::{Conversation, ConversationUpdate, DEFAULT_MODEL};
pub use ordering::reorder;
pub use store::{ConversationStore, StoreConfig};

//! Remote chat gateway trait.
//!
//! Defines the contract the backing chat service must satisfy. The store
//! consumes this interface only; it never implements server behavior itself.

use async_trait::async_trait;

use crate::conversation::{Conversation, Message};
use crate::error::Result;

/// An abstract gateway to the remote chat service.
///
/// Every call is a single request/response: no streaming, no partial
/// delivery. The list operations are safe to re-trigger; the store never
/// retries `create_conversation` or `send_message` automatically because a
/// blind retry risks duplicate server-side effects.
///
/// # Implementation Notes
///
/// Implementations should attach the caller's bearer credential per request
/// and map a rejected credential to [`MurmurError::Unauthorized`] after
/// invalidating the stored token.
///
/// [`MurmurError::Unauthorized`]: crate::error::MurmurError::Unauthorized
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Fetches the authoritative conversation collection.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Conversation>)`: All conversations owned by the caller
    /// - `Err(_)`: Error occurred during retrieval
    async fn list_conversations(&self) -> Result<Vec<Conversation>>;

    /// Creates a new, empty conversation.
    ///
    /// # Returns
    ///
    /// - `Ok(Conversation)`: The server-assigned conversation
    /// - `Err(_)`: Error occurred during creation
    async fn create_conversation(&self) -> Result<Conversation>;

    /// Deletes a conversation.
    ///
    /// # Arguments
    ///
    /// * `conversation_id` - The ID of the conversation to delete
    async fn delete_conversation(&self, conversation_id: &str) -> Result<()>;

    /// Sends a user message and returns the assistant reply text.
    ///
    /// The reply text is informational only; callers are expected to fetch
    /// the confirmed message list afterwards, since the server may reorder or
    /// enrich messages (e.g. inject citations) while producing the reply.
    ///
    /// # Arguments
    ///
    /// * `model` - Identifier of the model to generate the reply with
    /// * `content` - The user message content
    /// * `conversation_id` - The target conversation
    async fn send_message(
        &self,
        model: &str,
        content: &str,
        conversation_id: &str,
    ) -> Result<String>;

    /// Fetches the authoritative message list for a conversation.
    ///
    /// # Arguments
    ///
    /// * `conversation_id` - The conversation whose messages to fetch
    async fn list_messages(&self, conversation_id: &str) -> Result<Vec<Message>>;

    /// Propagates a title change to the server.
    ///
    /// Callers treat this as best-effort; a failure leaves the local title in
    /// place.
    ///
    /// # Arguments
    ///
    /// * `conversation_id` - The conversation to rename
    /// * `title` - The new title
    async fn rename_conversation(&self, conversation_id: &str, title: &str) -> Result<()>;
}

//! The conversation store.
//!
//! `ConversationStore` is the single state container behind the chat UI. It
//! owns every conversation and message entity, applies optimistic local
//! mutations before the gateway confirms them, reconciles with
//! server-confirmed data, and keeps the collection ordering and
//! de-duplication invariants stable while remote calls are in flight.
//!
//! The view layer never mutates state directly: it calls the operations here
//! and re-reads through the accessors whenever the revision channel ticks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::{RwLock, watch};
use tracing::{debug, warn};

use crate::error::{MurmurError, Result};
use crate::gateway::ChatGateway;
use crate::preferences::{Preferences, PreferencesRepository, PreferencesUpdate};
use crate::user::UserProfile;

use super::message::Message;
use super::model::{Conversation, ConversationUpdate};
use super::ordering::reorder;

/// Tuning knobs for the store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Minimum interval between successful conversation creations. Rapid
    /// repeated triggers (double-click, re-render storms) inside this window
    /// return the current selection instead of issuing another remote call.
    pub creation_cooldown: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            creation_cooldown: Duration::from_secs(2),
        }
    }
}

/// Mutable store state, guarded by a single lock.
///
/// The in-flight flags (`processing`, `creating`, `fetching_list`) are
/// non-reentrant locks scoped to their operations: they are checked and set
/// inside the same write-lock critical section, so a redundant concurrent
/// trigger can never issue a duplicate remote call.
struct StoreState {
    /// All conversations, kept in canonical display order.
    conversations: Vec<Conversation>,
    /// Identifier of the active conversation. Always names an entry in
    /// `conversations`, or is `None`; never a dangling id.
    selection: Option<String>,
    /// A send-message cycle is awaiting its reply.
    processing: bool,
    /// A create call is outstanding.
    creating: bool,
    /// A list refresh is outstanding.
    fetching_list: bool,
    /// When the last conversation creation succeeded.
    last_created_at: Option<Instant>,
    /// The authenticated user, as reported by the auth collaborator.
    user: Option<UserProfile>,
}

impl StoreState {
    fn position(&self, conversation_id: &str) -> Option<usize> {
        self.conversations
            .iter()
            .position(|conversation| conversation.id == conversation_id)
    }

    fn resort(&mut self) {
        self.conversations = reorder(std::mem::take(&mut self.conversations));
    }

    /// Re-validates the selection after a wholesale replacement. A selection
    /// pointing at a vanished conversation falls back to the first entry of
    /// the sorted collection, or to none.
    fn ensure_valid_selection(&mut self) {
        let dangling = self
            .selection
            .as_deref()
            .is_some_and(|id| self.position(id).is_none());
        if dangling {
            self.selection = self
                .conversations
                .first()
                .map(|conversation| conversation.id.clone());
        }
    }
}

/// Observable state container for all conversation and preference state.
///
/// Constructed explicitly and shared by reference with the view layer; there
/// is no ambient global. Change notification is an explicit observer
/// interface: [`subscribe`](Self::subscribe) hands out a watch receiver whose
/// value ticks after every committed mutation.
pub struct ConversationStore {
    state: RwLock<StoreState>,
    preferences: RwLock<Preferences>,
    gateway: Arc<dyn ChatGateway>,
    preferences_repository: Arc<dyn PreferencesRepository>,
    config: StoreConfig,
    revision: watch::Sender<u64>,
}

impl ConversationStore {
    /// Creates a store with the default configuration.
    pub fn new(
        gateway: Arc<dyn ChatGateway>,
        preferences_repository: Arc<dyn PreferencesRepository>,
    ) -> Self {
        Self::with_config(gateway, preferences_repository, StoreConfig::default())
    }

    /// Creates a store with an explicit configuration.
    pub fn with_config(
        gateway: Arc<dyn ChatGateway>,
        preferences_repository: Arc<dyn PreferencesRepository>,
        config: StoreConfig,
    ) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: RwLock::new(StoreState {
                conversations: Vec::new(),
                selection: None,
                processing: false,
                creating: false,
                fetching_list: false,
                last_created_at: None,
                user: None,
            }),
            preferences: RwLock::new(Preferences::default()),
            gateway,
            preferences_repository,
            config,
            revision,
        }
    }

    /// Subscribes to change notifications.
    ///
    /// The carried value is a revision counter; subscribers re-read the store
    /// through the accessors whenever it changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Loads persisted preferences and fetches the initial conversation
    /// collection.
    ///
    /// Conversations are never cached across restarts, so startup is a plain
    /// refresh; only the preference snapshot is restored. Both failure modes
    /// leave the store in a consistent default state.
    pub async fn initialize(&self) {
        match self.preferences_repository.load().await {
            Ok(Some(saved)) => {
                *self.preferences.write().await = saved;
                self.notify();
            }
            Ok(None) => {}
            Err(e) => warn!("failed to load preferences, using defaults: {e}"),
        }

        self.refresh().await;
    }

    /// Fetches the authoritative conversation collection and replaces local
    /// state wholesale.
    ///
    /// Concurrent refresh requests collapse into one: a second caller while a
    /// fetch is outstanding is a no-op, not queued. A successful refresh also
    /// clears any stale creation state left over from an aborted create.
    /// Failures are logged and swallowed; the view keeps showing the stale
    /// but consistent collection.
    pub async fn refresh(&self) {
        {
            let mut state = self.state.write().await;
            if state.fetching_list {
                debug!("refresh already in flight, ignoring");
                return;
            }
            state.fetching_list = true;
        }

        let fetched = self.gateway.list_conversations().await;

        let mut state = self.state.write().await;
        state.fetching_list = false;
        match fetched {
            Ok(conversations) => {
                state.conversations = reorder(conversations);
                state.creating = false;
                state.last_created_at = None;
                state.ensure_valid_selection();
                drop(state);
                self.notify();
            }
            Err(e) => {
                drop(state);
                warn!("failed to refresh conversations: {e}");
            }
        }
    }

    /// Creates a new conversation and selects it.
    ///
    /// Two independent debounces guard this: an in-flight flag against
    /// overlapping calls, and a creation cooldown against rapid repeated
    /// triggers. When either guard fires the current selection is returned
    /// unchanged and no remote call is issued.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error when creation fails; no conversation is
    /// added in that case.
    pub async fn create_conversation(&self) -> Result<Option<String>> {
        {
            let mut state = self.state.write().await;
            if state.creating {
                debug!("create already in flight, returning current selection");
                return Ok(state.selection.clone());
            }
            if let Some(stamp) = state.last_created_at {
                if stamp.elapsed() < self.config.creation_cooldown {
                    debug!("create cooldown active, returning current selection");
                    return Ok(state.selection.clone());
                }
            }
            state.creating = true;
        }

        let created = self.gateway.create_conversation().await;

        let mut state = self.state.write().await;
        state.creating = false;
        match created {
            Ok(conversation) => {
                let id = conversation.id.clone();
                state.conversations.push(conversation);
                state.resort();
                state.selection = Some(id.clone());
                state.last_created_at = Some(Instant::now());
                drop(state);
                self.notify();
                Ok(Some(id))
            }
            Err(e) => {
                drop(state);
                Err(e)
            }
        }
    }

    /// Sends a user message in the selected conversation.
    ///
    /// The user's message is appended locally before the remote call is
    /// issued, so it is visible with zero latency. After the server accepts
    /// it, the confirmed message list replaces the local one wholesale: the
    /// server may reorder, filter, or enrich messages (citations are injected
    /// server-side) while producing the assistant reply, so patching in the
    /// reply alone would drift. The client never synthesizes assistant
    /// content itself.
    ///
    /// Without a selection, with a selection that vanished locally, or while
    /// a previous send is still in flight, this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for empty content before any remote call. A
    /// failed remote call is propagated to the caller; the optimistic user
    /// message stays in place either way, and the processing flag is cleared
    /// on every path.
    pub async fn send_message(&self, content: &str) -> Result<()> {
        let content = content.trim();
        if content.is_empty() {
            return Err(MurmurError::validation("message content must not be empty"));
        }

        let (conversation_id, model) = {
            let mut state = self.state.write().await;
            if state.processing {
                debug!("send already in flight, ignoring");
                return Ok(());
            }
            let Some(id) = state.selection.clone() else {
                debug!("no conversation selected, ignoring send");
                return Ok(());
            };
            let Some(pos) = state.position(&id) else {
                debug!("selected conversation {id} not found locally, ignoring send");
                return Ok(());
            };

            let now = Utc::now();
            let conversation = &mut state.conversations[pos];
            let model = conversation.model.clone();
            conversation
                .messages
                .push(Message::user(&id, content, &model));
            conversation.touch(now);
            state.resort();
            state.processing = true;
            (id, model)
        };
        self.notify();

        let sent = self
            .gateway
            .send_message(&model, content, &conversation_id)
            .await;
        let outcome = match sent {
            // The reply text itself is discarded; the confirmed list is the
            // source of truth.
            Ok(_reply) => self.reconcile_messages(&conversation_id).await,
            Err(e) => Err(e),
        };

        {
            let mut state = self.state.write().await;
            state.processing = false;
        }
        self.notify();
        outcome
    }

    /// Replaces a conversation's message list with the server-confirmed one.
    ///
    /// The target is re-checked against current state: a response for a
    /// conversation deleted while the call was outstanding is dropped
    /// silently.
    async fn reconcile_messages(&self, conversation_id: &str) -> Result<()> {
        let messages = self.gateway.list_messages(conversation_id).await?;

        let mut state = self.state.write().await;
        let now = Utc::now();
        match state.position(conversation_id) {
            Some(pos) => {
                let conversation = &mut state.conversations[pos];
                conversation.messages = messages;
                conversation.touch(now);
                state.resort();
                drop(state);
                self.notify();
            }
            None => {
                drop(state);
                debug!("conversation {conversation_id} vanished before reconciliation, dropping response");
            }
        }
        Ok(())
    }

    /// Shallow-merges the supplied fields into a conversation.
    ///
    /// An unknown id is a silent no-op: the target vanished between trigger
    /// and completion. A title change additionally propagates to the gateway
    /// as a fire-and-forget call whose failure is logged, never surfaced.
    pub async fn update_conversation(&self, conversation_id: &str, update: ConversationUpdate) {
        let new_title = update.title.clone();
        {
            let mut state = self.state.write().await;
            let Some(pos) = state.position(conversation_id) else {
                debug!("conversation {conversation_id} not found, ignoring update");
                return;
            };

            let now = Utc::now();
            let conversation = &mut state.conversations[pos];
            if let Some(title) = update.title {
                conversation.title = title;
            }
            if let Some(model) = update.model {
                conversation.model = model;
            }
            if let Some(favorite) = update.favorite {
                conversation.favorite = favorite;
            }
            conversation.touch(now);
            state.resort();
        }
        self.notify();

        if let Some(title) = new_title {
            let gateway = self.gateway.clone();
            let conversation_id = conversation_id.to_string();
            tokio::spawn(async move {
                if let Err(e) = gateway.rename_conversation(&conversation_id, &title).await {
                    warn!("failed to propagate title for conversation {conversation_id}: {e}");
                }
            });
        }
    }

    /// Deletes a conversation, remote first.
    ///
    /// Local state changes only after the gateway confirms. When the deleted
    /// conversation was selected, the selection falls back to the first entry
    /// of the remaining (already sorted) collection, or to none.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error; local state is unchanged in that case.
    pub async fn delete_conversation(&self, conversation_id: &str) -> Result<()> {
        self.gateway.delete_conversation(conversation_id).await?;

        let mut state = self.state.write().await;
        state
            .conversations
            .retain(|conversation| conversation.id != conversation_id);
        if state.selection.as_deref() == Some(conversation_id) {
            state.selection = state
                .conversations
                .first()
                .map(|conversation| conversation.id.clone());
        }
        drop(state);
        self.notify();
        Ok(())
    }

    /// Flips a conversation's favorite flag. Unknown id is a silent no-op.
    pub async fn toggle_favorite(&self, conversation_id: &str) {
        {
            let mut state = self.state.write().await;
            let Some(pos) = state.position(conversation_id) else {
                debug!("conversation {conversation_id} not found, ignoring favorite toggle");
                return;
            };

            let now = Utc::now();
            let conversation = &mut state.conversations[pos];
            conversation.favorite = !conversation.favorite;
            conversation.touch(now);
            state.resort();
        }
        self.notify();
    }

    /// Makes a conversation the active selection.
    ///
    /// Only takes effect when the id exists locally; the selection can never
    /// dangle.
    pub async fn select_conversation(&self, conversation_id: &str) {
        {
            let mut state = self.state.write().await;
            if state.position(conversation_id).is_none() {
                debug!("conversation {conversation_id} not found, keeping current selection");
                return;
            }
            state.selection = Some(conversation_id.to_string());
        }
        self.notify();
    }

    /// Sets the selected conversation's model. No-op without a selection.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty model identifier.
    pub async fn set_model(&self, model: &str) -> Result<()> {
        if model.trim().is_empty() {
            return Err(MurmurError::validation("model identifier must not be empty"));
        }

        {
            let mut state = self.state.write().await;
            let Some(id) = state.selection.clone() else {
                debug!("no conversation selected, ignoring model change");
                return Ok(());
            };
            let Some(pos) = state.position(&id) else {
                return Ok(());
            };

            let now = Utc::now();
            let conversation = &mut state.conversations[pos];
            conversation.model = model.to_string();
            conversation.touch(now);
            state.resort();
        }
        self.notify();
        Ok(())
    }

    /// Shallow-merges a preference update and persists the snapshot.
    ///
    /// A persistence failure is logged and swallowed; the in-memory
    /// preferences stay authoritative for the session.
    pub async fn update_preferences(&self, update: PreferencesUpdate) {
        let snapshot = {
            let mut preferences = self.preferences.write().await;
            preferences.merge(update);
            preferences.clone()
        };
        self.notify();

        if let Err(e) = self.preferences_repository.save(&snapshot).await {
            warn!("failed to persist preferences: {e}");
        }
    }

    /// Records the authenticated user reported by the auth collaborator.
    pub async fn set_user(&self, user: Option<UserProfile>) {
        self.state.write().await.user = user;
        self.notify();
    }

    // ============================================================================
    // Read accessors (cloned views for the rendering layer)
    // ============================================================================

    /// All conversations in canonical display order.
    pub async fn conversations(&self) -> Vec<Conversation> {
        self.state.read().await.conversations.clone()
    }

    /// Identifier of the active conversation, if any.
    pub async fn selection(&self) -> Option<String> {
        self.state.read().await.selection.clone()
    }

    /// The active conversation, if any.
    pub async fn selected_conversation(&self) -> Option<Conversation> {
        let state = self.state.read().await;
        let id = state.selection.as_deref()?;
        state
            .conversations
            .iter()
            .find(|conversation| conversation.id == id)
            .cloned()
    }

    /// Whether a send-message cycle is awaiting its reply (drives the
    /// "thinking" indicator).
    pub async fn is_processing(&self) -> bool {
        self.state.read().await.processing
    }

    /// Current preference snapshot.
    pub async fn preferences(&self) -> Preferences {
        self.preferences.read().await.clone()
    }

    /// The authenticated user, if known.
    pub async fn user(&self) -> Option<UserProfile> {
        self.state.read().await.user.clone()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

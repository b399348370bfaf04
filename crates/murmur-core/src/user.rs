//! Authenticated user handle.

use serde::{Deserialize, Serialize};

/// The authenticated user as the store knows it.
///
/// Authentication itself (tokens, login screens) lives with the auth
/// collaborator; the store only tracks who the current conversations belong
/// to so the view can display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user identifier.
    pub id: String,
    /// Email address, when the identity provider supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

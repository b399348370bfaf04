//! HTTP gateway layer of the Murmur chat client.
//!
//! Implements `murmur-core`'s [`ChatGateway`] contract against the chat
//! service REST API and holds the bearer credential plumbing shared with the
//! auth collaborator.
//!
//! [`ChatGateway`]: murmur_core::gateway::ChatGateway

mod credentials;
mod http_gateway;

pub use credentials::{CredentialStore, InMemoryCredentialStore};
pub use http_gateway::HttpChatGateway;

//! HTTP implementation of the chat gateway.
//!
//! Talks to the chat service REST API:
//!
//! - `GET    /conversations`
//! - `POST   /conversations`
//! - `DELETE /conversations/{id}`
//! - `PATCH  /conversations/{id}`
//! - `GET    /conversations/{id}/messages`
//! - `POST   /conversations/{id}/messages`
//!
//! Every request carries the caller's bearer credential and a fixed timeout.
//! A 401 wipes the stored credential so the auth collaborator can force
//! re-authentication; the failed call itself surfaces as `Unauthorized` and
//! leaves client state untouched, like any other failed request.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use murmur_core::conversation::{Conversation, Message};
use murmur_core::error::{MurmurError, Result};
use murmur_core::gateway::ChatGateway;

use crate::credentials::CredentialStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    model: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    /// The assistant's reply text.
    response: String,
}

#[derive(Debug, Serialize)]
struct RenameConversationRequest<'a> {
    title: &'a str,
}

/// Gateway implementation backed by the chat service REST API.
pub struct HttpChatGateway {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpChatGateway {
    /// Creates a gateway for the given service base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Service root, e.g. `http://localhost:5000/api`
    /// * `credentials` - Bearer credential holder shared with the auth flow
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            credentials,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attaches the bearer credential, when one is stored.
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.token().await {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => {
                debug!("no credential stored, sending unauthenticated request");
                request
            }
        }
    }

    /// Maps non-success statuses into errors.
    ///
    /// A 401 additionally invalidates the stored credential.
    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("credential rejected by server, invalidating");
            self.credentials.invalidate().await;
            return Err(MurmurError::unauthorized("credential rejected by server"));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(MurmurError::network(format!(
                "server returned {status}: {body}"
            )));
        }
        Ok(response)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let request = self.authorize(request.timeout(REQUEST_TIMEOUT)).await;
        let response = request
            .send()
            .await
            .map_err(|e| MurmurError::network(format!("request failed: {e}")))?;
        self.check_status(response).await
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        let response = self
            .execute(self.client.get(self.url("/conversations")))
            .await?;
        response
            .json()
            .await
            .map_err(|e| MurmurError::network(format!("failed to decode conversation list: {e}")))
    }

    async fn create_conversation(&self) -> Result<Conversation> {
        let response = self
            .execute(self.client.post(self.url("/conversations")))
            .await?;
        response
            .json()
            .await
            .map_err(|e| MurmurError::network(format!("failed to decode conversation: {e}")))
    }

    async fn delete_conversation(&self, conversation_id: &str) -> Result<()> {
        self.execute(
            self.client
                .delete(self.url(&format!("/conversations/{conversation_id}"))),
        )
        .await?;
        Ok(())
    }

    async fn send_message(
        &self,
        model: &str,
        content: &str,
        conversation_id: &str,
    ) -> Result<String> {
        let response = self
            .execute(
                self.client
                    .post(self.url(&format!("/conversations/{conversation_id}/messages")))
                    .json(&SendMessageRequest { model, content }),
            )
            .await?;
        let body: SendMessageResponse = response
            .json()
            .await
            .map_err(|e| MurmurError::network(format!("failed to decode reply: {e}")))?;
        Ok(body.response)
    }

    async fn list_messages(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let response = self
            .execute(
                self.client
                    .get(self.url(&format!("/conversations/{conversation_id}/messages"))),
            )
            .await?;
        response
            .json()
            .await
            .map_err(|e| MurmurError::network(format!("failed to decode message list: {e}")))
    }

    async fn rename_conversation(&self, conversation_id: &str, title: &str) -> Result<()> {
        self.execute(
            self.client
                .patch(self.url(&format!("/conversations/{conversation_id}")))
                .json(&RenameConversationRequest { title }),
        )
        .await?;
        Ok(())
    }
}

//! `ConversationApi` trait and the HTTP implementation, `TavusClient`.
//!
//! `TavusClient` posts a [`ConversationRequest`] to
//! `{base_url}/v2/conversations` with the API key in the `x-api-key` header.
//! The base URL comes from [`ApiConfig`].  Requests are sent once; retrying
//! is up to the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::error::{classify_error, ApiError};
use crate::api::payload::ConversationRequest;
use crate::config::{ApiConfig, FixedConfig, Settings};

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// A conversation record as returned by the service.
///
/// Only the fields the app displays are typed; everything else is kept in
/// `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub conversation_name: Option<String>,
    /// Join URL for the video call.
    #[serde(default)]
    pub conversation_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub replica_id: Option<String>,
    #[serde(default)]
    pub persona_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// ConversationApi trait
// ---------------------------------------------------------------------------

/// Creates conversations on the remote service.
///
/// Implementors must be `Send + Sync` so they can be shared with the session
/// worker as `Arc<dyn ConversationApi>`.
///
/// # Arguments
/// * `settings` – Snapshot of the user settings taken when the user clicked.
/// * `token`    – API key; validated by the caller.
#[async_trait]
pub trait ConversationApi: Send + Sync {
    async fn create_conversation(
        &self,
        settings: &Settings,
        token: &str,
    ) -> Result<Conversation, ApiError>;
}

// ---------------------------------------------------------------------------
// TavusClient
// ---------------------------------------------------------------------------

pub struct TavusClient {
    client: reqwest::Client,
    endpoint: String,
    fixed: FixedConfig,
}

impl TavusClient {
    /// Build a client for the service at `config.base_url`.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::with_fixed(config, FixedConfig::TRAINING)
    }

    /// Build a client that sends the given trainer text.
    pub fn with_fixed(config: &ApiConfig, fixed: FixedConfig) -> Self {
        let endpoint = format!(
            "{}/v2/conversations",
            config.base_url.trim_end_matches('/')
        );
        Self {
            client: reqwest::Client::new(),
            endpoint,
            fixed,
        }
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &ConversationRequest, token: &str) -> Result<Conversation, ApiError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        log::info!("API response status: {}", status.as_u16());
        log::debug!("API response body: {body}");

        if !status.is_success() {
            return Err(classify_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ConversationApi for TavusClient {
    async fn create_conversation(
        &self,
        settings: &Settings,
        token: &str,
    ) -> Result<Conversation, ApiError> {
        log::info!("Creating conversation with settings: {settings:?}");
        log::debug!(
            "Requested persona_id: {:?}, replica_id: {:?}",
            settings.persona,
            settings.replica
        );

        let request = ConversationRequest::build(settings, &self.fixed);
        match serde_json::to_string_pretty(&request) {
            Ok(json) => log::debug!("Sending payload to API: {json}"),
            Err(e) => log::debug!("Payload not printable: {e}"),
        }

        let result = self.send(&request, token).await;
        if let Err(ref e) = result {
            log::error!("Error creating conversation: {e}");
        }
        result
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one HTTP request with a canned response and hand the raw
    /// request text back through the join handle.
    async fn one_shot_server(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (format!("http://{addr}"), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn client_for(base_url: String) -> TavusClient {
        TavusClient::from_config(&ApiConfig { base_url })
    }

    fn replica_only() -> Settings {
        Settings {
            language: "fr".into(),
            interrupt_sensitivity: "medium".into(),
            persona: String::new(),
            replica: "rb123".into(),
        }
    }

    #[test]
    fn endpoint_appends_path_once() {
        let client = client_for("https://tavusapi.com/".into());
        assert_eq!(client.endpoint(), "https://tavusapi.com/v2/conversations");
    }

    /// Verify that `TavusClient` is object-safe (usable as `dyn ConversationApi`).
    #[test]
    fn client_is_object_safe() {
        let api: Box<dyn ConversationApi> = Box::new(client_for("http://localhost".into()));
        drop(api);
    }

    #[tokio::test]
    async fn success_returns_conversation_and_sends_key() {
        let (base, server) = one_shot_server(
            "200 OK",
            r#"{"conversation_id":"c1","conversation_url":"https://tavus.daily.co/c1","status":"active","callback_url":null}"#,
        )
        .await;

        let conversation = client_for(base)
            .create_conversation(&replica_only(), "secret-key")
            .await
            .expect("conversation");

        assert_eq!(conversation.conversation_id.as_deref(), Some("c1"));
        assert_eq!(
            conversation.conversation_url.as_deref(),
            Some("https://tavus.daily.co/c1")
        );
        assert!(conversation.extra.contains_key("callback_url"));

        let request = server.await.unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /v2/conversations "));
        assert!(lower.contains("x-api-key: secret-key"));
        assert!(lower.contains("content-type: application/json"));
        assert!(request.contains(r#""replica_id":"rb123""#));
        assert!(request.contains(r#""language":"fr""#));
        assert!(!request.contains("persona_id"));
    }

    #[tokio::test]
    async fn schema_error_surfaces_configuration_message() {
        let (base, server) =
            one_shot_server("400 Bad Request", r#"{"_schema":["replica_id invalid"]}"#).await;

        let err = client_for(base)
            .create_conversation(&replica_only(), "secret-key")
            .await
            .unwrap_err();

        assert!(err
            .to_string()
            .contains("Configuration Error: replica_id invalid"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn generic_error_carries_status() {
        let (base, server) =
            one_shot_server("401 Unauthorized", r#"{"message":"Invalid access token"}"#).await;

        let err = client_for(base)
            .create_conversation(&Settings::default(), "bad-key")
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "HTTP error! status: 401, message: Invalid access token"
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn unparseable_success_body_is_parse_error() {
        let (base, server) = one_shot_server("200 OK", "not json").await;

        let err = client_for(base)
            .create_conversation(&Settings::default(), "key")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Parse(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn non_object_success_body_is_parse_error() {
        for body in ["null", "[]"] {
            let (base, server) = one_shot_server("200 OK", body).await;

            let err = client_for(base)
                .create_conversation(&Settings::default(), "key")
                .await
                .unwrap_err();

            assert!(matches!(err, ApiError::Parse(_)), "body {body}: {err:?}");
            server.await.unwrap();
        }
    }

    #[tokio::test]
    async fn connection_refused_is_request_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(format!("http://{addr}"))
            .create_conversation(&Settings::default(), "key")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Request(_)));
    }
}

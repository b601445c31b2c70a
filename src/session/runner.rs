//! Session worker: turns UI commands into conversation API calls.
//!
//! [`SessionRunner::run`] lives on the tokio runtime and listens for
//! [`SessionCommand`]s.  Every `CreateConversation` is handled in its own
//! task with the settings snapshot it carries, so two clicks fire two
//! independent requests and the UI thread never waits on the network.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{Conversation, ConversationApi};
use crate::config::Settings;

/// Commands sent from the UI thread to the session worker.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Create a conversation from this settings snapshot.
    CreateConversation { settings: Settings, token: String },
}

/// Results delivered from the session worker to the UI.
#[derive(Debug, Clone)]
pub enum SessionResult {
    /// The service created a conversation.
    Created(Conversation),
    /// The request failed; `message` is ready for display.
    Failed { message: String },
}

/// Drives conversation creation on behalf of the UI.
pub struct SessionRunner {
    api: Arc<dyn ConversationApi>,
}

impl SessionRunner {
    pub fn new(api: Arc<dyn ConversationApi>) -> Self {
        Self { api }
    }

    /// Process commands until the command channel closes.
    pub async fn run(
        self,
        mut command_rx: mpsc::Receiver<SessionCommand>,
        result_tx: mpsc::Sender<SessionResult>,
    ) {
        while let Some(cmd) = command_rx.recv().await {
            match cmd {
                SessionCommand::CreateConversation { settings, token } => {
                    let api = Arc::clone(&self.api);
                    let result_tx = result_tx.clone();
                    tokio::spawn(async move {
                        let result = create(api.as_ref(), &settings, &token).await;
                        if result_tx.send(result).await.is_err() {
                            log::debug!("UI gone; dropping session result");
                        }
                    });
                }
            }
        }
        log::info!("Session worker stopped");
    }
}

async fn create(api: &dyn ConversationApi, settings: &Settings, token: &str) -> SessionResult {
    match api.create_conversation(settings, token).await {
        Ok(conversation) => {
            log::info!(
                "Conversation created: {}",
                conversation.conversation_id.as_deref().unwrap_or("<no id>")
            );
            SessionResult::Created(conversation)
        }
        Err(e) => SessionResult::Failed {
            message: e.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

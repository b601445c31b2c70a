//! Request body for "create conversation".
//!
//! [`ConversationRequest`] is built field by field; a field that has no
//! meaningful value is `None` and is left out of the JSON entirely.  Empty
//! strings are never promoted to `Some`, so the serialised body can contain
//! neither `""` nor `null`.
//!
//! # Identifier precedence
//!
//! | persona | replica | `persona_id` | `replica_id` | `custom_greeting` |
//! |---------|---------|--------------|--------------|-------------------|
//! | empty   | empty   | default      | default      | -                 |
//! | empty   | set     | -            | replica      | greeting          |
//! | set     | empty   | persona      | default      | -                 |
//! | set     | set     | persona      | replica      | -                 |
//!
//! The greeting is only sent when a replica is chosen without a persona,
//! because the service needs some greeting source and there is no persona to
//! provide one.

use serde::Serialize;

use crate::config::{
    FixedConfig, Settings, CONVERSATION_NAME, DEFAULT_PERSONA_ID, DEFAULT_REPLICA_ID,
};
use crate::config::training::DEFAULT_LANGUAGE;

/// The exact JSON object posted to the conversation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversational_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_greeting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl ConversationRequest {
    /// Build the request body for `settings` using the `fixed` trainer text.
    pub fn build(settings: &Settings, fixed: &FixedConfig) -> Self {
        let persona = non_empty(&settings.persona);
        let replica = non_empty(&settings.replica);

        let mut request = Self {
            conversation_name: non_empty(CONVERSATION_NAME),
            conversational_context: non_empty(fixed.conversational_context),
            ..Self::default()
        };

        match (persona, replica) {
            (None, None) => {
                request.persona_id = Some(DEFAULT_PERSONA_ID.to_string());
                request.replica_id = Some(DEFAULT_REPLICA_ID.to_string());
            }
            (None, Some(replica)) => {
                request.replica_id = Some(replica);
                request.custom_greeting = non_empty(fixed.greeting);
            }
            (Some(persona), None) => {
                request.persona_id = Some(persona);
                request.replica_id = Some(DEFAULT_REPLICA_ID.to_string());
            }
            (Some(persona), Some(replica)) => {
                request.persona_id = Some(persona);
                request.replica_id = Some(replica);
            }
        }

        request.language = non_empty(&settings.language).filter(|l| l != DEFAULT_LANGUAGE);

        request
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

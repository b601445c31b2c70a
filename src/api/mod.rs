//! Conversation API module.
//!
//! This module provides:
//! * [`ConversationRequest`]: the typed request body and its builder.
//! * [`ConversationApi`]: async trait for anything that creates conversations.
//! * [`TavusClient`]: the HTTP implementation.
//! * [`Conversation`]: the record returned on success.
//! * [`ApiError`]: error variants, with user-facing messages.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use fi_trainer::api::{ConversationApi, TavusClient};
//! use fi_trainer::config::{AppConfig, SettingsStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let store = SettingsStore::open_default();
//!     let client = TavusClient::from_config(&config.api);
//!
//!     match client.create_conversation(&store.get(), "my-api-key").await {
//!         Ok(conversation) => println!("{:?}", conversation.conversation_url),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```

pub mod client;
pub mod error;
pub mod payload;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{Conversation, ConversationApi, TavusClient};
pub use error::{classify_error, ApiError};
pub use payload::ConversationRequest;

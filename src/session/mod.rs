//! Session launcher module.
//!
//! ```text
//! TrainerApp (egui, UI thread)
//!        │  SessionCommand::CreateConversation { settings snapshot, token }
//!        ▼
//! SessionRunner::run()  ← tokio task
//!        │  spawn per command → ConversationApi::create_conversation
//!        ▼
//! SessionResult (mpsc) ───▶ TrainerApp::poll_results() → SessionState
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{SessionCommand, SessionResult, SessionRunner};
pub use state::SessionState;

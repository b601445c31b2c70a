//! F&I trainer: configures and launches video-call training sessions.
//!
//! * [`config`] holds the training settings store, the fixed trainer
//!   definition and the app config.
//! * [`api`] builds the request payload and talks to the conversation API.
//! * [`session`] is the background worker that creates conversations.
//! * [`app`] is the egui settings panel and session launcher.

pub mod api;
pub mod app;
pub mod config;
pub mod session;

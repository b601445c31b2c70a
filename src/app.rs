//! F&I trainer window: egui/eframe application.
//!
//! # Architecture
//!
//! [`TrainerApp`] is the top-level [`eframe::App`].  It owns the
//! [`SettingsStore`] and [`TokenStore`] and two channel endpoints:
//!
//! * `command_tx`: sends [`SessionCommand`] to the session worker.
//! * `result_rx`: receives [`SessionResult`] from the worker.
//!
//! # Screens
//!
//! | Screen     | Content |
//! |------------|---------|
//! | `Session`  | Trainer name, "Start training", session status / join URL |
//! | `Settings` | Fixed trainer info, language, interrupt sensitivity, persona, replica, API token |

use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::config::training::label_for;
use crate::config::{
    complete_settings, AppConfig, CompleteSettings, FixedConfig, Settings, SettingsStore,
    TokenStore, INTERRUPT_SENSITIVITIES, LANGUAGES,
};
use crate::session::{SessionCommand, SessionResult, SessionState};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(68, 136, 255);
const DIM: egui::Color32 = egui::Color32::from_rgb(150, 150, 150);
const OK_GREEN: egui::Color32 = egui::Color32::from_rgb(80, 200, 120);
const WARN_ORANGE: egui::Color32 = egui::Color32::from_rgb(255, 136, 68);

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Session,
    Settings,
}

// ---------------------------------------------------------------------------
// TrainerApp
// ---------------------------------------------------------------------------

/// eframe application: settings panel plus session launcher.
pub struct TrainerApp {
    // ── Screen / session state ───────────────────────────────────────────
    pub screen: Screen,
    pub session: SessionState,

    // ── Settings ─────────────────────────────────────────────────────────
    /// The single current settings value.
    store: SettingsStore,
    /// Working copy bound to the settings form widgets.
    draft: Settings,
    tokens: TokenStore,
    token_draft: String,
    /// Set once the user has saved the settings during this run.
    pub settings_saved: bool,
    /// Message from the last save attempt, if it failed.
    save_error: Option<String>,

    // ── Channels ─────────────────────────────────────────────────────────
    command_tx: mpsc::Sender<SessionCommand>,
    result_rx: mpsc::Receiver<SessionResult>,

    spinner_phase: f32,
    fixed: FixedConfig,
    /// Application configuration (read-only after startup).
    pub config: AppConfig,
}

impl TrainerApp {
    /// Create a new [`TrainerApp`].
    ///
    /// Starts on the settings screen when no API token is configured.
    pub fn new(
        store: SettingsStore,
        tokens: TokenStore,
        command_tx: mpsc::Sender<SessionCommand>,
        result_rx: mpsc::Receiver<SessionResult>,
        config: AppConfig,
    ) -> Self {
        let screen = if tokens.is_set() {
            Screen::Session
        } else {
            Screen::Settings
        };
        Self {
            screen,
            session: SessionState::Idle,
            draft: store.get(),
            token_draft: tokens.token().to_string(),
            store,
            tokens,
            settings_saved: false,
            save_error: None,
            command_tx,
            result_rx,
            spinner_phase: 0.0,
            fixed: FixedConfig::TRAINING,
            config,
        }
    }

    /// The store's current settings.
    pub fn settings(&self) -> &Settings {
        self.store.current()
    }

    /// The form's settings merged with the fixed trainer definition.
    pub fn complete_settings(&self) -> CompleteSettings {
        complete_settings(&self.draft)
    }

    // ── Actions ──────────────────────────────────────────────────────────

    /// Replace the current settings, as a form edit does.
    pub fn edit_settings(&mut self, settings: Settings) {
        self.draft = settings;
        self.sync_draft();
    }

    /// Push form edits into the store (full replacement).
    fn sync_draft(&mut self) {
        if self.draft != *self.store.current() {
            self.store.set(self.draft.clone());
        }
    }

    /// Ask the worker for a new conversation using a snapshot of the current
    /// settings.  Returns `false` when nothing was sent.
    pub fn start_session(&mut self) -> bool {
        if !self.tokens.is_set() {
            self.session = SessionState::Error("Set your API token in Settings first".into());
            return false;
        }

        let command = SessionCommand::CreateConversation {
            settings: self.store.get(),
            token: self.tokens.token().to_string(),
        };
        match self.command_tx.try_send(command) {
            Ok(()) => {
                self.session = SessionState::Creating;
                true
            }
            Err(e) => {
                log::warn!("Could not reach session worker: {e}");
                self.session = SessionState::Error("Session worker is not running".into());
                false
            }
        }
    }

    /// Persist the settings and the token, then return to the session screen.
    pub fn save_settings(&mut self) {
        self.sync_draft();
        let settings = self.store.get();
        log::debug!("Saving settings: {settings:?}");

        let result = self
            .store
            .save(&settings)
            .and_then(|()| self.tokens.save(&self.token_draft));

        match result {
            Ok(()) => {
                self.store.set(settings);
                self.settings_saved = true;
                self.save_error = None;
                self.close_settings();
            }
            Err(e) => {
                log::error!("Failed to save settings: {e}");
                self.save_error = Some(format!("Could not save settings: {e}"));
            }
        }
    }

    /// Leave the settings screen without saving.  Goes back to the session
    /// screen only when a token is available.
    pub fn close_settings(&mut self) {
        self.screen = if self.tokens.is_set() {
            Screen::Session
        } else {
            Screen::Settings
        };
    }

    /// Drain all pending session results (non-blocking).
    pub fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            self.session = match result {
                SessionResult::Created(conversation) => SessionState::Active(conversation),
                SessionResult::Failed { message } => SessionState::Error(message),
            };
        }
    }

    // ── Screen renderers ─────────────────────────────────────────────────

    fn draw_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let title = match self.screen {
                Screen::Session => "F&I Training",
                Screen::Settings => "F&I Training Settings",
            };
            ui.heading(title);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match self.screen {
                    Screen::Session => {
                        if ui.button("Settings").clicked() {
                            self.screen = Screen::Settings;
                        }
                    }
                    Screen::Settings => {
                        if ui.button("x").clicked() {
                            self.close_settings();
                        }
                    }
                }
            });
        });
    }

    fn draw_session(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.label(egui::RichText::new(self.fixed.name).color(ACCENT).size(16.0));
        ui.label(
            egui::RichText::new(format!(
                "Language: {}   Interrupt sensitivity: {}",
                label_for(LANGUAGES, &self.settings().language),
                label_for(INTERRUPT_SENSITIVITIES, &self.settings().interrupt_sensitivity),
            ))
            .color(DIM)
            .size(12.0),
        );
        if !self.tokens.is_set() {
            ui.label(egui::RichText::new("No API token configured").color(WARN_ORANGE));
        }
        ui.add_space(12.0);

        let busy = self.session.is_busy();
        if ui
            .add_enabled(!busy, egui::Button::new("Start training"))
            .clicked()
        {
            self.start_session();
        }
        ui.add_space(8.0);

        match self.session.clone() {
            SessionState::Idle => {
                ui.label(egui::RichText::new(self.session.label()).color(DIM));
            }
            SessionState::Creating => {
                ui.label(
                    egui::RichText::new(format!("{} {}", self.spinner_char(), self.session.label()))
                        .color(ACCENT),
                );
            }
            SessionState::Active(conversation) => {
                ui.label(egui::RichText::new(self.session.label()).color(OK_GREEN));
                if let Some(url) = conversation.conversation_url.as_deref() {
                    ui.hyperlink(url);
                    if ui.button("Copy link").clicked() {
                        ctx.copy_text(url.to_string());
                    }
                }
                if let Some(id) = conversation.conversation_id.as_deref() {
                    ui.label(egui::RichText::new(format!("Conversation {id}")).color(DIM).size(11.0));
                }
                if ui.button("Done").clicked() {
                    self.session = SessionState::Idle;
                }
            }
            SessionState::Error(message) => {
                ui.label(egui::RichText::new(message).color(WARN_ORANGE));
                if ui.button("Dismiss").clicked() {
                    self.session = SessionState::Idle;
                }
            }
        }
    }

    fn draw_settings(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.label(egui::RichText::new("Training Configuration").strong());
            info_box(ui, "Trainer Name", self.fixed.name);
            info_box(ui, "Opening Greeting", &format!("\"{}\"", self.fixed.greeting));
            ui.group(|ui| {
                ui.label(egui::RichText::new("Training Context").strong());
                egui::ScrollArea::vertical()
                    .id_salt("training_context")
                    .max_height(120.0)
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(self.fixed.context).monospace().size(11.0));
                    });
            });
            ui.label(
                egui::RichText::new(
                    "These settings are pre-configured for the F&I training program and cannot be modified.",
                )
                .italics()
                .color(DIM)
                .size(11.0),
            );

            ui.separator();
            ui.label(egui::RichText::new("Customizable Settings").strong());

            ui.label("Language");
            egui::ComboBox::from_id_salt("language")
                .selected_text(label_for(LANGUAGES, &self.draft.language))
                .show_ui(ui, |ui| {
                    for (label, code) in LANGUAGES {
                        ui.selectable_value(&mut self.draft.language, code.to_string(), *label);
                    }
                });
            hint(ui, "The AI will listen and respond in this language.");

            ui.label("Interrupt Sensitivity");
            egui::ComboBox::from_id_salt("interrupt_sensitivity")
                .selected_text(label_for(
                    INTERRUPT_SENSITIVITIES,
                    &self.draft.interrupt_sensitivity,
                ))
                .show_ui(ui, |ui| {
                    for (label, value) in INTERRUPT_SENSITIVITIES {
                        ui.selectable_value(
                            &mut self.draft.interrupt_sensitivity,
                            value.to_string(),
                            *label,
                        );
                    }
                });
            hint(ui, "How readily the trainer stops talking when you speak.");
            let stt = self.complete_settings().layers.stt;
            info_box(
                ui,
                "Speech Recognition",
                &format!(
                    "{} · interrupt {} · pause {}",
                    stt.stt_engine,
                    stt.participant_interrupt_sensitivity,
                    stt.participant_pause_sensitivity
                ),
            );

            ui.label("Persona ID");
            ui.add(egui::TextEdit::singleline(&mut self.draft.persona).hint_text("p27be05d9881"));
            hint(ui, "Leave empty to use a replica with the built-in greeting.");

            ui.label("Replica ID");
            ui.add(egui::TextEdit::singleline(&mut self.draft.replica).hint_text("rb17cf590e15"));

            ui.label("API Token");
            ui.add(
                egui::TextEdit::singleline(&mut self.token_draft)
                    .password(true)
                    .hint_text("Your API key"),
            );

            ui.add_space(8.0);
            if let Some(err) = &self.save_error {
                ui.label(egui::RichText::new(err.as_str()).color(WARN_ORANGE));
            }
            if self.settings_saved {
                ui.label(egui::RichText::new("Settings saved").color(OK_GREEN).size(11.0));
            }
            if ui.button("Save Changes").clicked() {
                self.save_settings();
            }
        });
        self.sync_draft();
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn spinner_char(&self) -> char {
        let chars = ['|', '/', '-', '\\'];
        let idx = (self.spinner_phase as usize) % chars.len();
        chars[idx]
    }
}

fn info_box(ui: &mut egui::Ui, title: &str, content: &str) {
    ui.group(|ui| {
        ui.label(egui::RichText::new(title).strong());
        ui.label(egui::RichText::new(content).color(DIM).size(12.0));
    });
}

fn hint(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).color(DIM).size(11.0));
    ui.add_space(6.0);
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for TrainerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        if self.session.is_busy() {
            self.spinner_phase = (self.spinner_phase + 0.08) % 4.0;
            ctx.request_repaint_after(Duration::from_millis(66));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_header(ui);
            ui.separator();
            match self.screen {
                Screen::Session => self.draw_session(ui, ctx),
                Screen::Settings => self.draw_settings(ui),
            }
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("F&I trainer closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

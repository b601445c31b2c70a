//! Fixed (non-editable) training configuration.
//!
//! Everything in this module is compiled in and never mutated at runtime.
//! [`complete_settings`] merges a user [`Settings`] snapshot with these
//! constants; the settings panel shows its speech-recognition layer, and the
//! whole record is the shape a persona definition on the remote side expects.

use serde::Serialize;

use super::training::Settings;

/// Persona used when the user has not configured one.
pub const DEFAULT_PERSONA_ID: &str = "p27be05d9881";

/// Replica used when the user has not configured one.
pub const DEFAULT_REPLICA_ID: &str = "rb17cf590e15";

/// Session name sent with every conversation request.
pub const CONVERSATION_NAME: &str = "F&I Training Session";

// ---------------------------------------------------------------------------
// Training text
// ---------------------------------------------------------------------------

const TRAINER_NAME: &str = "John - F&I Trainer";

const GREETING: &str =
    "Hello my name is John. Who do I have the pleasure of training with today?";

const TRAINING_CONTEXT: &str = "\
F&I Training Context:

- You are training professionals on the second phase of F&I training called 'The Customer Presentation'
- There are three phases of F&I training total
- The presentation includes specific statements about vehicle financing, service agreements, and protection options
- Trainees must present information about Platinum, Gold, Silver, Bronze, and Iron payment options
- Each option includes different coverage elements that build on each other
- You provide feedback only at designated [PAUSE] points in the script
- Accept natural speech variations and different pronunciations
- Focus on whether key information is conveyed, not exact wording";

const SYSTEM_PROMPT: &str = "\
You are John, an AI trainer for F&I (Finance & Insurance) professionals. \
You conduct roleplay training sessions where trainees practice the F&I Customer Presentation process. \
You are professional, encouraging, and focused on helping trainees master the presentation flow. \
You provide feedback ONLY at designated pause points, not between individual statements. \
You validate that trainees include all key content elements while accepting natural speech variations. \
You focus on the meaning and completeness of statements, not exact wording.";

const CONVERSATIONAL_CONTEXT: &str = "\
Training Session Instructions:

OPENING SEQUENCE:
1. Start by saying: \"Hello my name is John. Who do I have the pleasure of training with today?\"
2. After receiving the trainee's name, respond: \"Hi [Trainee's First Name], it is great to be training with you. Today we will be working on the second phase of F&I training. There are three phases of F&I training, and the second phase is called The Customer Presentation. Are you ready to begin?\"
3. When they confirm, say: \"Excellent [Trainee's First Name], take your time and whenever you are ready, go ahead and start the Customer Presentation phase.\"

VALIDATION APPROACH:
- Listen for complete sections between pause points
- Validate key content elements are included
- Accept natural speech variations
- Only provide feedback at designated pause points
- If all statements in a section are correct, provide encouragement
- If any statements are incorrect or missing, describe what was wrong without using statement numbers

CUSTOMER PRESENTATION FLOW:

After the trainee says \"Based on the information you shared with me earlier, there are many options available and it's my responsibility to share those with you. May I begin?\" - You respond: \"Yes, let's get started\" or \"Yes I am ready to get out of here\"

[PAUSE POINT 1] - After these statements:
- These are the figures you've agreed to
- This is the interest rate
- By choosing the Platinum Option you receive the Platinum Service Agreement, for 5 years/ 75,000 miles
- You told me that you plan on keeping the car for 5 years and driving 15,000 miles per year
- This is our Ultimate mechanical breakdown coverage

[PAUSE POINT 2] - After these statements:
- It will pay for parts and labor due to the failure of a covered component and has a standard $100 deductible
- Total Loss Protection pays the difference between the insurance settlement and the loan balance if your vehicle is a total loss
- Appearance Care 5 year, repairs dents, dings, windshield chips and cracks

[PAUSE POINT 3] - After these statements:
- Repairs upholstery rips, tears & burns
- It also protects your vehicle from rust by creating a barrier to prevent moisture from attacking areas such as doors, rocker panels, fenders, hood and trunk
- It includes paint protection that protects against pollutants such as bird droppings, tree sap and fading from UV rays

[PAUSE POINT 4] - After these statements:
- Fabric protection guards against spills and stains and makes upholstery easier to clean
- Tire and Wheel 5 year, covers the cost of repair or replacement of rims or tires due to road hazard damage
- Key Fob includes up to 2 key fob replacements if yours are even lost or damaged

[PAUSE POINT 5] - After these statements:
- Theft covers you in the event of theft where the vehicle is not recovered, the coverage will provide a payout up to the market value of the car at the time of the theft occurred
- These are your payment options with the Platinum Plan

[PAUSE POINT 6] - After these statements:
- By choosing the Gold option you receive everything in the Platinum option, however you will forfeit the theft protection
- These are your payment options with the Gold Plan

[PAUSE POINT 7] - After these statements:
- By choosing the Silver option you receive everything in the gold option, however you will forfeit the key fob replacement option
- These are your payment options with the Silver Plan

[PAUSE POINT 8] - After these statements:
- By choosing the Bronze option you receive everything in the silver option, however you will forfeit the Appearance Care option
- These are your payment options with the Bronze Plan

[PAUSE POINT 9] - After these statements:
- By choosing the Iron option you receive everything in the Bronze option, however you will forfeit the Tire and Wheel Coverage
- These are your payment options with the Iron Plan

After final statements:
- These options have been specifically tailored for you and your needs based on the information you shared with me earlier
- Please review these options and initial which option works best for you

Provide final feedback: \"Congratulations on completing the Customer Presentation process! You did an outstanding job, [Trainee's First Name]. Keep up the great work. Remember, perfect practice makes perfect.\"";

// ---------------------------------------------------------------------------
// FixedConfig
// ---------------------------------------------------------------------------

/// The compiled-in trainer definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FixedConfig {
    /// Display name of the AI trainer.
    pub name: &'static str,
    /// Opening line; sent as `custom_greeting` when no persona supplies one.
    pub greeting: &'static str,
    /// Short description of the training, shown in the settings panel.
    pub context: &'static str,
    pub system_prompt: &'static str,
    /// Scripted session instructions sent as `conversational_context`.
    pub conversational_context: &'static str,
}

impl FixedConfig {
    /// The F&I "Customer Presentation" trainer.
    pub const TRAINING: FixedConfig = FixedConfig {
        name: TRAINER_NAME,
        greeting: GREETING,
        context: TRAINING_CONTEXT,
        system_prompt: SYSTEM_PROMPT,
        conversational_context: CONVERSATIONAL_CONTEXT,
    };
}

impl Default for FixedConfig {
    fn default() -> Self {
        Self::TRAINING
    }
}

// ---------------------------------------------------------------------------
// Layers (per-channel engine settings)
// ---------------------------------------------------------------------------

/// Speech-to-text layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SttLayer {
    pub stt_engine: String,
    pub participant_pause_sensitivity: String,
    pub participant_interrupt_sensitivity: String,
    pub smart_turn_detection: bool,
    /// Comma-separated terms the recogniser should favour.
    pub hotwords: String,
}

/// Language-model layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmLayer {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub speed: String,
    pub emotion: Vec<String>,
}

/// Text-to-speech layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TtsLayer {
    pub tts_engine: String,
    pub voice_settings: VoiceSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerceptionLayer {
    pub perception_model: String,
}

/// Default engine parameters for every channel of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layers {
    pub stt: SttLayer,
    pub llm: LlmLayer,
    pub tts: TtsLayer,
    pub perception: PerceptionLayer,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            stt: SttLayer {
                stt_engine: "tavus-advanced".into(),
                participant_pause_sensitivity: "low".into(),
                participant_interrupt_sensitivity: "low".into(),
                smart_turn_detection: true,
                hotwords: "F&I, Platinum, Gold, Silver, Bronze, Iron, Total Loss Protection, \
                           Appearance Care, Tire and Wheel, Key Fob"
                    .into(),
            },
            llm: LlmLayer {
                model: "tavus-gpt-4o".into(),
                temperature: 0.7,
                max_tokens: 500,
            },
            tts: TtsLayer {
                tts_engine: "cartesia".into(),
                voice_settings: VoiceSettings {
                    speed: "normal".into(),
                    emotion: vec!["professional".into(), "encouraging".into()],
                },
            },
            perception: PerceptionLayer {
                perception_model: "raven-0".into(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// CompleteSettings
// ---------------------------------------------------------------------------

/// User settings merged with the fixed trainer definition and layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompleteSettings {
    #[serde(flatten)]
    pub settings: Settings,
    #[serde(flatten)]
    pub fixed: FixedConfig,
    pub layers: Layers,
}

/// Merge `settings` with [`FixedConfig::TRAINING`] and the default [`Layers`].
///
/// The only layer value taken from the user is the STT interrupt
/// sensitivity; everything else keeps its default.
pub fn complete_settings(settings: &Settings) -> CompleteSettings {
    let mut layers = Layers::default();
    layers.stt.participant_interrupt_sensitivity = settings.interrupt_sensitivity.clone();

    CompleteSettings {
        settings: settings.clone(),
        fixed: FixedConfig::TRAINING,
        layers,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_settings_overrides_interrupt_sensitivity_only() {
        let settings = Settings {
            interrupt_sensitivity: "high".into(),
            ..Settings::default()
        };
        let complete = complete_settings(&settings);
        let defaults = Layers::default();

        assert_eq!(complete.layers.stt.participant_interrupt_sensitivity, "high");
        assert_eq!(
            complete.layers.stt.participant_pause_sensitivity,
            defaults.stt.participant_pause_sensitivity
        );
        assert_eq!(complete.layers.llm, defaults.llm);
        assert_eq!(complete.layers.tts, defaults.tts);
        assert_eq!(complete.layers.perception, defaults.perception);
        assert_eq!(complete.settings, settings);
    }

    #[test]
    fn complete_settings_serialises_flat() {
        let complete = complete_settings(&Settings::default());
        let json = serde_json::to_value(&complete).unwrap();

        assert_eq!(json["language"], "en");
        assert_eq!(json["interruptSensitivity"], "low");
        assert_eq!(json["name"], TRAINER_NAME);
        assert_eq!(json["greeting"], GREETING);
        assert_eq!(json["layers"]["llm"]["max_tokens"], 500);
        assert_eq!(json["layers"]["perception"]["perception_model"], "raven-0");
    }

    #[test]
    fn fixed_text_is_non_empty() {
        let fixed = FixedConfig::default();
        assert!(!fixed.name.is_empty());
        assert!(!fixed.greeting.is_empty());
        assert!(fixed.context.starts_with("F&I Training Context:"));
        assert!(fixed.system_prompt.starts_with("You are John"));
        assert!(fixed.conversational_context.contains("[PAUSE POINT 9]"));
    }
}

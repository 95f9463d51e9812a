use serde::Serialize;

use super::conversation::ConversationTurn;
use super::form_fields::{ChatFields, StudyPlanFields};
use super::mode::Mode;
use super::style::StylePreferences;

/// Everything the UI shell submits, including values of hidden fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub mode: Mode,
    pub chat: ChatFields,
    pub study_plan: StudyPlanFields,
    pub style: StylePreferences,
    pub history: Vec<ConversationTurn>,
}

/// Fresh values for the message box, the output box and the file picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormReset {
    pub message: String,
    pub output: String,
    pub file: Option<String>,
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level request category selecting which composition template applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Chat,
    StudyPlan,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Chat => "chat",
            Mode::StudyPlan => "study_plan",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chat" => Ok(Mode::Chat),
            "study_plan" | "study plan" | "studyplan" => Ok(Mode::StudyPlan),
            other => Err(format!(
                "Invalid mode: {}. Expected: chat or study_plan",
                other
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifier of a form field the UI shell may show or hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Message,
    Topic,
    CurrentLevel,
    AvailableTimeHoursPerWeek,
    LearningMethod,
    Goal,
    Language,
    Tone,
    #[serde(rename = "pdf")]
    PdfFile,
}

impl FieldId {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Message => "message",
            FieldId::Topic => "topic",
            FieldId::CurrentLevel => "current_level",
            FieldId::AvailableTimeHoursPerWeek => "available_time_hours_per_week",
            FieldId::LearningMethod => "learning_method",
            FieldId::Goal => "goal",
            FieldId::Language => "language",
            FieldId::Tone => "tone",
            FieldId::PdfFile => "pdf",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const CHAT_FIELDS: &[FieldId] = &[
    FieldId::Message,
    FieldId::Language,
    FieldId::Tone,
    FieldId::PdfFile,
];

const STUDY_PLAN_FIELDS: &[FieldId] = &[
    FieldId::Topic,
    FieldId::CurrentLevel,
    FieldId::AvailableTimeHoursPerWeek,
    FieldId::LearningMethod,
    FieldId::Goal,
    FieldId::Language,
    FieldId::Tone,
    FieldId::PdfFile,
];

/// Fields that are semantically active for composition in `mode`.
///
/// The UI shell maps these onto widget visibility; the composer ignores
/// everything not listed here.
pub fn fields_relevant_for(mode: Mode) -> &'static [FieldId] {
    match mode {
        Mode::Chat => CHAT_FIELDS,
        Mode::StudyPlan => STUDY_PLAN_FIELDS,
    }
}

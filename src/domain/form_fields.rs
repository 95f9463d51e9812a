use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrentLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CurrentLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrentLevel::Beginner => "beginner",
            CurrentLevel::Intermediate => "intermediate",
            CurrentLevel::Advanced => "advanced",
        }
    }
}

impl FromStr for CurrentLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(CurrentLevel::Beginner),
            "intermediate" => Ok(CurrentLevel::Intermediate),
            "advanced" => Ok(CurrentLevel::Advanced),
            other => Err(format!("Invalid level: {}", other)),
        }
    }
}

impl fmt::Display for CurrentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningMethod {
    Visual,
    Auditory,
    Practical,
    Reading,
}

impl LearningMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningMethod::Visual => "visual",
            LearningMethod::Auditory => "auditory",
            LearningMethod::Practical => "practical",
            LearningMethod::Reading => "reading",
        }
    }
}

impl FromStr for LearningMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "visual" => Ok(LearningMethod::Visual),
            "auditory" => Ok(LearningMethod::Auditory),
            "practical" => Ok(LearningMethod::Practical),
            "reading" => Ok(LearningMethod::Reading),
            other => Err(format!("Invalid learning method: {}", other)),
        }
    }
}

impl fmt::Display for LearningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Study-plan parameters. Everything is optional: blank values are passed
/// through rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyPlanFields {
    pub topic: String,
    pub current_level: Option<CurrentLevel>,
    /// Hours per week, never negative.
    pub available_time_hours_per_week: Option<f64>,
    pub learning_method: Option<LearningMethod>,
    pub goal: String,
}

/// Free-form question asked in chat mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFields {
    pub message: String,
}

impl ChatFields {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

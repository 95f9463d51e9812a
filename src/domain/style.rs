use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language the assistant must answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Russian,
    Spanish,
    German,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Russian => "Russian",
            Language::Spanish => "Spanish",
            Language::German => "German",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "russian" | "ru" | "русский" => Ok(Language::Russian),
            "spanish" | "es" | "español" => Ok(Language::Spanish),
            "german" | "de" | "deutsch" => Ok(Language::German),
            other => Err(format!("Invalid language: {}", other)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Formal,
    Informal,
    Humorous,
    Serious,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Informal => "informal",
            Tone::Humorous => "humorous",
            Tone::Serious => "serious",
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "formal" => Ok(Tone::Formal),
            "informal" => Ok(Tone::Informal),
            "humorous" => Ok(Tone::Humorous),
            "serious" => Ok(Tone::Serious),
            other => Err(format!("Invalid tone: {}", other)),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output language and tone; applied in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StylePreferences {
    pub language: Language,
    pub tone: Tone,
}

impl StylePreferences {
    pub fn new(language: Language, tone: Tone) -> Self {
        Self { language, tone }
    }
}

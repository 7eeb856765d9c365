//! Conversation language value type.
//!
//! The questionnaire is bilingual (English and Arabic). Every question text,
//! option label, generated message, and fallback message resolves through a
//! `Language` value carried in the conversation state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Language of a screening conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// ISO 639-1 code used in API payloads and prompts.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Guesses the language of a text from its script.
    ///
    /// Any character in the Arabic Unicode block marks the text as Arabic;
    /// everything else defaults to English.
    pub fn detect(text: &str) -> Self {
        let is_arabic = text
            .chars()
            .any(|c| ('\u{0600}'..='\u{06FF}').contains(&c) || ('\u{0750}'..='\u{077F}').contains(&c));
        if is_arabic {
            Language::Ar
        } else {
            Language::En
        }
    }

    /// The generic child reference used when no child name is known.
    pub fn generic_child(&self) -> &'static str {
        match self {
            Language::En => "your child",
            Language::Ar => "طفلك",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            other => Err(ValidationError::invalid_format(
                "language",
                format!("expected 'en' or 'ar', got '{}'", other),
            )),
        }
    }
}

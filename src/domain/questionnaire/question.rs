//! Question and answer option value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Language, ValidationError};

/// Placeholder replaced by the child's name in question texts and examples.
pub const CHILD_NAME_PLACEHOLDER: &str = "[child_name]";

/// One of the five Q-CHAT answer letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerValue {
    A,
    B,
    C,
    D,
    E,
}

impl AnswerValue {
    /// All values in option order.
    pub const ALL: [AnswerValue; 5] = [
        AnswerValue::A,
        AnswerValue::B,
        AnswerValue::C,
        AnswerValue::D,
        AnswerValue::E,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerValue::A => "A",
            AnswerValue::B => "B",
            AnswerValue::C => "C",
            AnswerValue::D => "D",
            AnswerValue::E => "E",
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnswerValue {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(AnswerValue::A),
            "B" | "b" => Ok(AnswerValue::B),
            "C" | "c" => Ok(AnswerValue::C),
            "D" | "d" => Ok(AnswerValue::D),
            "E" | "e" => Ok(AnswerValue::E),
            other => Err(ValidationError::invalid_format(
                "answer_value",
                format!("expected a letter A-E, got '{}'", other),
            )),
        }
    }
}

/// An answer option in both languages, with an illustrative example per side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: AnswerValue,
    pub label_en: String,
    pub label_ar: String,
    pub example_en: String,
    pub example_ar: String,
}

impl QuestionOption {
    pub fn label(&self, language: Language) -> &str {
        match language {
            Language::En => &self.label_en,
            Language::Ar => &self.label_ar,
        }
    }

    pub fn example(&self, language: Language) -> &str {
        match language {
            Language::En => &self.example_en,
            Language::Ar => &self.example_ar,
        }
    }
}

/// A single-language view of an option, as carried in conversation state
/// and handed to the answer extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionText {
    pub value: AnswerValue,
    pub label: String,
    pub example: String,
}

/// One of the ten Q-CHAT questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub number: u8,
    pub text_en: String,
    pub text_ar: String,
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::En => &self.text_en,
            Language::Ar => &self.text_ar,
        }
    }

    /// Finds the option for a given answer letter.
    pub fn option(&self, value: AnswerValue) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Resolves all options into the given language, substituting the child
    /// name into examples.
    pub fn options_in(&self, language: Language, child_name: Option<&str>) -> Vec<OptionText> {
        self.options
            .iter()
            .map(|o| OptionText {
                value: o.value,
                label: o.label(language).to_string(),
                example: personalize(o.example(language), child_name, language),
            })
            .collect()
    }
}

/// Replaces the `[child_name]` placeholder with the child's name, or with
/// the generic reference for the language when no name is known.
pub fn personalize(text: &str, child_name: Option<&str>, language: Language) -> String {
    let name = child_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| language.generic_child());
    text.replace(CHILD_NAME_PLACEHOLDER, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_value_parses_case_insensitively() {
        assert_eq!("A".parse::<AnswerValue>().unwrap(), AnswerValue::A);
        assert_eq!("e".parse::<AnswerValue>().unwrap(), AnswerValue::E);
        assert_eq!(" c ".parse::<AnswerValue>().unwrap(), AnswerValue::C);
    }

    #[test]
    fn answer_value_rejects_unknown_letters() {
        assert!("F".parse::<AnswerValue>().is_err());
        assert!("unclear".parse::<AnswerValue>().is_err());
    }

    #[test]
    fn answer_value_serializes_as_bare_letter() {
        assert_eq!(serde_json::to_string(&AnswerValue::B).unwrap(), "\"B\"");
    }

    #[test]
    fn personalize_substitutes_name() {
        let out = personalize("[child_name] waves goodbye", Some("Lina"), Language::En);
        assert_eq!(out, "Lina waves goodbye");
    }

    #[test]
    fn personalize_falls_back_to_generic_reference() {
        let out = personalize("[child_name] waves goodbye", None, Language::En);
        assert_eq!(out, "your child waves goodbye");

        let out = personalize("[child_name] يلوح", Some("   "), Language::Ar);
        assert_eq!(out, "طفلك يلوح");
    }

    #[test]
    fn options_in_resolves_language_and_name() {
        let question = Question {
            number: 1,
            text_en: "Does your child wave?".into(),
            text_ar: "هل يلوح طفلك؟".into(),
            options: vec![QuestionOption {
                value: AnswerValue::A,
                label_en: "Always".into(),
                label_ar: "دائماً".into(),
                example_en: "[child_name] always waves".into(),
                example_ar: "[child_name] يلوح دائماً".into(),
            }],
        };

        let options = question.options_in(Language::En, Some("Omar"));
        assert_eq!(options[0].label, "Always");
        assert_eq!(options[0].example, "Omar always waves");

        let options = question.options_in(Language::Ar, None);
        assert_eq!(options[0].label, "دائماً");
        assert_eq!(options[0].example, "طفلك يلوح دائماً");
    }
}

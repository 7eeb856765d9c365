//! Deterministic fallback messages.
//!
//! Every generated message has a templated, language-appropriate fallback so
//! a provider outage never surfaces a technical error to the parent.

use crate::domain::foundation::Language;
use crate::domain::questionnaire::AnswerValue;

fn name_suffix(name: Option<&str>) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => format!(" {}", n),
        None => String::new(),
    }
}

/// Welcome message opening a question's conversation.
pub fn welcome(
    language: Language,
    parent_name: Option<&str>,
    question_number: u8,
    question_text: &str,
    example_a: &str,
    example_e: &str,
) -> String {
    match language {
        Language::Ar => {
            let mut message = format!("مرحباً{}.\n\n", name_suffix(parent_name));
            message.push_str(&format!(
                "أنا مساعدك الذكي لمساعدتك في الإجابة على السؤال {} من استبيان Q-CHAT.\n\n",
                question_number
            ));
            message.push_str(&format!("السؤال: {}\n\n", question_text));
            if !example_a.is_empty() && !example_e.is_empty() {
                message.push_str("لتوضيح السؤال:\n");
                message.push_str(&format!("• مثال على الإجابة الأولى (A): {}\n", example_a));
                message.push_str(&format!("• مثال على الإجابة الأخيرة (E): {}\n\n", example_e));
            }
            message.push_str(
                "يمكنك أن تسألني أي شيء عن هذا السؤال، أو تصف سلوك طفلك بكلماتك الخاصة وسأساعدك في اختيار الإجابة المناسبة.\n\n",
            );
            message.push_str("كيف يمكنني مساعدتك اليوم؟");
            message
        }
        Language::En => {
            let mut message = format!("Hello{}.\n\n", name_suffix(parent_name));
            message.push_str(&format!(
                "I'm your AI assistant here to help you answer Question {} of the Q-CHAT assessment.\n\n",
                question_number
            ));
            message.push_str(&format!("Question: {}\n\n", question_text));
            if !example_a.is_empty() && !example_e.is_empty() {
                message.push_str("To help clarify:\n");
                message.push_str(&format!("• Example of the first option (A): {}\n", example_a));
                message.push_str(&format!("• Example of the last option (E): {}\n\n", example_e));
            }
            message.push_str(
                "You can ask me anything about this question, or describe your child's behavior in your own words, and I'll help you choose the most appropriate answer.\n\n",
            );
            message.push_str("How can I assist you today?");
            message
        }
    }
}

/// Clarification when the generated explanation is unavailable.
pub fn clarification(language: Language, question_text: &str) -> String {
    match language {
        Language::Ar => format!("دعني أوضح: {}", question_text),
        Language::En => format!("Let me clarify: {}", question_text),
    }
}

/// Greeting acknowledgment that steers back to the question.
pub fn greeting(
    language: Language,
    parent_name: Option<&str>,
    question_text: &str,
    example: &str,
) -> String {
    match language {
        Language::Ar => {
            let ack = format!("مرحباً{}، سعيد بلقائك!", name_suffix(parent_name));
            if example.is_empty() {
                format!("{} دعني أسألك: {}", ack, question_text)
            } else {
                format!("{} دعني أسألك: {} مثال: {}.", ack, question_text, example)
            }
        }
        Language::En => {
            let ack = format!("Hello{}, nice to meet you!", name_suffix(parent_name));
            if example.is_empty() {
                format!("{} Let me ask: {}", ack, question_text)
            } else {
                format!("{} Let me ask: {} Example: {}.", ack, question_text, example)
            }
        }
    }
}

/// Redirect after an off-topic utterance.
pub fn redirect(
    language: Language,
    parent_name: Option<&str>,
    question_text: &str,
    example: &str,
) -> String {
    match language {
        Language::Ar => {
            let opening = format!("شكراً لسؤالك{}، أفهم اهتمامك.", name_suffix(parent_name));
            if example.is_empty() {
                format!("{} دعني أسألك: {}", opening, question_text)
            } else {
                format!("{} دعني أسألك: {} مثال: {}.", opening, question_text, example)
            }
        }
        Language::En => {
            let opening = format!(
                "Thanks for your question{}, I understand your concern.",
                name_suffix(parent_name)
            );
            if example.is_empty() {
                format!("{} Let me ask: {}", opening, question_text)
            } else {
                format!("{} Let me ask: {} Example: {}.", opening, question_text, example)
            }
        }
    }
}

/// Acknowledgment appended when an answer is recorded.
pub fn acknowledgment(language: Language, parent_name: Option<&str>, option: AnswerValue) -> String {
    match language {
        Language::Ar => format!(
            "شكراً لك{}! لقد فهمت. سأسجل الخيار {}.",
            name_suffix(parent_name),
            option
        ),
        Language::En => format!(
            "Thank you{}! I understand. I'll record Option {}.",
            name_suffix(parent_name),
            option
        ),
    }
}

/// Graceful close when the question is given up after repeated unclear answers.
pub fn unanswered(language: Language, parent_name: Option<&str>) -> String {
    match language {
        Language::Ar => format!(
            "لا بأس{}. سنترك هذا السؤال الآن وننتقل إلى السؤال التالي، ويمكننا العودة إليه لاحقاً.",
            name_suffix(parent_name)
        ),
        Language::En => format!(
            "That's okay{}. Let's leave this question for now and move on to the next one; we can come back to it later.",
            name_suffix(parent_name)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_includes_question_and_examples() {
        let message = welcome(
            Language::En,
            Some("Sara"),
            3,
            "Does your child point at things?",
            "points all day",
            "never points",
        );
        assert!(message.starts_with("Hello Sara."));
        assert!(message.contains("Question 3"));
        assert!(message.contains("Does your child point at things?"));
        assert!(message.contains("(A): points all day"));
        assert!(message.contains("(E): never points"));
    }

    #[test]
    fn welcome_omits_examples_block_when_missing() {
        let message = welcome(Language::En, None, 1, "Q?", "", "");
        assert!(message.starts_with("Hello.\n\n"));
        assert!(!message.contains("To help clarify"));
    }

    #[test]
    fn arabic_welcome_uses_arabic_template() {
        let message = welcome(Language::Ar, None, 2, "سؤال؟", "مثال أ", "مثال هـ");
        assert!(message.starts_with("مرحباً."));
        assert!(message.contains("السؤال 2"));
    }

    #[test]
    fn clarification_prefixes_question() {
        assert_eq!(
            clarification(Language::En, "Does your child wave?"),
            "Let me clarify: Does your child wave?"
        );
        assert_eq!(
            clarification(Language::Ar, "هل يلوح طفلك؟"),
            "دعني أوضح: هل يلوح طفلك؟"
        );
    }

    #[test]
    fn greeting_with_and_without_example() {
        let with = greeting(Language::En, Some("Ali"), "Q?", "an example");
        assert_eq!(with, "Hello Ali, nice to meet you! Let me ask: Q? Example: an example.");
        let without = greeting(Language::En, None, "Q?", "");
        assert_eq!(without, "Hello, nice to meet you! Let me ask: Q?");
    }

    #[test]
    fn redirect_acknowledges_concern() {
        let message = redirect(Language::En, None, "Q?", "");
        assert_eq!(
            message,
            "Thanks for your question, I understand your concern. Let me ask: Q?"
        );
    }

    #[test]
    fn acknowledgment_names_the_option() {
        let message = acknowledgment(Language::En, Some("Sara"), AnswerValue::C);
        assert_eq!(message, "Thank you Sara! I understand. I'll record Option C.");
        let message = acknowledgment(Language::Ar, None, AnswerValue::A);
        assert_eq!(message, "شكراً لك! لقد فهمت. سأسجل الخيار A.");
    }

    #[test]
    fn unanswered_message_is_gentle_in_both_languages() {
        assert!(unanswered(Language::En, None).contains("move on"));
        assert!(unanswered(Language::Ar, None).contains("السؤال التالي"));
    }
}

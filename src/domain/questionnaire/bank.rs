//! The static Q-CHAT-10 question bank.
//!
//! All ten questions are hard-coded in both languages so they can be edited
//! without a datastore. Examples carry the `[child_name]` placeholder and are
//! personalized when a conversation resolves them.

use once_cell::sync::Lazy;

use super::question::{AnswerValue, Question, QuestionOption};

/// Total number of questions in the Q-CHAT-10.
pub const TOTAL_QUESTIONS: u8 = 10;

static QUESTIONS: Lazy<Vec<Question>> = Lazy::new(build_questions);

/// Read-only access to the question set.
#[derive(Debug, Clone, Copy)]
pub struct QuestionBank;

impl QuestionBank {
    /// Returns a question by its 1-based number.
    pub fn get(number: u8) -> Option<&'static Question> {
        QUESTIONS.iter().find(|q| q.number == number)
    }

    /// All ten questions in order.
    pub fn all() -> &'static [Question] {
        &QUESTIONS
    }
}

type OptionRow = (AnswerValue, &'static str, &'static str, &'static str, &'static str);

fn question(
    number: u8,
    text_en: &str,
    text_ar: &str,
    options: [OptionRow; 5],
) -> Question {
    Question {
        number,
        text_en: text_en.to_string(),
        text_ar: text_ar.to_string(),
        options: options
            .into_iter()
            .map(|(value, label_en, label_ar, example_en, example_ar)| QuestionOption {
                value,
                label_en: label_en.to_string(),
                label_ar: label_ar.to_string(),
                example_en: example_en.to_string(),
                example_ar: example_ar.to_string(),
            })
            .collect(),
    }
}

fn build_questions() -> Vec<Question> {
    use AnswerValue::*;
    vec![
        question(
            1,
            "Does your child look at you when you call his/her name?",
            "هل ينظر طفلك إليك عندما تنادي باسمه؟",
            [
                (A, "Always", "دائماً",
                 "[child_name] immediately looks up every single time you call their name",
                 "[child_name] ينظر فوراً في كل مرة تنادي باسمه"),
                (B, "Usually", "عادة",
                 "[child_name] looks up most times when you call, maybe misses once in a while",
                 "[child_name] ينظر في معظم الأوقات عند المناداة"),
                (C, "Sometimes", "أحياناً",
                 "[child_name] only looks up about half the time or on and off",
                 "[child_name] ينظر فقط حوالي نصف الوقت"),
                (D, "Rarely", "نادراً",
                 "[child_name] rarely responds to their name, maybe 1 out of 5 times",
                 "[child_name] نادراً ما يستجيب لاسمه"),
                (E, "Never", "أبداً",
                 "[child_name] never looks up when you call their name",
                 "[child_name] لا ينظر أبداً عند مناداة اسمه"),
            ],
        ),
        question(
            2,
            "How easy is it for you to get eye contact with your child?",
            "ما مدى سهولة التواصل البصري مع طفلك؟",
            [
                (A, "Very easy", "سهل جداً",
                 "[child_name] makes eye contact naturally and easily all the time",
                 "[child_name] يقوم بالتواصل البصري بشكل طبيعي وسهل طوال الوقت"),
                (B, "Quite easy", "سهل نوعاً ما",
                 "[child_name] makes eye contact fairly easily, no major issues",
                 "[child_name] يقوم بالتواصل البصري بسهولة إلى حد ما"),
                (C, "Quite difficult", "صعب نوعاً ما",
                 "[child_name] sometimes avoids eye contact, somewhat challenging",
                 "[child_name] أحياناً يتجنب التواصل البصري"),
                (D, "Very difficult", "صعب جداً",
                 "[child_name] rarely makes eye contact, very challenging to get",
                 "[child_name] نادراً ما يقوم بالتواصل البصري"),
                (E, "Impossible", "مستحيل",
                 "[child_name] never makes eye contact no matter what you try",
                 "[child_name] لا يقوم بالتواصل البصري أبداً"),
            ],
        ),
        question(
            3,
            "Does your child point to indicate that s/he wants something? (e.g. a toy that is out of reach)",
            "هل يشير طفلك للإشارة إلى أنه يريد شيئاً؟ (مثل لعبة بعيدة عن متناول اليد)",
            [
                (A, "Many times a day", "عدة مرات في اليوم",
                 "[child_name] points to request things constantly throughout the day",
                 "[child_name] يشير لطلب الأشياء باستمرار طوال اليوم"),
                (B, "A few times a day", "بضع مرات في اليوم",
                 "[child_name] points to request things several times each day",
                 "[child_name] يشير لطلب الأشياء عدة مرات كل يوم"),
                (C, "A few times a week", "بضع مرات في الأسبوع",
                 "[child_name] points occasionally during the week",
                 "[child_name] يشير أحياناً خلال الأسبوع"),
                (D, "Less than once a week", "أقل من مرة في الأسبوع",
                 "[child_name] very rarely points to request things",
                 "[child_name] نادراً جداً ما يشير لطلب الأشياء"),
                (E, "Never", "أبداً",
                 "[child_name] never points to indicate wants",
                 "[child_name] لا يشير أبداً للإشارة إلى رغباته"),
            ],
        ),
        question(
            4,
            "Does your child point to share interest with you? (e.g. pointing at an interesting sight)",
            "هل يشير طفلك لمشاركة الاهتمام معك؟ (مثل الإشارة إلى شيء مثير للاهتمام)",
            [
                (A, "Many times a day", "عدة مرات في اليوم",
                 "[child_name] frequently points to share sights throughout the day",
                 "[child_name] يشير بشكل متكرر لمشاركة المشاهد طوال اليوم"),
                (B, "A few times a day", "بضع مرات في اليوم",
                 "[child_name] points to share interesting things a few times daily",
                 "[child_name] يشير لمشاركة الأشياء المثيرة بضع مرات يومياً"),
                (C, "A few times a week", "بضع مرات في الأسبوع",
                 "[child_name] occasionally points to share during the week",
                 "[child_name] يشير أحياناً للمشاركة خلال الأسبوع"),
                (D, "Less than once a week", "أقل من مرة في الأسبوع",
                 "[child_name] very rarely points to share interest",
                 "[child_name] نادراً جداً ما يشير لمشاركة الاهتمام"),
                (E, "Never", "أبداً",
                 "[child_name] never points to share interest with you",
                 "[child_name] لا يشير أبداً لمشاركة الاهتمام معك"),
            ],
        ),
        question(
            5,
            "Does your child pretend? (e.g. care for dolls, talk on a toy phone)",
            "هل يتظاهر طفلك؟ (مثل الاعتناء بالدمى، التحدث على هاتف لعبة)",
            [
                (A, "Many times a day", "عدة مرات في اليوم",
                 "[child_name] engages in pretend play constantly throughout the day",
                 "[child_name] يشارك في اللعب التخيلي باستمرار طوال اليوم"),
                (B, "A few times a day", "بضع مرات في اليوم",
                 "[child_name] pretends several times each day",
                 "[child_name] يتظاهر عدة مرات كل يوم"),
                (C, "A few times a week", "بضع مرات في الأسبوع",
                 "[child_name] pretends occasionally during the week",
                 "[child_name] يتظاهر أحياناً خلال الأسبوع"),
                (D, "Less than once a week", "أقل من مرة في الأسبوع",
                 "[child_name] very rarely engages in pretend play",
                 "[child_name] نادراً جداً ما يشارك في اللعب التخيلي"),
                (E, "Never", "أبداً",
                 "[child_name] never pretends or engages in imaginative play",
                 "[child_name] لا يتظاهر أبداً أو يشارك في اللعب التخيلي"),
            ],
        ),
        question(
            6,
            "Does your child follow where you're looking?",
            "هل يتبع طفلك نظرك؟",
            [
                (A, "Many times a day", "عدة مرات في اليوم",
                 "[child_name] consistently follows your gaze throughout the day",
                 "[child_name] يتبع نظرتك باستمرار طوال اليوم"),
                (B, "A few times a day", "بضع مرات في اليوم",
                 "[child_name] follows your gaze several times daily",
                 "[child_name] يتبع نظرتك عدة مرات يومياً"),
                (C, "A few times a week", "بضع مرات في الأسبوع",
                 "[child_name] occasionally follows your gaze during the week",
                 "[child_name] يتبع نظرتك أحياناً خلال الأسبوع"),
                (D, "Less than once a week", "أقل من مرة في الأسبوع",
                 "[child_name] very rarely follows where you're looking",
                 "[child_name] نادراً جداً ما يتبع نظرتك"),
                (E, "Never", "أبداً",
                 "[child_name] never follows your gaze",
                 "[child_name] لا يتبع نظرتك أبداً"),
            ],
        ),
        question(
            7,
            "If you or someone else in the family is visibly upset, does your child show signs of wanting to comfort them? (e.g. stroking hair, hugging them)",
            "إذا كنت أنت أو أي شخص آخر في العائلة منزعجاً بشكل واضح، هل يظهر طفلك علامات الرغبة في مواساته؟",
            [
                (A, "Always", "دائماً",
                 "[child_name] always shows comfort when someone is upset",
                 "[child_name] يظهر دائماً المواساة عندما يكون شخص ما منزعجاً"),
                (B, "Usually", "عادة",
                 "[child_name] usually tries to comfort upset people",
                 "[child_name] عادة يحاول مواساة الأشخاص المنزعجين"),
                (C, "Sometimes", "أحياناً",
                 "[child_name] sometimes shows comfort behaviors",
                 "[child_name] أحياناً يظهر سلوكيات المواساة"),
                (D, "Rarely", "نادراً",
                 "[child_name] rarely shows comfort behaviors",
                 "[child_name] نادراً ما يظهر سلوكيات المواساة"),
                (E, "Never", "أبداً",
                 "[child_name] never shows signs of wanting to comfort others",
                 "[child_name] لا يظهر أبداً علامات الرغبة في مواساة الآخرين"),
            ],
        ),
        question(
            8,
            "Would you describe your child's first words as:",
            "كيف تصف كلمات طفلك الأولى:",
            [
                (A, "Very typical", "نموذجية جداً",
                 "[child_name]'s first words were very typical like 'mama', 'dada', 'ball'",
                 "كلمات [child_name] الأولى كانت نموذجية جداً مثل 'ماما'، 'بابا'"),
                (B, "Quite typical", "نموذجية نوعاً ما",
                 "[child_name]'s words were mostly typical with nothing unusual",
                 "كلمات [child_name] كانت نموذجية في الغالب"),
                (C, "Slightly unusual", "غير عادية قليلاً",
                 "[child_name]'s words were a bit unusual or uncommon",
                 "كلمات [child_name] كانت غير عادية قليلاً"),
                (D, "Very unusual", "غير عادية جداً",
                 "[child_name]'s words were very unusual or strange",
                 "كلمات [child_name] كانت غير عادية جداً"),
                (E, "My child doesn't speak", "طفلي لا يتكلم",
                 "[child_name] doesn't speak yet or hasn't said first words",
                 "[child_name] لا يتكلم بعد"),
            ],
        ),
        question(
            9,
            "Does your child use simple gestures? (e.g. wave goodbye)",
            "هل يستخدم طفلك إيماءات بسيطة؟ (مثل التلويح بالوداع)",
            [
                (A, "Many times a day", "عدة مرات في اليوم",
                 "[child_name] uses gestures like waving frequently throughout the day",
                 "[child_name] يستخدم الإيماءات مثل التلويح بشكل متكرر طوال اليوم"),
                (B, "A few times a day", "بضع مرات في اليوم",
                 "[child_name] uses gestures several times each day",
                 "[child_name] يستخدم الإيماءات عدة مرات كل يوم"),
                (C, "A few times a week", "بضع مرات في الأسبوع",
                 "[child_name] uses gestures occasionally during the week",
                 "[child_name] يستخدم الإيماءات أحياناً خلال الأسبوع"),
                (D, "Less than once a week", "أقل من مرة في الأسبوع",
                 "[child_name] very rarely uses gestures",
                 "[child_name] نادراً جداً ما يستخدم الإيماءات"),
                (E, "Never", "أبداً",
                 "[child_name] never uses simple gestures like waving",
                 "[child_name] لا يستخدم أبداً الإيماءات البسيطة مثل التلويح"),
            ],
        ),
        question(
            10,
            "Does your child stare at nothing with no apparent purpose?",
            "هل يحدق طفلك في لا شيء دون هدف واضح؟",
            [
                (A, "Many times a day", "عدة مرات في اليوم",
                 "[child_name] frequently stares at nothing throughout the day",
                 "[child_name] يحدق في لا شيء بشكل متكرر طوال اليوم"),
                (B, "A few times a day", "بضع مرات في اليوم",
                 "[child_name] stares at nothing a few times each day",
                 "[child_name] يحدق في لا شيء بضع مرات كل يوم"),
                (C, "A few times a week", "بضع مرات في الأسبوع",
                 "[child_name] occasionally stares at nothing during the week",
                 "[child_name] يحدق في لا شيء أحياناً خلال الأسبوع"),
                (D, "Less than once a week", "أقل من مرة في الأسبوع",
                 "[child_name] very rarely stares at nothing",
                 "[child_name] نادراً جداً ما يحدق في لا شيء"),
                (E, "Never", "أبداً",
                 "[child_name] never stares at nothing with no purpose",
                 "[child_name] لا يحدق أبداً في لا شيء دون هدف"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Language;

    #[test]
    fn bank_has_ten_questions_in_order() {
        let all = QuestionBank::all();
        assert_eq!(all.len(), TOTAL_QUESTIONS as usize);
        for (i, q) in all.iter().enumerate() {
            assert_eq!(q.number, (i + 1) as u8);
        }
    }

    #[test]
    fn every_question_has_five_options_with_examples() {
        for q in QuestionBank::all() {
            assert_eq!(q.options.len(), 5, "question {}", q.number);
            for (expected, option) in AnswerValue::ALL.iter().zip(&q.options) {
                assert_eq!(&option.value, expected);
                assert!(!option.label_en.is_empty());
                assert!(!option.label_ar.is_empty());
                assert!(!option.example_en.is_empty());
                assert!(!option.example_ar.is_empty());
            }
        }
    }

    #[test]
    fn get_returns_question_by_number() {
        let q1 = QuestionBank::get(1).unwrap();
        assert!(q1.text(Language::En).contains("call his/her name"));

        let q10 = QuestionBank::get(10).unwrap();
        assert!(q10.text(Language::En).contains("stare at nothing"));
    }

    #[test]
    fn get_returns_none_for_unknown_number() {
        assert!(QuestionBank::get(0).is_none());
        assert!(QuestionBank::get(11).is_none());
    }

    #[test]
    fn arabic_texts_present_for_all_questions() {
        for q in QuestionBank::all() {
            assert!(!q.text(Language::Ar).is_empty(), "question {}", q.number);
        }
    }
}

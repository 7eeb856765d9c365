//! Q-CHAT Assistant - Conversational screening for the Q-CHAT-10 questionnaire.
//!
//! A parent answers each of the ten Q-CHAT questions through free-form chat.
//! The dialogue machine in `domain::assistant` drives one conversation per
//! question: it classifies each utterance, extracts a structured answer when
//! one is present, and otherwise clarifies, greets, or redirects. The scoring
//! engine in `domain::questionnaire` turns recorded answers into a screening
//! report.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

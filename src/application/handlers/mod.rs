//! Application handlers.
//!
//! Command handlers that orchestrate the per-question dialogue plus the
//! report builder that closes out a screening.

pub mod report;
pub mod send_message;
pub mod start_question;

pub use report::{build_report, ScreeningReport};
pub use send_message::{
    SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageResult,
};
pub use start_question::{
    StartQuestionCommand, StartQuestionError, StartQuestionHandler, StartQuestionResult,
};

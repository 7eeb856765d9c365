//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    build_report, ScreeningReport,
    SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageResult,
    StartQuestionCommand, StartQuestionError, StartQuestionHandler, StartQuestionResult,
};

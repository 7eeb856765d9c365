//! NLU adapters implementing the `Understanding` port.

mod mock;
mod openai;

pub use mock::MockUnderstanding;
pub use openai::{OpenAiNluConfig, OpenAiUnderstanding};

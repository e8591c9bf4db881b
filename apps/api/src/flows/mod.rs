//! Application flows — each one renders a prompt template, invokes the
//! external model through `llm_client`, and shapes the output.

pub mod chat;
pub mod extract;
pub mod guide;
pub mod handlers;
pub mod inquiry;
pub mod prompts;
pub mod summarize;

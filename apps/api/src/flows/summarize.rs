//! Policy summarization flow — pure one-shot templated generation.
//! The ≤200-word limit is enforced by instruction, not code.

use crate::errors::AppError;
use crate::flows::prompts::{SUMMARIZE_PROMPT, SUMMARIZE_SYSTEM};
use crate::llm_client::LlmClient;

/// Summarizes a full policy document into a short multi-paragraph summary.
pub async fn summarize_policy(llm: &LlmClient, policy_document: &str) -> Result<String, AppError> {
    let prompt = render_summarize_prompt(policy_document);
    let response = llm
        .call(&prompt, SUMMARIZE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Summarization failed: {e}")))?;

    response
        .text()
        .map(|t| t.trim().to_string())
        .ok_or_else(|| AppError::Llm("Summarization returned no content".to_string()))
}

fn render_summarize_prompt(policy_document: &str) -> String {
    SUMMARIZE_PROMPT.replace("{policy_document}", policy_document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_document() {
        let prompt = render_summarize_prompt("All travel must be booked 14 days ahead.");
        assert!(prompt.contains("All travel must be booked 14 days ahead."));
        assert!(!prompt.contains("{policy_document}"));
    }

    #[test]
    fn test_prompt_states_word_limit() {
        assert!(SUMMARIZE_PROMPT.contains("no more than 200 words"));
    }
}

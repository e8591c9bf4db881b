//! Onboarding chat flow — stateless Q&A over a flattened guide.
//! Every call resends the entire guide context; there is no server-side
//! conversation memory.

use crate::errors::AppError;
use crate::flows::prompts::{CHAT_PROMPT, CHAT_SYSTEM};
use crate::llm_client::LlmClient;

/// Answers a question using only the supplied guide context.
pub async fn onboarding_chat(
    llm: &LlmClient,
    query: &str,
    guide_context: &str,
) -> Result<String, AppError> {
    let prompt = render_chat_prompt(guide_context, query);
    let response = llm
        .call(&prompt, CHAT_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Onboarding chat failed: {e}")))?;

    response
        .text()
        .map(|t| t.trim().to_string())
        .ok_or_else(|| AppError::Llm("Onboarding chat returned no content".to_string()))
}

fn render_chat_prompt(guide_context: &str, query: &str) -> String {
    CHAT_PROMPT
        .replace("{guide_context}", guide_context)
        .replace("{query}", query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_guide_and_question() {
        let prompt = render_chat_prompt(
            "# Onboarding\n- [ ] Set up laptop",
            "Do I need to set up a laptop?",
        );
        assert!(prompt.contains("- [ ] Set up laptop"));
        assert!(prompt.contains("Do I need to set up a laptop?"));
        assert!(!prompt.contains("{guide_context}"));
        assert!(!prompt.contains("{query}"));
    }
}

//! Policy inquiry flow — fetch every policy, build one context string, and
//! ask the model to answer from it. This flow never fails: retrieval and
//! generation errors are folded into the answer text.

use tracing::{error, info};

use crate::flows::prompts::{INQUIRY_PROMPT, INQUIRY_SYSTEM, NO_POLICIES_ANSWER};
use crate::llm_client::LlmClient;
use crate::models::policy::Policy;
use crate::policies::store::PolicyStore;

/// Answers a free-text question about company policies.
/// Always returns an answer string — errors become user-facing text.
pub async fn policy_inquiry(store: &PolicyStore, llm: &LlmClient, query: &str) -> String {
    let policies = store.get_policies().await;

    let Some(context) = build_policy_context(&policies) else {
        info!("Policy inquiry with empty knowledge base, returning fixed answer");
        return NO_POLICIES_ANSWER.to_string();
    };

    let prompt = render_inquiry_prompt(&context, query);
    match llm.call(&prompt, INQUIRY_SYSTEM).await {
        Ok(response) => response
            .text()
            .map(|t| t.to_string())
            .unwrap_or_else(|| error_answer("the model returned no content")),
        Err(e) => {
            error!("Policy inquiry generation failed: {e}");
            error_answer(&e.to_string())
        }
    }
}

/// Concatenates all policies into one heading + body context string.
/// Returns None when there are no policies, so the caller can short-circuit
/// before any prompt is rendered.
fn build_policy_context(policies: &[Policy]) -> Option<String> {
    if policies.is_empty() {
        return None;
    }
    Some(
        policies
            .iter()
            .map(|p| format!("## {}\n{}", p.title, p.content))
            .collect::<Vec<_>>()
            .join("\n\n"),
    )
}

fn render_inquiry_prompt(context: &str, query: &str) -> String {
    INQUIRY_PROMPT
        .replace("{context}", context)
        .replace("{query}", query)
}

fn error_answer(detail: &str) -> String {
    format!(
        "There was an error connecting to the knowledge base. Please check the \
         storage configuration and permissions.\n\n**Error Details:**\n```\n{detail}\n```"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(title: &str, content: &str) -> Policy {
        Policy {
            id: format!("policies/{title}.txt"),
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_empty_policy_set_short_circuits() {
        // No context means the model is never invoked and the fixed answer
        // is returned verbatim.
        assert!(build_policy_context(&[]).is_none());
    }

    #[test]
    fn test_context_concatenates_heading_and_body() {
        let context = build_policy_context(&[
            policy("leave", "25 days of annual leave."),
            policy("travel", "Book through the portal."),
        ])
        .unwrap();
        assert!(context.contains("## leave\n25 days of annual leave."));
        assert!(context.contains("## travel\nBook through the portal."));
    }

    #[test]
    fn test_prompt_embeds_context_and_question() {
        let prompt = render_inquiry_prompt("## leave\n25 days.", "How much leave do I get?");
        assert!(prompt.contains("## leave\n25 days."));
        assert!(prompt.contains("How much leave do I get?"));
        assert!(!prompt.contains("{context}"));
        assert!(!prompt.contains("{query}"));
    }

    #[test]
    fn test_error_answer_embeds_detail() {
        let answer = error_answer("connection refused");
        assert!(answer.contains("connection refused"));
        assert!(answer.contains("Error Details"));
    }
}

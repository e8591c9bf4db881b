#![allow(dead_code)]

// Assistant flow prompt templates.
// All prompts for the flows module are defined here.

/// Answer returned verbatim when the policy knowledge base is empty.
/// The model is never invoked in that case.
pub const NO_POLICIES_ANSWER: &str = "I couldn't find any policy documents in the knowledge base. \
Please make sure policy files are uploaded to the 'policies/' directory in object storage.";

/// Fixed sentence the model is instructed to use when the answer is not in
/// the policy context.
pub const POLICY_UNAVAILABLE_SENTENCE: &str =
    "I'm sorry, I don't have information about that policy.";

pub const INQUIRY_SYSTEM: &str =
    "You are a helpful assistant that answers questions about company policies. \
     You answer using only the context provided in the prompt.";

pub const INQUIRY_PROMPT: &str = r#"Use the provided context to answer the user's question.

Context:
{context}

Question:
{query}

Format your answer in a clear and easy-to-read way, using paragraphs for separation. The answer should be based *only* on the context provided. If the answer is not available in the context, say "I'm sorry, I don't have information about that policy.""#;

pub const SUMMARIZE_SYSTEM: &str =
    "You are an expert policy summarizer. Your task is to distill long policy documents \
     into concise summaries that cover all key points.";

pub const SUMMARIZE_PROMPT: &str = r#"The summary must be no more than 200 words and formatted into clean, well-structured paragraphs with a blank line separating them.

Here is an example of a good summary:

The company's updated remote work policy provides employees with the flexibility to work from home, a co-working space, or the office, subject to manager approval. To be eligible, employees must have been with the company for at least six months and maintain a satisfactory performance record.

Requests for remote work arrangements must be submitted through the internal HR portal at least two weeks in advance. The company will provide essential equipment, but employees are responsible for ensuring a safe and productive home office environment.

---

Now, please summarize the following policy document. Respond with the summary text only.

Policy Document:
{policy_document}"#;

pub const GUIDE_SYSTEM: &str = "You are an expert in creating onboarding guides for new employees. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

pub const GUIDE_PROMPT: &str = r#"Based on the employee's role, the projects they will be working on, and the available internal documentation, create a step-by-step onboarding guide.

If a project looks like a project tracker key (e.g. "PROJ"), use the get_project_details tool to fetch its name, description, and lead, and work those details into the guide.

Role: {role}
Projects: {projects}
Internal Documentation: {internal_documentation}

Return exactly this JSON structure:
{
  "title": "string",
  "sections": [
    { "title": "string", "tasks": ["string", ...] }
  ],
  "progress_report": "one sentence telling the employee how to report their progress"
}

Sections must be in the order the employee should work through them."#;

/// Filler used when the guide request carries no internal documentation.
pub const NO_DOCUMENTATION_FILLER: &str = "No specific documentation provided.";

/// Fixed fallback sentence for chat questions the guide context cannot answer.
pub const CHAT_FALLBACK_SENTENCE: &str = "I'm sorry, I don't have information about that in the provided guide. You might want to ask your manager.";

pub const CHAT_SYSTEM: &str = "You are an AI assistant helping a new employee with their onboarding. \
     You answer using only the onboarding guide context provided in the prompt.";

pub const CHAT_PROMPT: &str = r#"Answer the user's question based *only* on the context provided in the Onboarding Guide.

If the answer is not available in the context, say "I'm sorry, I don't have information about that in the provided guide. You might want to ask your manager."

Onboarding Guide Context:
---
{guide_context}
---

Question:
{query}"#;

pub const EXTRACT_SYSTEM: &str = "You are a precise onboarding task extractor. \
    You MUST respond with a valid JSON array only. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences.";

pub const EXTRACT_PROMPT: &str = r#"Extract clear, actionable onboarding tasks from this documentation.
Return a JSON array where each element has the fields:
{ "title": "string", "description": "string", "priority": "high" | "medium" | "low" }

File content:
{content}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inquiry_prompt_embeds_unavailable_sentence() {
        // The fixed sentence the flow promises callers must match the one the
        // prompt instructs the model to emit.
        assert!(INQUIRY_PROMPT.contains(POLICY_UNAVAILABLE_SENTENCE));
    }

    #[test]
    fn test_chat_prompt_embeds_fallback_sentence() {
        assert!(CHAT_PROMPT.contains(CHAT_FALLBACK_SENTENCE));
    }

    #[test]
    fn test_templates_carry_their_placeholders() {
        assert!(INQUIRY_PROMPT.contains("{context}"));
        assert!(INQUIRY_PROMPT.contains("{query}"));
        assert!(SUMMARIZE_PROMPT.contains("{policy_document}"));
        assert!(GUIDE_PROMPT.contains("{role}"));
        assert!(GUIDE_PROMPT.contains("{projects}"));
        assert!(GUIDE_PROMPT.contains("{internal_documentation}"));
        assert!(CHAT_PROMPT.contains("{guide_context}"));
        assert!(EXTRACT_PROMPT.contains("{content}"));
    }
}

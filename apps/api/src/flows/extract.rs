//! Task extraction — asks the model to pull actionable onboarding tasks out
//! of a raw document and persists each one into the global task pool with
//! status "pending".

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::flows::prompts::{EXTRACT_PROMPT, EXTRACT_SYSTEM};
use crate::llm_client::LlmClient;
use crate::services::tasks::insert_extracted_task;

const DEFAULT_PRIORITY: &str = "medium";

/// A task as extracted by the model. `priority` defaults to "medium" when
/// the model omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedTask {
    pub title: String,
    pub description: String,
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

/// Extracts tasks from `content` and persists them against `project`.
/// Returns the extracted tasks as echoed back to the caller.
pub async fn extract_and_store_tasks(
    pool: &PgPool,
    llm: &LlmClient,
    content: &str,
    project: &str,
) -> Result<Vec<ExtractedTask>, AppError> {
    let prompt = EXTRACT_PROMPT.replace("{content}", content);
    let tasks: Vec<ExtractedTask> = llm
        .call_json(&prompt, EXTRACT_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Task extraction failed: {e}")))?;

    for task in &tasks {
        insert_extracted_task(pool, project, &task.title, &task.description, &task.priority)
            .await?;
    }

    info!(
        "Extracted and stored {} tasks for project '{}'",
        tasks.len(),
        project
    );
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_defaults_to_medium() {
        let raw = r#"{"title": "Request access", "description": "File an IT ticket"}"#;
        let task: ExtractedTask = serde_json::from_str(raw).unwrap();
        assert_eq!(task.priority, "medium");
    }

    #[test]
    fn test_explicit_priority_kept() {
        let raw = r#"{"title": "Badge", "description": "Pick up badge", "priority": "high"}"#;
        let task: ExtractedTask = serde_json::from_str(raw).unwrap();
        assert_eq!(task.priority, "high");
    }

    #[test]
    fn test_missing_title_fails_parse() {
        let raw = r#"{"description": "orphan"}"#;
        let result: Result<ExtractedTask, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }
}

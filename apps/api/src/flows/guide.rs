//! Onboarding guide generation — tool-augmented structured generation.
//!
//! The model receives the employee's role, projects, and documentation, may
//! call the `get_project_details` tool mid-exchange, and must reply with JSON
//! matching the guide schema. A parse mismatch fails the whole flow; there is
//! deliberately no fuzzy recovery at this boundary.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::flows::prompts::{GUIDE_PROMPT, GUIDE_SYSTEM, NO_DOCUMENTATION_FILLER};
use crate::llm_client::{LlmClient, ToolDefinition, ToolHandler};
use crate::models::guide::{GuideSection, GuideTask, OnboardingGuide};
use crate::tracker::ProjectTracker;

pub const PROJECT_TOOL_NAME: &str = "get_project_details";

/// Wire shape the model must produce. Ids are assigned server-side after the
/// parse succeeds, so the model never invents identifiers.
#[derive(Debug, Deserialize)]
struct GuideWire {
    title: String,
    sections: Vec<SectionWire>,
    progress_report: String,
}

#[derive(Debug, Deserialize)]
struct SectionWire {
    title: String,
    tasks: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectToolInput {
    project_key: String,
}

/// Adapts the project tracker to the LLM tool interface.
struct ProjectToolHandler(Arc<dyn ProjectTracker>);

#[async_trait]
impl ToolHandler for ProjectToolHandler {
    async fn run(&self, name: &str, input: &Value) -> anyhow::Result<Value> {
        if name != PROJECT_TOOL_NAME {
            anyhow::bail!("unknown tool '{name}'");
        }
        let input: ProjectToolInput = serde_json::from_value(input.clone())?;
        let details = self.0.project_details(&input.project_key).await;
        Ok(serde_json::to_value(details)?)
    }
}

fn project_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: PROJECT_TOOL_NAME.to_string(),
        description: "Get details for a given project tracker key.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "project_key": {
                    "type": "string",
                    "description": "The project key, e.g. \"PROJ\"."
                }
            },
            "required": ["project_key"]
        }),
    }
}

/// Generates a structured onboarding guide for a role/project combination.
pub async fn generate_onboarding_guide(
    llm: &LlmClient,
    tracker: Arc<dyn ProjectTracker>,
    role: &str,
    projects: &str,
    internal_documentation: Option<&str>,
) -> Result<OnboardingGuide, AppError> {
    let documentation = match internal_documentation {
        Some(docs) if !docs.trim().is_empty() => docs,
        _ => NO_DOCUMENTATION_FILLER,
    };

    let prompt = render_guide_prompt(role, projects, documentation);
    let tools = [project_tool_definition()];
    let handler = ProjectToolHandler(tracker);

    let wire: GuideWire = llm
        .call_json_with_tools(&prompt, GUIDE_SYSTEM, &tools, &handler)
        .await
        .map_err(|e| AppError::Llm(format!("Guide generation failed: {e}")))?;

    let guide = assign_task_ids(wire);
    info!(
        "Generated guide '{}' with {} sections",
        guide.title,
        guide.sections.len()
    );
    Ok(guide)
}

fn render_guide_prompt(role: &str, projects: &str, internal_documentation: &str) -> String {
    GUIDE_PROMPT
        .replace("{role}", role)
        .replace("{projects}", projects)
        .replace("{internal_documentation}", internal_documentation)
}

fn assign_task_ids(wire: GuideWire) -> OnboardingGuide {
    OnboardingGuide {
        title: wire.title,
        sections: wire
            .sections
            .into_iter()
            .map(|s| GuideSection {
                title: s.title,
                tasks: s
                    .tasks
                    .into_iter()
                    .map(|text| GuideTask {
                        id: Uuid::new_v4(),
                        text,
                        completed: false,
                    })
                    .collect(),
            })
            .collect(),
        progress_report: wire.progress_report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::MockTracker;

    const VALID_GUIDE_JSON: &str = r#"{
        "title": "Data Engineer Onboarding",
        "sections": [
            {"title": "Accounts", "tasks": ["Request VPN access", "Join the team channel"]},
            {"title": "First project", "tasks": ["Read the PROJ runbook"]}
        ],
        "progress_report": "Update your checklist daily."
    }"#;

    #[test]
    fn test_valid_guide_json_parses_and_gets_ids() {
        let wire: GuideWire = serde_json::from_str(VALID_GUIDE_JSON).unwrap();
        let guide = assign_task_ids(wire);
        assert_eq!(guide.title, "Data Engineer Onboarding");
        assert_eq!(guide.sections.len(), 2);
        assert_eq!(guide.sections[0].tasks.len(), 2);
        assert!(guide.sections.iter().all(|s| s
            .tasks
            .iter()
            .all(|t| !t.completed)));
        // Every task id is distinct
        let mut ids: Vec<Uuid> = guide
            .sections
            .iter()
            .flat_map(|s| s.tasks.iter().map(|t| t.id))
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_missing_field_fails_parse() {
        // No progress_report — must be rejected, not defaulted.
        let bad = r#"{"title": "Guide", "sections": []}"#;
        let result: Result<GuideWire, _> = serde_json::from_str(bad);
        assert!(result.is_err());
    }

    #[test]
    fn test_sections_preserve_order() {
        let wire: GuideWire = serde_json::from_str(VALID_GUIDE_JSON).unwrap();
        let guide = assign_task_ids(wire);
        assert_eq!(guide.sections[0].title, "Accounts");
        assert_eq!(guide.sections[1].title, "First project");
    }

    #[test]
    fn test_prompt_uses_filler_placeholders() {
        let prompt = render_guide_prompt("Software Engineer", "PROJ", NO_DOCUMENTATION_FILLER);
        assert!(prompt.contains("Role: Software Engineer"));
        assert!(prompt.contains("Projects: PROJ"));
        assert!(prompt.contains(NO_DOCUMENTATION_FILLER));
    }

    #[tokio::test]
    async fn test_project_tool_handler_runs_lookup() {
        let handler = ProjectToolHandler(Arc::new(MockTracker));
        let result = handler
            .run(PROJECT_TOOL_NAME, &json!({"project_key": "PROJ"}))
            .await
            .unwrap();
        assert!(result["name"].as_str().unwrap().contains("PROJ"));
        assert_eq!(result["lead"], "Project Lead");
    }

    #[tokio::test]
    async fn test_project_tool_handler_rejects_unknown_tool() {
        let handler = ProjectToolHandler(Arc::new(MockTracker));
        let result = handler.run("delete_everything", &json!({})).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_generated_guide_round_trips_through_chat_context() {
        // A flattened guide must still contain each task so a chat query
        // about a task's existence can be answered from the context.
        let wire: GuideWire = serde_json::from_str(VALID_GUIDE_JSON).unwrap();
        let guide = assign_task_ids(wire);
        let context = guide.flatten();
        assert!(context.contains("- [ ] Request VPN access"));
        assert!(context.contains("- [ ] Read the PROJ runbook"));
        assert!(context.contains("Update your checklist daily."));
    }
}

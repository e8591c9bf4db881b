use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated onboarding guide. Transient — constructed from model output,
/// never persisted. Completion state lives with whoever holds the value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingGuide {
    pub title: String,
    pub sections: Vec<GuideSection>,
    /// Instruction telling the employee how to report progress.
    pub progress_report: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideSection {
    pub title: String,
    pub tasks: Vec<GuideTask>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideTask {
    /// Assigned server-side at parse time; the model never produces ids.
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
}

impl OnboardingGuide {
    /// Flattens the guide to the text form the chat flow consumes as context:
    /// heading lines plus `- [x]` / `- [ ]` checklist markers.
    pub fn flatten(&self) -> String {
        let mut out = format!("# {}\n", self.title);
        for section in &self.sections {
            out.push_str(&format!("\n## {}\n", section.title));
            for task in &section.tasks {
                let mark = if task.completed { "x" } else { " " };
                out.push_str(&format!("- [{}] {}\n", mark, task.text));
            }
        }
        if !self.progress_report.is_empty() {
            out.push_str(&format!("\n{}\n", self.progress_report));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_guide() -> OnboardingGuide {
        OnboardingGuide {
            title: "Backend Engineer Onboarding".to_string(),
            sections: vec![GuideSection {
                title: "Week 1".to_string(),
                tasks: vec![
                    GuideTask {
                        id: Uuid::new_v4(),
                        text: "Set up development environment".to_string(),
                        completed: true,
                    },
                    GuideTask {
                        id: Uuid::new_v4(),
                        text: "Read the service runbook".to_string(),
                        completed: false,
                    },
                ],
            }],
            progress_report: "Report progress to your manager every Friday.".to_string(),
        }
    }

    #[test]
    fn test_flatten_includes_headings_and_markers() {
        let text = sample_guide().flatten();
        assert!(text.contains("# Backend Engineer Onboarding"));
        assert!(text.contains("## Week 1"));
        assert!(text.contains("- [x] Set up development environment"));
        assert!(text.contains("- [ ] Read the service runbook"));
        assert!(text.contains("Report progress to your manager every Friday."));
    }

    #[test]
    fn test_flatten_round_trips_task_text() {
        // The flattened form is what the chat flow receives as context, so
        // every task line must survive verbatim.
        let guide = sample_guide();
        let text = guide.flatten();
        for section in &guide.sections {
            for task in &section.tasks {
                assert!(text.contains(&task.text));
            }
        }
    }

    #[test]
    fn test_flatten_empty_progress_report_adds_nothing() {
        let mut guide = sample_guide();
        guide.progress_report.clear();
        let text = guide.flatten();
        assert!(!text.ends_with("\n\n"));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Done,
    Pending,
}

/// One task inside a user's progress record.
/// Tasks carry a stable id — updates are keyed on it, never on the title,
/// so two tasks with the same title cannot collide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressTask {
    pub id: Uuid,
    pub title: String,
    pub status: TaskStatus,
}

/// One progress record per user; `tasks` is stored as a jsonb array.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProgressRow {
    pub uid: String,
    pub name: String,
    pub project: String,
    pub tasks: Json<Vec<ProgressTask>>,
    pub last_updated: DateTime<Utc>,
}

/// Sets the status of the task with the given id. Returns false when no task
/// matches. Exactly one task is touched even if titles are duplicated.
pub fn set_task_status(tasks: &mut [ProgressTask], task_id: Uuid, status: TaskStatus) -> bool {
    match tasks.iter_mut().find(|t| t.id == task_id) {
        Some(task) => {
            task.status = status;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, status: TaskStatus) -> ProgressTask {
        ProgressTask {
            id: Uuid::new_v4(),
            title: title.to_string(),
            status,
        }
    }

    #[test]
    fn test_set_task_status_by_id() {
        let mut tasks = vec![
            task("Set up laptop", TaskStatus::Pending),
            task("Meet the team", TaskStatus::Pending),
        ];
        let id = tasks[1].id;

        assert!(set_task_status(&mut tasks, id, TaskStatus::Done));
        assert_eq!(tasks[0].status, TaskStatus::Pending);
        assert_eq!(tasks[1].status, TaskStatus::Done);
    }

    #[test]
    fn test_duplicate_titles_do_not_collide() {
        let mut tasks = vec![
            task("Review docs", TaskStatus::Pending),
            task("Review docs", TaskStatus::Pending),
        ];
        let second = tasks[1].id;

        assert!(set_task_status(&mut tasks, second, TaskStatus::Done));
        assert_eq!(tasks[0].status, TaskStatus::Pending);
        assert_eq!(tasks[1].status, TaskStatus::Done);
    }

    #[test]
    fn test_unknown_task_id_returns_false() {
        let mut tasks = vec![task("Set up laptop", TaskStatus::Pending)];
        assert!(!set_task_status(&mut tasks, Uuid::new_v4(), TaskStatus::Done));
        assert_eq!(tasks[0].status, TaskStatus::Pending);
    }

    #[test]
    fn test_task_status_serde_lowercase() {
        assert_eq!(serde_json::to_string(&TaskStatus::Done).unwrap(), "\"done\"");
        let parsed: TaskStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, TaskStatus::Pending);
    }
}

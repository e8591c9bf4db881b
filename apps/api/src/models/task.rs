use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row in the global onboarding task pool, fed by the task-extraction
/// endpoint and curated by HR.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OnboardingTaskRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub project: String,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// A single item on a user's personal checklist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChecklistItemRow {
    pub id: Uuid,
    pub uid: String,
    pub title: String,
    pub description: String,
    /// true = done, false = pending.
    pub status: bool,
}

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::task::{ChecklistItemRow, OnboardingTaskRow};

/// Returns the full global onboarding task pool, newest first.
pub async fn get_all_tasks(pool: &PgPool) -> Result<Vec<OnboardingTaskRow>, AppError> {
    Ok(sqlx::query_as::<_, OnboardingTaskRow>(
        "SELECT * FROM onboarding_tasks ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?)
}

/// Inserts one model-extracted task into the global pool with status 'pending'.
pub async fn insert_extracted_task(
    pool: &PgPool,
    project: &str,
    title: &str,
    description: &str,
    priority: &str,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO onboarding_tasks (id, title, description, project, priority, status, created_at)
        VALUES ($1, $2, $3, $4, $5, 'pending', NOW())
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(project)
    .bind(priority)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Returns a user's personal checklist.
pub async fn get_checklist(pool: &PgPool, uid: &str) -> Result<Vec<ChecklistItemRow>, AppError> {
    Ok(sqlx::query_as::<_, ChecklistItemRow>(
        "SELECT * FROM user_tasks WHERE uid = $1 ORDER BY title",
    )
    .bind(uid)
    .fetch_all(pool)
    .await?)
}

pub async fn add_checklist_item(
    pool: &PgPool,
    uid: &str,
    title: &str,
    description: &str,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO user_tasks (id, uid, title, description, status) VALUES ($1, $2, $3, $4, false)",
    )
    .bind(id)
    .bind(uid)
    .bind(title)
    .bind(description)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Sets the done/pending status of one checklist item.
pub async fn set_checklist_status(
    pool: &PgPool,
    uid: &str,
    task_id: Uuid,
    status: bool,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE user_tasks SET status = $3 WHERE id = $1 AND uid = $2")
        .bind(task_id)
        .bind(uid)
        .bind(status)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Checklist item {task_id} not found for user {uid}"
        )));
    }
    Ok(())
}

pub async fn delete_checklist_item(pool: &PgPool, uid: &str, task_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM user_tasks WHERE id = $1 AND uid = $2")
        .bind(task_id)
        .bind(uid)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Checklist item {task_id} not found for user {uid}"
        )));
    }
    Ok(())
}

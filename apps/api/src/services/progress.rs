use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::progress::{set_task_status, TaskStatus, UserProgressRow};

pub async fn get_user_progress(
    pool: &PgPool,
    uid: &str,
) -> Result<Option<UserProgressRow>, AppError> {
    Ok(
        sqlx::query_as::<_, UserProgressRow>("SELECT * FROM user_progress WHERE uid = $1")
            .bind(uid)
            .fetch_optional(pool)
            .await?,
    )
}

/// Updates the status of one task in a user's progress record, keyed on the
/// task's stable id. The whole tasks array is rewritten in place.
pub async fn update_task_status(
    pool: &PgPool,
    uid: &str,
    task_id: Uuid,
    status: TaskStatus,
) -> Result<(), AppError> {
    let Some(mut progress) = get_user_progress(pool, uid).await? else {
        return Err(AppError::NotFound(format!(
            "Progress record for user {uid} not found"
        )));
    };

    if !set_task_status(&mut progress.tasks.0, task_id, status) {
        return Err(AppError::NotFound(format!(
            "Task {task_id} not found in progress record for user {uid}"
        )));
    }

    sqlx::query("UPDATE user_progress SET tasks = $2, last_updated = $3 WHERE uid = $1")
        .bind(uid)
        .bind(Json(&progress.tasks.0))
        .bind(Utc::now())
        .execute(pool)
        .await?;

    info!("Updated task {task_id} for user {uid}");
    Ok(())
}

/// Returns progress records for every direct report of `manager_uid`.
///
/// Two-step query mirroring the collection layout: resolve the report uids
/// first, then fetch exactly those progress rows. A manager with no reports
/// gets an empty vec, not an error.
pub async fn get_team_progress(
    pool: &PgPool,
    manager_uid: &str,
) -> Result<Vec<UserProgressRow>, AppError> {
    let employee_uids: Vec<String> =
        sqlx::query_scalar("SELECT uid FROM users WHERE manager_uid = $1")
            .bind(manager_uid)
            .fetch_all(pool)
            .await?;

    if employee_uids.is_empty() {
        return Ok(Vec::new());
    }

    Ok(sqlx::query_as::<_, UserProgressRow>(
        "SELECT * FROM user_progress WHERE uid = ANY($1) ORDER BY name",
    )
    .bind(&employee_uids)
    .fetch_all(pool)
    .await?)
}

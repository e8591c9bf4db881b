use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::faq::FaqRow;
use crate::models::progress::{TaskStatus, UserProgressRow};
use crate::models::task::{ChecklistItemRow, OnboardingTaskRow};
use crate::models::user::{UserRole, UserRow};
use crate::services::{faqs, progress, tasks, users};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// FAQs
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/faqs — grouped by category.
pub async fn handle_list_faqs(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Vec<FaqRow>>>, AppError> {
    Ok(Json(faqs::get_all_faqs(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct AddFaqRequest {
    pub question: String,
    pub answer: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

/// POST /api/v1/faqs
pub async fn handle_add_faq(
    State(state): State<AppState>,
    Json(req): Json<AddFaqRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id = faqs::add_faq(&state.db, &req.question, &req.answer, &req.category).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateFaqRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
}

/// PATCH /api/v1/faqs/:id
pub async fn handle_update_faq(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFaqRequest>,
) -> Result<StatusCode, AppError> {
    faqs::update_faq(
        &state.db,
        id,
        req.question.as_deref(),
        req.answer.as_deref(),
        req.category.as_deref(),
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/faqs/:id
pub async fn handle_delete_faq(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    faqs::delete_faq(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Global task pool
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/tasks
pub async fn handle_list_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<OnboardingTaskRow>>, AppError> {
    Ok(Json(tasks::get_all_tasks(&state.db).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Users
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/users
pub async fn handle_list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserRow>>, AppError> {
    Ok(Json(users::get_all_users(&state.db).await?))
}

/// GET /api/v1/users/:uid
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<UserRow>, AppError> {
    users::get_user(&state.db, &uid)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {uid} not found")))
}

#[derive(Debug, Deserialize)]
pub struct UpsertUserRequest {
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub manager_uid: Option<String>,
}

/// PUT /api/v1/users/:uid
pub async fn handle_upsert_user(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(req): Json<UpsertUserRequest>,
) -> Result<StatusCode, AppError> {
    users::upsert_user(
        &state.db,
        &uid,
        &req.email,
        &req.name,
        req.role,
        req.manager_uid.as_deref(),
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}

/// PATCH /api/v1/users/:uid/role
pub async fn handle_update_role(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<StatusCode, AppError> {
    users::update_user_role(&state.db, &uid, req.role).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Personal checklists
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/checklist/:uid
pub async fn handle_get_checklist(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<ChecklistItemRow>>, AppError> {
    Ok(Json(tasks::get_checklist(&state.db, &uid).await?))
}

#[derive(Debug, Deserialize)]
pub struct AddChecklistItemRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// POST /api/v1/checklist/:uid
pub async fn handle_add_checklist_item(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(req): Json<AddChecklistItemRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id = tasks::add_checklist_item(&state.db, &uid, &req.title, &req.description).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[derive(Debug, Deserialize)]
pub struct ChecklistStatusRequest {
    pub status: bool,
}

/// PATCH /api/v1/checklist/:uid/:task_id
pub async fn handle_set_checklist_status(
    State(state): State<AppState>,
    Path((uid, task_id)): Path<(String, Uuid)>,
    Json(req): Json<ChecklistStatusRequest>,
) -> Result<StatusCode, AppError> {
    tasks::set_checklist_status(&state.db, &uid, task_id, req.status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/checklist/:uid/:task_id
pub async fn handle_delete_checklist_item(
    State(state): State<AppState>,
    Path((uid, task_id)): Path<(String, Uuid)>,
) -> Result<StatusCode, AppError> {
    tasks::delete_checklist_item(&state.db, &uid, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Progress
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/progress/:uid
pub async fn handle_get_progress(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<UserProgressRow>, AppError> {
    progress::get_user_progress(&state.db, &uid)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Progress record for user {uid} not found")))
}

#[derive(Debug, Deserialize)]
pub struct ProgressStatusRequest {
    pub status: TaskStatus,
}

/// PATCH /api/v1/progress/:uid/tasks/:task_id
pub async fn handle_update_progress_task(
    State(state): State<AppState>,
    Path((uid, task_id)): Path<(String, Uuid)>,
    Json(req): Json<ProgressStatusRequest>,
) -> Result<StatusCode, AppError> {
    progress::update_task_status(&state.db, &uid, task_id, req.status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/progress/team/:manager_uid
pub async fn handle_team_progress(
    State(state): State<AppState>,
    Path(manager_uid): Path<String>,
) -> Result<Json<Vec<UserProgressRow>>, AppError> {
    Ok(Json(
        progress::get_team_progress(&state.db, &manager_uid).await?,
    ))
}

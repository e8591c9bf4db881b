use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::flows::chat::onboarding_chat;
use crate::flows::extract::{extract_and_store_tasks, ExtractedTask};
use crate::flows::guide::generate_onboarding_guide;
use crate::flows::inquiry::policy_inquiry;
use crate::flows::summarize::summarize_policy;
use crate::models::guide::OnboardingGuide;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InquiryRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// POST /api/v1/assistant/inquiry
/// Never fails: errors come back as text in the answer field.
pub async fn handle_inquiry(
    State(state): State<AppState>,
    Json(req): Json<InquiryRequest>,
) -> Json<AnswerResponse> {
    let answer = policy_inquiry(&state.policies, &state.llm, &req.query).await;
    Json(AnswerResponse { answer })
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub policy_document: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// POST /api/v1/assistant/summarize
pub async fn handle_summarize(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, AppError> {
    let summary = summarize_policy(&state.llm, &req.policy_document).await?;
    Ok(Json(SummarizeResponse { summary }))
}

#[derive(Debug, Deserialize)]
pub struct GuideRequest {
    pub role: String,
    pub projects: String,
    pub internal_documentation: Option<String>,
}

/// POST /api/v1/assistant/guide
/// A schema mismatch in the model's reply fails the request with LLM_ERROR.
pub async fn handle_guide(
    State(state): State<AppState>,
    Json(req): Json<GuideRequest>,
) -> Result<Json<OnboardingGuide>, AppError> {
    let guide = generate_onboarding_guide(
        &state.llm,
        state.tracker.clone(),
        &req.role,
        &req.projects,
        req.internal_documentation.as_deref(),
    )
    .await?;
    Ok(Json(guide))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    pub guide_context: String,
}

/// POST /api/v1/assistant/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let answer = onboarding_chat(&state.llm, &req.query, &req.guide_context).await?;
    Ok(Json(AnswerResponse { answer }))
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub content: String,
    pub project: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub tasks: Vec<ExtractedTask>,
}

/// POST /api/v1/tasks/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let tasks = extract_and_store_tasks(&state.db, &state.llm, &req.content, &req.project).await?;
    Ok(Json(ExtractResponse {
        success: true,
        tasks,
    }))
}

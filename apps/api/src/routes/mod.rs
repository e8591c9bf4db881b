pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::flows::handlers as flow_handlers;
use crate::policies::handlers as policy_handlers;
use crate::services::handlers as crud_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assistant flows
        .route("/api/v1/assistant/inquiry", post(flow_handlers::handle_inquiry))
        .route(
            "/api/v1/assistant/summarize",
            post(flow_handlers::handle_summarize),
        )
        .route("/api/v1/assistant/guide", post(flow_handlers::handle_guide))
        .route("/api/v1/assistant/chat", post(flow_handlers::handle_chat))
        .route("/api/v1/tasks/extract", post(flow_handlers::handle_extract))
        // Policies (read-only, derived from object storage)
        .route("/api/v1/policies", get(policy_handlers::handle_list_policies))
        // FAQs
        .route(
            "/api/v1/faqs",
            get(crud_handlers::handle_list_faqs).post(crud_handlers::handle_add_faq),
        )
        .route(
            "/api/v1/faqs/:id",
            patch(crud_handlers::handle_update_faq).delete(crud_handlers::handle_delete_faq),
        )
        // Global task pool
        .route("/api/v1/tasks", get(crud_handlers::handle_list_tasks))
        // Users
        .route("/api/v1/users", get(crud_handlers::handle_list_users))
        .route(
            "/api/v1/users/:uid",
            get(crud_handlers::handle_get_user).put(crud_handlers::handle_upsert_user),
        )
        .route(
            "/api/v1/users/:uid/role",
            patch(crud_handlers::handle_update_role),
        )
        // Personal checklists
        .route(
            "/api/v1/checklist/:uid",
            get(crud_handlers::handle_get_checklist).post(crud_handlers::handle_add_checklist_item),
        )
        .route(
            "/api/v1/checklist/:uid/:task_id",
            patch(crud_handlers::handle_set_checklist_status)
                .delete(crud_handlers::handle_delete_checklist_item),
        )
        // Progress
        .route(
            "/api/v1/progress/team/:manager_uid",
            get(crud_handlers::handle_team_progress),
        )
        .route("/api/v1/progress/:uid", get(crud_handlers::handle_get_progress))
        .route(
            "/api/v1/progress/:uid/tasks/:task_id",
            patch(crud_handlers::handle_update_progress_task),
        )
        .with_state(state)
}

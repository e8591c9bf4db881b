use axum::{extract::State, Json};

use crate::models::policy::Policy;
use crate::state::AppState;

/// GET /api/v1/policies
/// An empty array is a valid state — it means nothing is uploaded yet.
pub async fn handle_list_policies(State(state): State<AppState>) -> Json<Vec<Policy>> {
    Json(state.policies.get_policies().await)
}

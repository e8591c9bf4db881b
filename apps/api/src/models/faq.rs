use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FaqRow {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub category: String,
}

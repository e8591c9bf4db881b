use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::user::{UserRole, UserRow};

pub async fn get_user(pool: &PgPool, uid: &str) -> Result<Option<UserRow>, AppError> {
    Ok(
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE uid = $1")
            .bind(uid)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn get_all_users(pool: &PgPool) -> Result<Vec<UserRow>, AppError> {
    Ok(sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY name")
        .fetch_all(pool)
        .await?)
}

/// Creates or replaces the record for `uid` (the uid comes from the auth
/// provider, so writes are keyed on it rather than generating an id).
pub async fn upsert_user(
    pool: &PgPool,
    uid: &str,
    email: &str,
    name: &str,
    role: UserRole,
    manager_uid: Option<&str>,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO users (uid, email, name, role, manager_uid)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (uid) DO UPDATE
        SET email = EXCLUDED.email,
            name = EXCLUDED.name,
            role = EXCLUDED.role,
            manager_uid = EXCLUDED.manager_uid
        "#,
    )
    .bind(uid)
    .bind(email)
    .bind(name)
    .bind(role)
    .bind(manager_uid)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn update_user_role(pool: &PgPool, uid: &str, role: UserRole) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE users SET role = $2 WHERE uid = $1")
        .bind(uid)
        .bind(role)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("User {uid} not found")));
    }
    Ok(())
}

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::Result, models::Login};

pub async fn create_login(
    pool: &PgPool,
    username: &str,
    user_id: Uuid,
    password_hash: &str,
) -> Result<Login> {
    let login = sqlx::query_as::<_, Login>(
        r#"
        INSERT INTO logins (username, user_id, password_hash)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(user_id)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(login)
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<Login>> {
    let login = sqlx::query_as::<_, Login>("SELECT * FROM logins WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(login)
}

pub async fn find_by_user_id(pool: &PgPool, user_id: Uuid) -> Result<Option<Login>> {
    let login = sqlx::query_as::<_, Login>("SELECT * FROM logins WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(login)
}

pub async fn list_logins(pool: &PgPool) -> Result<Vec<Login>> {
    let logins = sqlx::query_as::<_, Login>("SELECT * FROM logins ORDER BY created_at")
        .fetch_all(pool)
        .await?;

    Ok(logins)
}

pub async fn update_login(
    pool: &PgPool,
    username: &str,
    user_id: Option<Uuid>,
    password_hash: Option<&str>,
) -> Result<Option<Login>> {
    let login = sqlx::query_as::<_, Login>(
        r#"
        UPDATE logins
        SET
            user_id = COALESCE($1, user_id),
            password_hash = COALESCE($2, password_hash),
            updated_at = NOW()
        WHERE username = $3
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(password_hash)
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(login)
}

pub async fn delete_login(pool: &PgPool, username: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM logins WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

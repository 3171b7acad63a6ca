use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::Admin,
};

pub async fn create_admin(pool: &PgPool, name: &str) -> Result<Admin> {
    let admin = sqlx::query_as::<_, Admin>(
        "INSERT INTO admins (admin_id, name) VALUES ($1, $2) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(admin)
}

pub async fn find_by_id(pool: &PgPool, admin_id: Uuid) -> Result<Option<Admin>> {
    let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE admin_id = $1")
        .bind(admin_id)
        .fetch_optional(pool)
        .await?;

    Ok(admin)
}

pub async fn list_admins(pool: &PgPool) -> Result<Vec<Admin>> {
    let admins = sqlx::query_as::<_, Admin>("SELECT * FROM admins ORDER BY created_at")
        .fetch_all(pool)
        .await?;

    Ok(admins)
}

pub async fn update_admin(
    pool: &PgPool,
    admin_id: Uuid,
    name: Option<&str>,
) -> Result<Option<Admin>> {
    let admin = sqlx::query_as::<_, Admin>(
        r#"
        UPDATE admins
        SET
            name = COALESCE($1, name),
            updated_at = NOW()
        WHERE admin_id = $2
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(admin_id)
    .fetch_optional(pool)
    .await?;

    Ok(admin)
}

pub async fn delete_admin(pool: &PgPool, admin_id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM admins WHERE admin_id = $1")
        .bind(admin_id)
        .execute(pool)
        .await
        .map_err(map_restricted_delete_error)?;

    Ok(result.rows_affected())
}

/// A dependent row inserted between the handler's pre-check and this delete
/// trips the foreign key; under the restrict policy that is a conflict, not
/// a dangling reference.
fn map_restricted_delete_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_foreign_key_violation() {
            return AppError::Conflict(
                "Admin still has dependents; pass cascade=true to delete them too".to_string(),
            );
        }
    }
    err.into()
}

/// Removes the admin together with its login and products in one transaction.
pub async fn delete_admin_cascade(pool: &PgPool, admin_id: Uuid) -> Result<u64> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM logins WHERE user_id = $1")
        .bind(admin_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM products WHERE admin_id = $1")
        .bind(admin_id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM admins WHERE admin_id = $1")
        .bind(admin_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected())
}

pub async fn count_owned_products(pool: &PgPool, admin_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE admin_id = $1")
        .bind(admin_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_constraint_errors_pass_through_restricted_delete_mapping() {
        let err = map_restricted_delete_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[test]
    fn pool_timeout_is_not_rewritten_to_conflict() {
        let err = map_restricted_delete_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}

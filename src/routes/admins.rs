use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{Admin, CreateAdminRequest, DeleteAdminQuery, Product, UpdateAdminRequest},
    queries::{admin_queries, login_queries, product_queries},
    AppState,
};

pub async fn list_admins(State(state): State<AppState>) -> Result<Json<Vec<Admin>>> {
    let admins = admin_queries::list_admins(&state.db).await?;

    Ok(Json(admins))
}

pub async fn create_admin(
    State(state): State<AppState>,
    Json(payload): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<Admin>)> {
    validate_admin_name(&payload.name)?;

    let admin = admin_queries::create_admin(&state.db, payload.name.trim()).await?;

    Ok((StatusCode::CREATED, Json(admin)))
}

pub async fn get_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Admin>> {
    let admin = admin_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Admin with id {} not found", id)))?;

    Ok(Json(admin))
}

pub async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAdminRequest>,
) -> Result<Json<Admin>> {
    if let Some(ref name) = payload.name {
        validate_admin_name(name)?;
    }

    let admin = admin_queries::update_admin(&state.db, id, payload.name.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Admin with id {} not found", id)))?;

    Ok(Json(admin))
}

pub async fn delete_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteAdminQuery>,
) -> Result<StatusCode> {
    if admin_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound(format!("Admin with id {} not found", id)));
    }

    let product_count = admin_queries::count_owned_products(&state.db, id).await?;
    let has_login = login_queries::find_by_user_id(&state.db, id).await?.is_some();

    match plan_admin_delete(params.cascade, product_count, has_login)? {
        DeletePlan::CascadeDependents => {
            admin_queries::delete_admin_cascade(&state.db, id).await?;
        }
        DeletePlan::AdminOnly => {
            admin_queries::delete_admin(&state.db, id).await?;
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, PartialEq)]
enum DeletePlan {
    CascadeDependents,
    AdminOnly,
}

/// Restrict policy: an admin with dependents is only deletable with the
/// explicit cascade flag.
fn plan_admin_delete(cascade: bool, product_count: i64, has_login: bool) -> Result<DeletePlan> {
    if cascade {
        return Ok(DeletePlan::CascadeDependents);
    }

    if product_count > 0 {
        return Err(AppError::Conflict(format!(
            "Admin owns {} products; pass cascade=true to delete them too",
            product_count
        )));
    }

    if has_login {
        return Err(AppError::Conflict(
            "Admin has a login; pass cascade=true to delete it too".to_string(),
        ));
    }

    Ok(DeletePlan::AdminOnly)
}

pub async fn list_admin_products(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Product>>> {
    if admin_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound(format!("Admin with id {} not found", id)));
    }

    let products = product_queries::list_by_admin(&state.db, id).await?;

    Ok(Json(products))
}

fn validate_admin_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Name cannot be empty".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        assert!(validate_admin_name("").is_err());
        assert!(validate_admin_name("   ").is_err());
    }

    #[test]
    fn non_empty_name_is_accepted() {
        assert!(validate_admin_name("Alice").is_ok());
    }

    #[test]
    fn delete_without_cascade_conflicts_on_owned_products() {
        let result = plan_admin_delete(false, 3, false);
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn delete_without_cascade_conflicts_on_existing_login() {
        let result = plan_admin_delete(false, 0, true);
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn cascade_flag_always_removes_dependents_with_the_admin() {
        // cascade overrides the restrict policy for every dependent combination
        for product_count in [0, 1, 7] {
            for has_login in [false, true] {
                let plan = plan_admin_delete(true, product_count, has_login).unwrap();
                assert_eq!(plan, DeletePlan::CascadeDependents);
            }
        }
    }

    #[test]
    fn dependent_free_admin_deletes_without_cascade() {
        let plan = plan_admin_delete(false, 0, false).unwrap();
        assert_eq!(plan, DeletePlan::AdminOnly);
    }

    #[test]
    fn restrict_policy_blocks_every_dependent_combination() {
        for (product_count, has_login) in [(1, false), (0, true), (2, true)] {
            assert!(plan_admin_delete(false, product_count, has_login).is_err());
        }
    }
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{CreateLoginRequest, LoginResponse, UpdateLoginRequest},
    queries::{admin_queries, login_queries},
    AppState,
};

pub async fn list_logins(State(state): State<AppState>) -> Result<Json<Vec<LoginResponse>>> {
    let logins = login_queries::list_logins(&state.db).await?;

    Ok(Json(logins.into_iter().map(LoginResponse::from).collect()))
}

pub async fn create_login(
    State(state): State<AppState>,
    Json(payload): Json<CreateLoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>)> {
    validate_username(&payload.username)?;
    validate_password(&payload.password)?;

    let owner_found = admin_queries::find_by_id(&state.db, payload.user_id)
        .await?
        .is_some();
    ensure_owner_exists(owner_found, payload.user_id)?;

    let username_taken = login_queries::find_by_username(&state.db, &payload.username)
        .await?
        .is_some();
    let admin_has_login = login_queries::find_by_user_id(&state.db, payload.user_id)
        .await?
        .is_some();
    ensure_login_slot_free(username_taken, admin_has_login, &payload.username, payload.user_id)?;

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

    let login =
        login_queries::create_login(&state.db, &payload.username, payload.user_id, &password_hash)
            .await?;

    Ok((StatusCode::CREATED, Json(LoginResponse::from(login))))
}

pub async fn get_login(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<LoginResponse>> {
    let login = login_queries::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Login '{}' not found", username)))?;

    Ok(Json(LoginResponse::from(login)))
}

pub async fn update_login(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(payload): Json<UpdateLoginRequest>,
) -> Result<Json<LoginResponse>> {
    if payload.user_id.is_none() && payload.password.is_none() {
        return Err(AppError::BadRequest(
            "At least one field (user_id or password) must be provided".to_string(),
        ));
    }

    if let Some(user_id) = payload.user_id {
        if admin_queries::find_by_id(&state.db, user_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Admin with id {} does not exist",
                user_id
            )));
        }

        if let Some(existing) = login_queries::find_by_user_id(&state.db, user_id).await? {
            if existing.username != username {
                return Err(AppError::Conflict(format!(
                    "Admin with id {} already has a login",
                    user_id
                )));
            }
        }
    }

    let password_hash = match payload.password {
        Some(ref password) => {
            validate_password(password)?;
            Some(
                bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| {
                    AppError::InternalError(format!("Password hashing failed: {}", e))
                })?,
            )
        }
        None => None,
    };

    let login = login_queries::update_login(
        &state.db,
        &username,
        payload.user_id,
        password_hash.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Login '{}' not found", username)))?;

    Ok(Json(LoginResponse::from(login)))
}

pub async fn delete_login(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<StatusCode> {
    let deleted = login_queries::delete_login(&state.db, &username).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("Login '{}' not found", username)));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn ensure_owner_exists(owner_found: bool, user_id: Uuid) -> Result<()> {
    if !owner_found {
        return Err(AppError::BadRequest(format!(
            "Admin with id {} does not exist",
            user_id
        )));
    }

    Ok(())
}

/// The username is the primary key and the user_id is unique, so a login is
/// only creatable when both slots are free.
fn ensure_login_slot_free(
    username_taken: bool,
    admin_has_login: bool,
    username: &str,
    user_id: Uuid,
) -> Result<()> {
    if username_taken {
        return Err(AppError::Conflict(format!(
            "Username '{}' is already taken",
            username
        )));
    }

    if admin_has_login {
        return Err(AppError::Conflict(format!(
            "Admin with id {} already has a login",
            user_id
        )));
    }

    Ok(())
}

fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(AppError::BadRequest("Username cannot be empty".to_string()));
    }

    if username.chars().any(char::is_whitespace) {
        return Err(AppError::BadRequest(
            "Username cannot contain whitespace".to_string(),
        ));
    }

    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_must_be_non_empty_without_whitespace() {
        assert!(validate_username("").is_err());
        assert!(validate_username("a b").is_err());
        assert!(validate_username("alice").is_ok());
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("longenough").is_ok());
    }

    #[test]
    fn duplicate_username_is_a_conflict() {
        let user_id = Uuid::new_v4();
        let result = ensure_login_slot_free(true, false, "alice", user_id);
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn second_login_for_an_admin_is_a_conflict() {
        let user_id = Uuid::new_v4();
        let result = ensure_login_slot_free(false, true, "alice2", user_id);
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn free_username_and_admin_slot_are_accepted() {
        assert!(ensure_login_slot_free(false, false, "alice", Uuid::new_v4()).is_ok());
    }

    #[test]
    fn dangling_owner_is_a_bad_request() {
        let result = ensure_owner_exists(false, Uuid::new_v4());
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(ensure_owner_exists(true, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn login_response_carries_every_exposed_field() {
        use crate::models::{Login, LoginResponse};
        use chrono::Utc;

        let now = Utc::now();
        let user_id = Uuid::new_v4();
        let login = Login {
            username: "alice".to_string(),
            user_id,
            password_hash: "$2b$04$hash".to_string(),
            created_at: now,
            updated_at: now,
        };

        let response = LoginResponse::from(login);
        assert_eq!(response.username, "alice");
        assert_eq!(response.user_id, user_id);
        assert_eq!(response.created_at, now);
        assert_eq!(response.updated_at, now);
    }

    #[test]
    fn stored_hash_verifies_against_original_password() {
        // cost 4 keeps the test fast; runtime uses DEFAULT_COST
        let hash = bcrypt::hash("correct horse", 4).unwrap();
        assert!(bcrypt::verify("correct horse", &hash).unwrap());
        assert!(!bcrypt::verify("wrong horse", &hash).unwrap());
    }
}

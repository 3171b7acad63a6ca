use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{CreateProductRequest, Product, UpdateProductRequest},
    queries::{admin_queries, product_queries},
    AppState,
};

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = product_queries::list_products(&state.db).await?;

    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    validate_name(&payload.name)?;
    validate_price(payload.price)?;
    if let Some(quantity) = payload.quantity {
        validate_quantity(quantity)?;
    }

    let owner_found = admin_queries::find_by_id(&state.db, payload.admin_id)
        .await?
        .is_some();
    ensure_owner_exists(owner_found, payload.admin_id)?;

    let product = product_queries::create_product(&state.db, &payload).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>> {
    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))?;

    Ok(Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    if let Some(ref name) = payload.name {
        validate_name(name)?;
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    if let Some(quantity) = payload.quantity {
        validate_quantity(quantity)?;
    }

    let product = product_queries::update_product(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))?;

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = product_queries::delete_product(&state.db, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("Product with id {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn ensure_owner_exists(owner_found: bool, admin_id: Uuid) -> Result<()> {
    if !owner_found {
        return Err(AppError::BadRequest(format!(
            "Admin with id {} does not exist",
            admin_id
        )));
    }

    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Name cannot be empty".to_string()));
    }

    Ok(())
}

fn validate_price(price: Decimal) -> Result<()> {
    if price < Decimal::ZERO {
        return Err(AppError::BadRequest(
            "Price must be non-negative".to_string(),
        ));
    }

    Ok(())
}

fn validate_quantity(quantity: i32) -> Result<()> {
    if quantity < 0 {
        return Err(AppError::BadRequest(
            "Quantity must be non-negative".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn negative_price_is_rejected() {
        assert!(validate_price(Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn zero_and_positive_prices_are_accepted() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::new(999, 2)).is_ok());
    }

    #[test]
    fn negative_quantity_is_rejected() {
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(5).is_ok());
    }

    #[test]
    fn blank_product_name_is_rejected() {
        assert!(validate_name(" ").is_err());
        assert!(validate_name("Widget").is_ok());
    }

    #[test]
    fn product_with_dangling_owner_is_a_bad_request() {
        let result = ensure_owner_exists(false, Uuid::new_v4());
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(ensure_owner_exists(true, Uuid::new_v4()).is_ok());
    }
}

mod admins;
mod health;
mod logins;
mod products;

use axum::{routing::get, Router};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route(
            "/admins",
            get(admins::list_admins).post(admins::create_admin),
        )
        .route(
            "/admins/:id",
            get(admins::get_admin)
                .put(admins::update_admin)
                .delete(admins::delete_admin),
        )
        .route("/admins/:id/products", get(admins::list_admin_products))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/logins",
            get(logins::list_logins).post(logins::create_login),
        )
        .route(
            "/logins/:username",
            get(logins::get_login)
                .put(logins::update_login)
                .delete(logins::delete_login),
        )
}

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{CreateProductRequest, Product, UpdateProductRequest},
};

pub async fn create_product(pool: &PgPool, req: &CreateProductRequest) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (product_id, admin_id, name, description, image, price, quantity)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.admin_id)
    .bind(&req.name)
    .bind(&req.description)
    .bind(&req.image)
    .bind(req.price)
    .bind(req.quantity.unwrap_or(0))
    .fetch_one(pool)
    .await?;

    Ok(product)
}

pub async fn find_by_id(pool: &PgPool, product_id: Uuid) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE product_id = $1")
        .bind(product_id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at")
        .fetch_all(pool)
        .await?;

    Ok(products)
}

pub async fn list_by_admin(pool: &PgPool, admin_id: Uuid) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE admin_id = $1 ORDER BY created_at",
    )
    .bind(admin_id)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn update_product(
    pool: &PgPool,
    product_id: Uuid,
    req: &UpdateProductRequest,
) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            image = COALESCE($3, image),
            price = COALESCE($4, price),
            quantity = COALESCE($5, quantity),
            updated_at = NOW()
        WHERE product_id = $6
        RETURNING *
        "#,
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(&req.image)
    .bind(req.price)
    .bind(req.quantity)
    .bind(product_id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

pub async fn delete_product(pool: &PgPool, product_id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
        .bind(product_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

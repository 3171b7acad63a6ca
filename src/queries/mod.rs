pub mod admin_queries;
pub mod login_queries;
pub mod product_queries;

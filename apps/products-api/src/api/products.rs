//! Products API routes

use axum::Router;
use domain_products::{PgProductOptionRepository, PgProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create products router over the stored-procedure repositories
pub fn router(state: &AppState) -> Router {
    let products = PgProductRepository::new(state.db.clone());
    let options = PgProductOptionRepository::new(state.db.clone());
    handlers::router(ProductService::new(products, options))
}

//! Products Domain
//!
//! Products and their options, persisted exclusively through PostgreSQL
//! stored procedures.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, id-mismatch checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← existence checks, cascade orchestration
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← traits + stored-procedure and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, ProductOption, list envelopes
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{PgProductOptionRepository, PgProductRepository, ProductService, handlers};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = database::postgres::connect("postgres://localhost/products").await?;
//!
//! let service = ProductService::new(
//!     PgProductRepository::new(db.clone()),
//!     PgProductOptionRepository::new(db),
//! );
//! let router = axum::Router::new().nest("/products", handlers::router(service));
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    EntityState, Product, ProductList, ProductOption, ProductOptionList, ProductQuery,
};
pub use postgres::{PgProductOptionRepository, PgProductRepository};
pub use repository::{
    InMemoryProductOptionRepository, InMemoryProductRepository, ProductOptionRepository,
    ProductRepository,
};
pub use service::ProductService;

//! # product-service
//!
//! HTTP CRUD service for a product catalog backed by PostgreSQL.
//!
//! ## Features
//!
//! - **Product API**: paginated listing, lookup, create, partial update, soft delete
//! - **Middleware stack**: request ID tracking, panic recovery, body size limits
//! - **Health checks**: liveness and readiness probes
//! - **Graceful shutdown**: SIGTERM and SIGINT handling
//!
//! ## Example
//!
//! ```rust,no_run
//! use product_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let pool = create_pool(&config.database).await?;
//!     ensure_schema(&pool).await?;
//!
//!     let app = routes(&config, PgProductRepository::new(pool));
//!     Server::new(config).serve(app).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod health;
pub mod ids;
pub mod middleware;
pub mod observability;
pub mod product;
pub mod repository;
pub mod responses;
pub mod server;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig, MiddlewareConfig, ServiceConfig};
    pub use crate::database::{create_pool, ensure_schema};
    pub use crate::error::{DatabaseError, DatabaseErrorKind, DatabaseOperation, Error, Result};
    pub use crate::handlers::{ApiError, CollectionHandler, ListQuery, ProductHandler, PAGE_SIZE};
    pub use crate::health::{health, readiness, HealthState};
    pub use crate::ids::{MakeTypedRequestId, RequestId};
    pub use crate::middleware::{
        request_id_layer, request_id_propagation_layer, sensitive_headers_layer,
        SENSITIVE_HEADERS,
    };
    pub use crate::observability::init_tracing;
    pub use crate::product::{NewProduct, Product, ProductChanges};
    pub use crate::repository::{
        InMemoryProductRepository, Pagination, PgProductRepository, ProductRepository,
        Repository, RepositoryError, SoftDeleteRepository,
    };
    pub use crate::responses::{Created, NoContent};
    pub use crate::server::{routes, Server};

    pub use axum::{routing::get, Json, Router};
}

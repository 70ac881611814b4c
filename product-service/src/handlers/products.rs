//! Product resource handler and routes
//!
//! | Method | Path             | Success          |
//! |--------|------------------|------------------|
//! | GET    | `/products`      | 200 + array      |
//! | GET    | `/products/{id}` | 200 + object     |
//! | POST   | `/products`      | 201 + object     |
//! | PUT    | `/products/{id}` | 204              |
//! | DELETE | `/products/{id}` | 204              |
//!
//! # Example
//!
//! ```rust,ignore
//! use product_service::handlers::ProductHandler;
//! use product_service::repository::PgProductRepository;
//!
//! let app = ProductHandler::new(PgProductRepository::new(pool)).router();
//! ```

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use super::error::{ApiError, ApiOperation};
use super::payload::{CreateProductRequest, UpdateProductRequest};
use super::query::ListQuery;
use super::traits::CollectionHandler;
use crate::product::{Product, ENTITY_TYPE};
use crate::repository::ProductRepository;
use crate::responses::{Created, NoContent};

/// Handles product requests against an injected repository
#[derive(Debug, Clone)]
pub struct ProductHandler<R> {
    repository: R,
}

impl<R: ProductRepository> ProductHandler<R> {
    /// Create a handler over `repository`
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Build the `/products` routes with this handler as state
    pub fn router(self) -> Router {
        Router::new()
            .route("/products", get(list_products::<R>).post(create_product::<R>))
            .route(
                "/products/{id}",
                get(get_product::<R>)
                    .put(update_product::<R>)
                    .delete(delete_product::<R>),
            )
            .with_state(self)
    }

    // Unparseable IDs, missing rows and deleted rows all read as 404.
    async fn find_visible(&self, operation: ApiOperation, raw_id: &str) -> Result<Product, ApiError> {
        let not_found = || ApiError::not_found(operation, ENTITY_TYPE, raw_id);

        let id = Uuid::parse_str(raw_id).map_err(|_| not_found())?;
        self.repository
            .find_by_id(&id)
            .await
            .map_err(|e| ApiError::from(e).with_operation(operation))?
            .ok_or_else(not_found)
    }
}

impl<R: ProductRepository> CollectionHandler<Product> for ProductHandler<R> {
    #[instrument(skip(self), fields(page = query.page_number()))]
    async fn list(&self, query: ListQuery) -> Result<Vec<Product>, ApiError> {
        let products = self.repository.find_all(query.pagination()).await?;
        tracing::debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: String) -> Result<Product, ApiError> {
        self.find_visible(ApiOperation::Get, &id).await
    }

    #[instrument(skip(self, body))]
    async fn create(&self, body: Bytes) -> Result<Product, ApiError> {
        let new_product = CreateProductRequest::from_body(&body)?.into_new_product(Utc::now())?;
        let product = self.repository.create(new_product).await?;

        tracing::info!(
            product_id = %product.id,
            sku = %product.sku,
            active = !product.is_deleted(),
            "Product created"
        );
        Ok(product)
    }

    #[instrument(skip(self, body))]
    async fn update(&self, id: String, body: Bytes) -> Result<(), ApiError> {
        let existing = self.find_visible(ApiOperation::Update, &id).await?;
        let changes = UpdateProductRequest::from_body(&body)?.into_changes()?;
        let fields = changes.fields();

        self.repository.update(&existing.id, changes).await?;

        tracing::info!(product_id = %existing.id, ?fields, "Product updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: String) -> Result<(), ApiError> {
        let existing = self.find_visible(ApiOperation::Delete, &id).await?;

        if !self.repository.soft_delete(&existing.id).await? {
            // Deleted by a concurrent request after the lookup.
            return Err(ApiError::not_found(ApiOperation::Delete, ENTITY_TYPE, id));
        }

        tracing::info!(product_id = %existing.id, "Product soft-deleted");
        Ok(())
    }
}

async fn list_products<R: ProductRepository>(
    State(handler): State<ProductHandler<R>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let query = query
        .map(|Query(pairs)| ListQuery::from_pairs(pairs))
        .unwrap_or_default();
    handler.list(query).await.map(Json)
}

async fn get_product<R: ProductRepository>(
    State(handler): State<ProductHandler<R>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    handler.get(id).await.map(Json)
}

async fn create_product<R: ProductRepository>(
    State(handler): State<ProductHandler<R>>,
    body: Bytes,
) -> Result<Created<Product>, ApiError> {
    let product = handler.create(body).await?;
    let location = format!("/products/{}", product.id);
    Ok(Created::new(product).with_location(location))
}

async fn update_product<R: ProductRepository>(
    State(handler): State<ProductHandler<R>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<NoContent, ApiError> {
    handler.update(id, body).await?;
    Ok(NoContent)
}

async fn delete_product<R: ProductRepository>(
    State(handler): State<ProductHandler<R>>,
    Path(id): Path<String>,
) -> Result<NoContent, ApiError> {
    handler.delete(id).await?;
    Ok(NoContent)
}

//! PostgreSQL product repository
//!
//! Every operation is a single statement. Soft-deleted rows are filtered
//! with `deleted_at IS NULL` in each read and write.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::Pagination;
use super::traits::{ProductRepository, Repository, RepositoryResult, SoftDeleteRepository};
use crate::error::DatabaseError;
use crate::product::{NewProduct, Product, ProductChanges, ENTITY_TYPE};

const RETURNING: &str = " RETURNING id, name, sku, price, stock, created_at, updated_at, deleted_at";

const FIND_BY_ID: &str = "SELECT id, name, sku, price, stock, created_at, updated_at, deleted_at \
     FROM products WHERE id = $1 AND deleted_at IS NULL";

const FIND_ALL: &str = "SELECT id, name, sku, price, stock, created_at, updated_at, deleted_at \
     FROM products WHERE deleted_at IS NULL \
     ORDER BY created_at, id LIMIT $1 OFFSET $2";

const SOFT_DELETE: &str = "UPDATE products SET deleted_at = now(), updated_at = now() \
     WHERE id = $1 AND deleted_at IS NULL";

/// Product repository backed by a `PgPool`
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_error(operation: RepositoryOperation) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |err| {
        let err = DatabaseError::from(err).into_repository_error(operation);
        tracing::warn!(
            operation = %err.operation,
            kind = %err.kind,
            "Product query failed: {}", err.message
        );
        err
    }
}

fn insert_query(data: &NewProduct) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::<Postgres>::new(
        "INSERT INTO products (name, sku, price, stock, deleted_at) VALUES (",
    );
    let mut values = query.separated(", ");
    values.push_bind(&data.name);
    values.push_bind(&data.sku);
    values.push_bind(data.price);
    values.push_bind(data.stock);
    values.push_bind(data.deleted_at);
    query.push(")");
    query.push(RETURNING);
    query
}

// Only supplied fields are assigned; `updated_at` always moves.
fn update_query<'a>(id: &Uuid, data: &'a ProductChanges) -> QueryBuilder<'a, Postgres> {
    let mut query = QueryBuilder::<Postgres>::new("UPDATE products SET ");
    let mut assignments = query.separated(", ");
    if let Some(name) = &data.name {
        assignments.push("name = ").push_bind_unseparated(name);
    }
    if let Some(sku) = &data.sku {
        assignments.push("sku = ").push_bind_unseparated(sku);
    }
    if let Some(price) = data.price {
        assignments.push("price = ").push_bind_unseparated(price);
    }
    if let Some(stock) = data.stock {
        assignments.push("stock = ").push_bind_unseparated(stock);
    }
    assignments.push("updated_at = now()");
    query
        .push(" WHERE id = ")
        .push_bind(*id)
        .push(" AND deleted_at IS NULL")
        .push(RETURNING);
    query
}

impl Repository<Uuid, Product, NewProduct, ProductChanges> for PgProductRepository {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn find_by_id(&self, id: &Uuid) -> RepositoryResult<Option<Product>> {
        sqlx::query_as::<_, Product>(FIND_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::FindById))
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn find_all(&self, pagination: Pagination) -> RepositoryResult<Vec<Product>> {
        sqlx::query_as::<_, Product>(FIND_ALL)
            .bind(pagination.sql_limit())
            .bind(pagination.sql_offset())
            .fetch_all(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::FindAll))
    }

    #[tracing::instrument(skip(self, data), fields(sku = %data.sku), level = "debug")]
    async fn create(&self, data: NewProduct) -> RepositoryResult<Product> {
        let mut query = insert_query(&data);
        query
            .build_query_as::<Product>()
            .fetch_one(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::Create))
    }

    #[tracing::instrument(skip(self, data), fields(changed = ?data.fields()), level = "debug")]
    async fn update(&self, id: &Uuid, data: ProductChanges) -> RepositoryResult<Product> {
        let mut query = update_query(id, &data);
        query
            .build_query_as::<Product>()
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::Update))?
            .ok_or_else(|| {
                RepositoryError::not_found(ENTITY_TYPE, id.to_string())
                    .with_operation(RepositoryOperation::Update)
            })
    }
}

impl SoftDeleteRepository<Uuid, Product, NewProduct, ProductChanges> for PgProductRepository {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn soft_delete(&self, id: &Uuid) -> RepositoryResult<bool> {
        let result = sqlx::query(SOFT_DELETE)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::SoftDelete))?;

        Ok(result.rows_affected() > 0)
    }
}

impl ProductRepository for PgProductRepository {
    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(store_error(RepositoryOperation::Ping))
    }
}

//! In-memory product repository
//!
//! Behaves like the PostgreSQL repository: IDs are generated on insert, SKUs
//! stay unique across deleted rows, and deleted rows are hidden from reads.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::Pagination;
use super::traits::{ProductRepository, Repository, RepositoryResult, SoftDeleteRepository};
use crate::product::{NewProduct, Product, ProductChanges, ENTITY_TYPE};

/// Product repository held in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    // Insertion order is listing order.
    rows: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl InMemoryProductRepository {
    /// Number of stored rows, deleted ones included
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether nothing has been stored yet
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn duplicate_sku(operation: RepositoryOperation, sku: &str) -> RepositoryError {
    RepositoryError::constraint_violation(
        operation,
        "duplicate key value violates unique constraint \"idx_products_sku\"",
    )
    .with_entity(ENTITY_TYPE, sku)
}

// Timestamps must move forward even when two writes land in the same tick.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

impl Repository<Uuid, Product, NewProduct, ProductChanges> for InMemoryProductRepository {
    async fn find_by_id(&self, id: &Uuid) -> RepositoryResult<Option<Product>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|p| p.id == *id && !p.is_deleted())
            .cloned())
    }

    async fn find_all(&self, pagination: Pagination) -> RepositoryResult<Vec<Product>> {
        let rows = self.rows.read().await;
        let offset = usize::try_from(pagination.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit).unwrap_or(usize::MAX);
        Ok(rows
            .iter()
            .filter(|p| !p.is_deleted())
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create(&self, data: NewProduct) -> RepositoryResult<Product> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|p| p.sku == data.sku) {
            return Err(duplicate_sku(RepositoryOperation::Create, &data.sku));
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: data.name,
            sku: data.sku,
            price: data.price,
            stock: data.stock,
            created_at: now,
            updated_at: now,
            deleted_at: data.deleted_at,
        };
        rows.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: &Uuid, data: ProductChanges) -> RepositoryResult<Product> {
        let mut rows = self.rows.write().await;

        if let Some(sku) = &data.sku {
            if rows.iter().any(|p| p.id != *id && &p.sku == sku) {
                return Err(duplicate_sku(RepositoryOperation::Update, sku));
            }
        }

        let product = rows
            .iter_mut()
            .find(|p| p.id == *id && !p.is_deleted())
            .ok_or_else(|| {
                RepositoryError::not_found(ENTITY_TYPE, id.to_string())
                    .with_operation(RepositoryOperation::Update)
            })?;

        data.apply_to(product);
        product.updated_at = next_timestamp(product.updated_at);
        Ok(product.clone())
    }
}

impl SoftDeleteRepository<Uuid, Product, NewProduct, ProductChanges> for InMemoryProductRepository {
    async fn soft_delete(&self, id: &Uuid) -> RepositoryResult<bool> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|p| p.id == *id && !p.is_deleted()) {
            Some(product) => {
                let now = next_timestamp(product.updated_at);
                product.deleted_at = Some(now);
                product.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl ProductRepository for InMemoryProductRepository {
    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

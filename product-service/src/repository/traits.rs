//! Repository trait definitions
//!
//! Generic CRUD traits written with RPITIT (return position `impl Trait` in
//! traits), plus [`ProductRepository`], the persistence capability the
//! product handler is built on.
//!
//! # Example
//!
//! ```rust,ignore
//! use product_service::repository::{Pagination, Repository, RepositoryResult};
//!
//! impl Repository<Uuid, Product, NewProduct, ProductChanges> for MyRepository {
//!     async fn find_by_id(&self, id: &Uuid) -> RepositoryResult<Option<Product>> {
//!         // ...
//!     }
//!     // ... other methods
//! }
//! ```

use std::future::Future;

use uuid::Uuid;

use super::error::RepositoryError;
use super::pagination::Pagination;
use crate::product::{NewProduct, Product, ProductChanges};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Base CRUD operations over one entity type
///
/// Implementations decide which rows are visible. Soft-delete aware
/// implementations must hide deleted rows from `find_by_id` and `find_all`.
pub trait Repository<Id, Entity, Create, Update>: Send + Sync {
    /// Find a visible entity by its ID
    ///
    /// Returns `Ok(None)` if no visible entity has that ID.
    fn find_by_id(&self, id: &Id) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// List visible entities in insertion order
    fn find_all(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = RepositoryResult<Vec<Entity>>> + Send;

    /// Insert a new entity and return it as stored
    fn create(&self, data: Create) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Apply a partial update to a visible entity
    ///
    /// Fails with a `NotFound` error if the entity is missing or deleted.
    fn update(
        &self,
        id: &Id,
        data: Update,
    ) -> impl Future<Output = RepositoryResult<Entity>> + Send;
}

/// Soft delete on top of [`Repository`]
pub trait SoftDeleteRepository<Id, Entity, Create, Update>:
    Repository<Id, Entity, Create, Update>
{
    /// Mark a visible entity as deleted
    ///
    /// Returns `false` if there was no visible entity to delete.
    fn soft_delete(&self, id: &Id) -> impl Future<Output = RepositoryResult<bool>> + Send;
}

/// Persistence capability for products
pub trait ProductRepository:
    SoftDeleteRepository<Uuid, Product, NewProduct, ProductChanges> + Clone + 'static
{
    /// Check that the backing store answers
    fn ping(&self) -> impl Future<Output = RepositoryResult<()>> + Send;
}

//! Handler trait for REST collection resources
//!
//! Bodies reach the handler undecoded so an implementation can decide
//! whether lookups happen before or after decoding. Identifiers arrive as
//! the raw path segment for the same reason: an unparseable ID is reported
//! the same way as a missing entity.

use std::future::Future;

use axum::body::Bytes;

use super::error::ApiError;
use super::query::ListQuery;

/// CRUD operations over one collection, independent of routing
pub trait CollectionHandler<Entity>: Send + Sync {
    /// List one page of visible entities
    fn list(&self, query: ListQuery) -> impl Future<Output = Result<Vec<Entity>, ApiError>> + Send;

    /// Fetch one visible entity
    fn get(&self, id: String) -> impl Future<Output = Result<Entity, ApiError>> + Send;

    /// Decode, validate, and insert a new entity
    fn create(&self, body: Bytes) -> impl Future<Output = Result<Entity, ApiError>> + Send;

    /// Apply a partial update to a visible entity
    fn update(&self, id: String, body: Bytes) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Soft delete a visible entity
    fn delete(&self, id: String) -> impl Future<Output = Result<(), ApiError>> + Send;
}

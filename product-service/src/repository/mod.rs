//! Persistence layer for products
//!
//! - [`Repository`] / [`SoftDeleteRepository`]: generic CRUD traits
//! - [`ProductRepository`]: the capability the HTTP handlers depend on
//! - [`PgProductRepository`]: PostgreSQL implementation
//! - [`InMemoryProductRepository`]: process-local implementation

mod error;
mod memory;
mod pagination;
mod postgres;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::InMemoryProductRepository;
pub use pagination::Pagination;
pub use postgres::PgProductRepository;
pub use traits::{ProductRepository, Repository, RepositoryResult, SoftDeleteRepository};

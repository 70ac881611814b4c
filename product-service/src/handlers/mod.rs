//! HTTP handlers for the product resource
//!
//! - [`ProductHandler`]: the five product operations, over any [`ProductRepository`](crate::repository::ProductRepository)
//! - [`ApiError`]: error type rendered as `{"error": "..."}`
//! - [`ListQuery`]: lenient `page` parsing for listings

mod error;
mod payload;
mod products;
mod query;
mod traits;

pub use error::{ApiError, ApiErrorKind, ApiErrorResponse, ApiOperation};
pub use payload::{
    CreateProductRequest, UpdateProductRequest, MISSING_REQUIRED_FIELDS, NO_FIELDS_TO_UPDATE,
};
pub use products::ProductHandler;
pub use query::{ListQuery, PAGE_SIZE};
pub use traits::CollectionHandler;

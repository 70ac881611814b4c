//! Request bodies for create and update
//!
//! Every field is an `Option`: a key that is absent or `null` is "not
//! supplied", while `0`, `0.0` and `""` are supplied values.
//!
//! Only the first JSON value in a body is decoded; anything after it is
//! ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::error::{ApiError, ApiOperation};
use crate::product::{NewProduct, ProductChanges};

pub const MISSING_REQUIRED_FIELDS: &str = "missing required fields";
pub const NO_FIELDS_TO_UPDATE: &str = "no fields to update";

/// Body of `POST /products`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    /// `false` creates the product already soft-deleted
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
}

impl CreateProductRequest {
    /// Decode a request body. A literal `null` body decodes as empty.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        decode::<Self>(body, ApiOperation::Create)
    }

    /// Check required fields and build the insert model
    ///
    /// `now` becomes `deleted_at` when `isActive` is explicitly `false`.
    pub fn into_new_product(self, now: DateTime<Utc>) -> Result<NewProduct, ApiError> {
        let (Some(name), Some(sku), Some(price), Some(stock)) =
            (self.name, self.sku, self.price, self.stock)
        else {
            return Err(ApiError::bad_request(
                ApiOperation::Create,
                MISSING_REQUIRED_FIELDS,
            ));
        };

        let deleted_at = match self.is_active {
            Some(false) => Some(now),
            Some(true) | None => None,
        };

        Ok(NewProduct {
            name,
            sku,
            price,
            stock,
            deleted_at,
        })
    }
}

/// Body of `PUT /products/{id}`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

impl UpdateProductRequest {
    /// Decode a request body. A literal `null` body decodes as empty.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        decode::<Self>(body, ApiOperation::Update)
    }

    /// Build the sparse change set, rejecting an empty one
    pub fn into_changes(self) -> Result<ProductChanges, ApiError> {
        let changes = ProductChanges {
            name: self.name,
            sku: self.sku,
            price: self.price,
            stock: self.stock,
        };
        if changes.is_empty() {
            return Err(ApiError::bad_request(
                ApiOperation::Update,
                NO_FIELDS_TO_UPDATE,
            ));
        }
        Ok(changes)
    }
}

fn decode<T>(body: &[u8], operation: ApiOperation) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Option<T>>();
    let first = match values.next() {
        Some(value) => value,
        // Empty or whitespace-only: let the decoder report the early end.
        None => serde_json::from_slice::<Option<T>>(body),
    };

    first
        .map(Option::unwrap_or_default)
        .map_err(|e| ApiError::bad_request(operation, e.to_string()))
}

//! Product entity and the write models used to create and modify it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity name used in logs and error context
pub const ENTITY_TYPE: &str = "Product";

/// A stored product row
///
/// A row with `deleted_at` set is soft-deleted: it keeps its SKU reserved
/// but is invisible to lookups and listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether the row has been soft-deleted
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Fully validated input for inserting a product
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub stock: i64,
    /// Set when the product is created already inactive
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Sparse set of field changes for a partial update
///
/// `None` means "leave unchanged". Zero and empty values are real changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

impl ProductChanges {
    /// True when no field was supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.sku.is_none() && self.price.is_none() && self.stock.is_none()
    }

    /// Names of the supplied fields, in column order
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::with_capacity(4);
        if self.name.is_some() {
            fields.push("name");
        }
        if self.sku.is_some() {
            fields.push("sku");
        }
        if self.price.is_some() {
            fields.push("price");
        }
        if self.stock.is_some() {
            fields.push("stock");
        }
        fields
    }

    /// Write the supplied fields onto `product`, leaving the rest untouched
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name.clone_from(name);
        }
        if let Some(sku) = &self.sku {
            product.sku.clone_from(sku);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            name: "Widget".to_string(),
            sku: "W-1".to_string(),
            price: 9.5,
            stock: 3,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_empty_changes() {
        assert!(ProductChanges::default().is_empty());
        assert!(ProductChanges::default().fields().is_empty());
    }

    #[test]
    fn test_zero_values_count_as_changes() {
        let changes = ProductChanges {
            stock: Some(0),
            price: Some(0.0),
            ..Default::default()
        };
        assert!(!changes.is_empty());
        assert_eq!(changes.fields(), vec!["price", "stock"]);
    }

    #[test]
    fn test_apply_to_touches_only_supplied_fields() {
        let mut product = sample();
        let before = product.clone();
        ProductChanges {
            name: Some("Gadget".to_string()),
            ..Default::default()
        }
        .apply_to(&mut product);

        assert_eq!(product.name, "Gadget");
        assert_eq!(product.sku, before.sku);
        assert_eq!(product.price, before.price);
        assert_eq!(product.stock, before.stock);
    }

    #[test]
    fn test_serializes_snake_case_with_null_deleted_at() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["sku"], "W-1");
        assert!(json["deleted_at"].is_null());
        assert!(json.get("created_at").is_some());
        assert!(json.get("updated_at").is_some());
    }
}

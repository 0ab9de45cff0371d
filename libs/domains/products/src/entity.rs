//! Row shapes returned by the product procedures.

use rust_decimal::Decimal;
use sea_orm::{DbErr, FromQueryResult, QueryResult};
use uuid::Uuid;

use crate::models::{Product, ProductOption};

/// A row of `SETOF products`
#[derive(Debug, Clone, FromQueryResult)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub delivery_price: Decimal,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            delivery_price: row.delivery_price,
        }
    }
}

/// A row of `SETOF product_options`
#[derive(Debug, Clone, FromQueryResult)]
pub struct ProductOptionRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<ProductOptionRow> for ProductOption {
    fn from(row: ProductOptionRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            name: row.name,
            description: row.description,
        }
    }
}

/// Map every result row through `R` into the domain type.
pub(crate) fn map_rows<R, T>(rows: &[QueryResult]) -> Result<Vec<T>, DbErr>
where
    R: FromQueryResult + Into<T>,
{
    rows.iter()
        .map(|row| R::from_query_result(row, "").map(Into::into))
        .collect()
}

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{EntityState, Product, ProductOption};

/// Data access for products.
///
/// Lookups return `None` for a missing row; deciding whether that is an
/// error belongs to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Products whose name contains `name_filter` (case-sensitive); empty matches all.
    async fn list(&self, name_filter: &str) -> ProductResult<Vec<Product>>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Insert (`New`) or overwrite every field (`Loaded`).
    async fn save(&self, product: &Product, state: EntityState) -> ProductResult<()>;

    /// Delete the product's options one by one, then the product.
    ///
    /// Returns the number of product rows removed.
    async fn delete(&self, id: Uuid) -> ProductResult<u64>;
}

/// Data access for product options.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductOptionRepository: Send + Sync {
    async fn list_by_product(&self, product_id: Uuid) -> ProductResult<Vec<ProductOption>>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<ProductOption>>;

    async fn save(&self, option: &ProductOption, state: EntityState) -> ProductResult<()>;

    async fn delete(&self, id: Uuid) -> ProductResult<u64>;
}

fn duplicate_key(table: &str, id: Uuid) -> ProductError {
    ProductError::Database(format!(
        "duplicate key value violates unique constraint \"{}_pkey\": {}",
        table, id
    ))
}

/// In-memory option store for development and tests, in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryProductOptionRepository {
    options: Arc<RwLock<Vec<ProductOption>>>,
}

impl InMemoryProductOptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductOptionRepository for InMemoryProductOptionRepository {
    async fn list_by_product(&self, product_id: Uuid) -> ProductResult<Vec<ProductOption>> {
        let options = self.options.read().await;
        Ok(options
            .iter()
            .filter(|o| o.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<ProductOption>> {
        let options = self.options.read().await;
        Ok(options.iter().find(|o| o.id == id).cloned())
    }

    async fn save(&self, option: &ProductOption, state: EntityState) -> ProductResult<()> {
        let mut options = self.options.write().await;
        let existing = options.iter().position(|e| e.id == option.id);

        match (state, existing) {
            (EntityState::New, Some(_)) => return Err(duplicate_key("product_options", option.id)),
            (EntityState::New, None) => options.push(option.clone()),
            (EntityState::Loaded, Some(i)) => options[i] = option.clone(),
            (EntityState::Loaded, None) => {}
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<u64> {
        let mut options = self.options.write().await;
        let before = options.len();
        options.retain(|o| o.id != id);
        Ok((before - options.len()) as u64)
    }
}

/// In-memory product store for development and tests.
///
/// Cascades deletes into the option store it was built with; use
/// [`with_options`](Self::with_options) to share one with the service.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
    options: InMemoryProductOptionRepository,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: InMemoryProductOptionRepository) -> Self {
        Self {
            products: Arc::default(),
            options,
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self, name_filter: &str) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| p.name.contains(name_filter))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, product: &Product, state: EntityState) -> ProductResult<()> {
        let mut products = self.products.write().await;
        let existing = products.iter().position(|e| e.id == product.id);

        match (state, existing) {
            (EntityState::New, Some(_)) => return Err(duplicate_key("products", product.id)),
            (EntityState::New, None) => products.push(product.clone()),
            (EntityState::Loaded, Some(i)) => products[i] = product.clone(),
            (EntityState::Loaded, None) => {}
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<u64> {
        for option in self.options.list_by_product(id).await? {
            self.options.delete(option.id).await?;
        }

        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok((before - products.len()) as u64)
    }
}

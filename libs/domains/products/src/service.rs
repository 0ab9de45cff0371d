use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{EntityState, Product, ProductOption};
use crate::repository::{ProductOptionRepository, ProductRepository};

/// Orchestrates product and option repositories for the HTTP layer.
#[derive(Clone)]
pub struct ProductService<P: ProductRepository, O: ProductOptionRepository> {
    products: Arc<P>,
    options: Arc<O>,
}

impl<P: ProductRepository, O: ProductOptionRepository> ProductService<P, O> {
    pub fn new(products: P, options: O) -> Self {
        Self {
            products: Arc::new(products),
            options: Arc::new(options),
        }
    }

    /// List products, optionally filtered by a name substring
    #[instrument(skip(self))]
    pub async fn list_products(&self, name: Option<&str>) -> ProductResult<Vec<Product>> {
        self.products.list(name.unwrap_or_default()).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn create_product(&self, product: Product) -> ProductResult<Product> {
        self.products.save(&product, EntityState::New).await?;
        Ok(product)
    }

    /// Overwrite an existing product; the id must already exist.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn update_product(&self, product: Product) -> ProductResult<Product> {
        if self.products.get_by_id(product.id).await?.is_none() {
            return Err(ProductError::NotFound(product.id));
        }

        self.products.save(&product, EntityState::Loaded).await?;
        Ok(product)
    }

    /// Delete a product and its options, returning the product as it was.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<Product> {
        let product = self.get_product(id).await?;
        self.products.delete(id).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn list_options(&self, product_id: Uuid) -> ProductResult<Vec<ProductOption>> {
        self.options.list_by_product(product_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_option(&self, id: Uuid) -> ProductResult<ProductOption> {
        self.options
            .get_by_id(id)
            .await?
            .ok_or(ProductError::OptionNotFound(id))
    }

    #[instrument(skip(self, option), fields(option_id = %option.id))]
    pub async fn create_option(
        &self,
        product_id: Uuid,
        mut option: ProductOption,
    ) -> ProductResult<ProductOption> {
        option.product_id = product_id;
        self.options.save(&option, EntityState::New).await?;
        Ok(option)
    }

    #[instrument(skip(self, option), fields(option_id = %option.id))]
    pub async fn update_option(
        &self,
        product_id: Uuid,
        mut option: ProductOption,
    ) -> ProductResult<ProductOption> {
        if self.options.get_by_id(option.id).await?.is_none() {
            return Err(ProductError::OptionNotFound(option.id));
        }

        option.product_id = product_id;
        self.options.save(&option, EntityState::Loaded).await?;
        Ok(option)
    }

    /// Delete an option whether or not it exists; returns it if it did.
    #[instrument(skip(self))]
    pub async fn delete_option(&self, id: Uuid) -> ProductResult<Option<ProductOption>> {
        let existing = self.options.get_by_id(id).await?;
        self.options.delete(id).await?;
        Ok(existing)
    }
}

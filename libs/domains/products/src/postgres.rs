//! Repositories backed by the product stored procedures.

use async_trait::async_trait;
use database::postgres::{DatabaseConnection, ProcedureCall, StoredProcedures};
use tracing::info;
use uuid::Uuid;

use crate::entity::{ProductOptionRow, ProductRow, map_rows};
use crate::error::ProductResult;
use crate::models::{EntityState, Product, ProductOption};
use crate::repository::{ProductOptionRepository, ProductRepository};

#[derive(Clone, Debug)]
pub struct PgProductOptionRepository {
    procs: StoredProcedures,
}

impl PgProductOptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            procs: StoredProcedures::new(db),
        }
    }
}

#[async_trait]
impl ProductOptionRepository for PgProductOptionRepository {
    async fn list_by_product(&self, product_id: Uuid) -> ProductResult<Vec<ProductOption>> {
        let call = ProcedureCall::new("getProductOptionByProduct").param("ProductId", product_id);
        let rows = self.procs.query(call).await?;
        Ok(map_rows::<ProductOptionRow, _>(&rows)?)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<ProductOption>> {
        let call = ProcedureCall::new("getProductOptionById").param("Id", id);
        let rows = self.procs.query(call).await?;
        Ok(map_rows::<ProductOptionRow, _>(&rows)?.into_iter().next())
    }

    async fn save(&self, option: &ProductOption, state: EntityState) -> ProductResult<()> {
        let name = match state {
            EntityState::New => "insertProductOption",
            EntityState::Loaded => "UpdateProductOption",
        };
        let call = ProcedureCall::new(name)
            .param("Id", option.id)
            .param("ProductId", option.product_id)
            .param("Name", option.name.clone())
            .param("Description", option.description.clone());

        let affected = self.procs.execute(call).await?;
        info!(option_id = %option.id, affected, "Saved product option");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<u64> {
        let call = ProcedureCall::new("deleteProductOption").param("Id", id);
        let affected = self.procs.execute(call).await?;
        info!(option_id = %id, affected, "Deleted product option");
        Ok(affected)
    }
}

#[derive(Clone, Debug)]
pub struct PgProductRepository {
    procs: StoredProcedures,
    options: PgProductOptionRepository,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            procs: StoredProcedures::new(db.clone()),
            options: PgProductOptionRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self, name_filter: &str) -> ProductResult<Vec<Product>> {
        let call = ProcedureCall::new("getProductByName").param("Name", name_filter);
        let rows = self.procs.query(call).await?;
        Ok(map_rows::<ProductRow, _>(&rows)?)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let call = ProcedureCall::new("getProductById").param("Id", id);
        let rows = self.procs.query(call).await?;
        Ok(map_rows::<ProductRow, _>(&rows)?.into_iter().next())
    }

    async fn save(&self, product: &Product, state: EntityState) -> ProductResult<()> {
        let name = match state {
            EntityState::New => "insertProduct",
            EntityState::Loaded => "updateProduct",
        };
        let call = ProcedureCall::new(name)
            .param("Id", product.id)
            .param("Name", product.name.clone())
            .param("Description", product.description.clone())
            .param("Price", product.price)
            .param("DeliveryPrice", product.delivery_price);

        let affected = self.procs.execute(call).await?;
        info!(product_id = %product.id, affected, "Saved product");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<u64> {
        // Not transactional: a failure part-way leaves earlier options deleted.
        for option in self.options.list_by_product(id).await? {
            self.options.delete(option.id).await?;
        }

        let call = ProcedureCall::new("deleteProduct").param("Id", id);
        let affected = self.procs.execute(call).await?;
        info!(product_id = %id, affected, "Deleted product");
        Ok(affected)
    }
}

//! Sale endpoints and catalog lookups
//!
//! Thin typed wrappers over the three sale-creating routes. Callers go
//! through [`crate::SubmissionAdapter`], which validates and sequences
//! these calls.

use crate::{ClientError, ClientResult, HttpClient, NetworkHttpClient, ResourceList};
use shared::models::{Product, TherapyPackage};
use shared::order::{
    ProductSellCreated, ProductSellPayload, SalesOrderCreated, SalesOrderPayload,
    TherapySellCreated, TherapySellPayload,
};

const PRODUCT_SELL_ADD: &str = "api/product-sell/add";
const THERAPY_SELL_SALES: &str = "api/therapy-sell/sales";
const SALES_ORDERS: &str = "api/sales-orders";

#[derive(Debug, Clone)]
pub struct SalesApi<C = NetworkHttpClient> {
    client: C,
}

impl<C: HttpClient> SalesApi<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// One product sale row; returns the new row id
    pub async fn create_product_sell(&self, payload: &ProductSellPayload) -> ClientResult<i64> {
        let created: ProductSellCreated = self.client.post(PRODUCT_SELL_ADD, payload).await?;
        Ok(created.id)
    }

    /// Therapy sale rows in one request; returns the new row ids in order
    pub async fn create_therapy_sells(
        &self,
        payloads: &[TherapySellPayload],
    ) -> ClientResult<Vec<i64>> {
        let created: TherapySellCreated = self.client.post(THERAPY_SELL_SALES, &payloads).await?;
        if !created.success {
            return Err(ClientError::Backend(
                created
                    .error
                    .or(created.message)
                    .unwrap_or_else(|| "therapy sale rejected".to_string()),
            ));
        }
        Ok(created.ids)
    }

    /// Sales order header with its items; returns the order id
    pub async fn create_sales_order(&self, payload: &SalesOrderPayload) -> ClientResult<i64> {
        let created: SalesOrderCreated = self.client.post(SALES_ORDERS, payload).await?;
        match (created.success, created.order_id) {
            (true, Some(order_id)) => Ok(order_id),
            (true, None) => Err(ClientError::InvalidResponse(
                "sales order created without order_id".to_string(),
            )),
            (false, _) => Err(ClientError::Backend(
                created
                    .error
                    .or(created.message)
                    .unwrap_or_else(|| "sales order rejected".to_string()),
            )),
        }
    }
}

/// Picker lookups: products and therapy packages
#[derive(Debug, Clone)]
pub struct CatalogApi<C = NetworkHttpClient> {
    products: ResourceList<Product, C>,
    packages: ResourceList<TherapyPackage, C>,
}

impl<C: HttpClient + Clone> CatalogApi<C> {
    pub fn new(client: C) -> Self {
        Self {
            products: ResourceList::new(client.clone()),
            packages: ResourceList::new(client),
        }
    }

    /// Products matching `keyword` (all when blank)
    pub async fn products(&self, keyword: &str) -> ClientResult<Vec<Product>> {
        self.products.search(keyword).await
    }

    /// Therapy packages matching `keyword` (all when blank)
    pub async fn therapy_packages(&self, keyword: &str) -> ClientResult<Vec<TherapyPackage>> {
        self.packages.search(keyword).await
    }
}

//! Generic resource lists
//!
//! Every list screen (members, staff, inventory, sale records, sales
//! orders) does the same things against a different route table: list,
//! keyword search, fetch one, create, update, delete, bulk delete and
//! spreadsheet export. [`Resource`] names an entity's routes once;
//! [`ResourceList`] does the calls.

use crate::{ClientError, ClientResult, HttpClient, NetworkHttpClient};
use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{
    InventoryInput, InventoryItem, Member, MemberInput, Product, ProductSellRecord, SalesOrderRow,
    Staff, StaffInput, TherapyPackage, TherapySellRecord,
};
use shared::order::{ProductSellPayload, SalesOrderPayload, TherapySellPayload};
use shared::response::{Ack, Body};
use std::marker::PhantomData;

/// Placeholder substituted with the row id
const ID_PLACEHOLDER: &str = "{id}";

// ============================================================================
// Route tables
// ============================================================================

/// A write route: method + path (may contain `{id}`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub path: &'static str,
}

impl Route {
    pub const fn post(path: &'static str) -> Self {
        Self {
            method: Method::POST,
            path,
        }
    }

    pub const fn put(path: &'static str) -> Self {
        Self {
            method: Method::PUT,
            path,
        }
    }

    pub const fn delete(path: &'static str) -> Self {
        Self {
            method: Method::DELETE,
            path,
        }
    }
}

/// Everything an entity's screen can call; `None` means not offered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    /// GET, bare array or wrapped
    pub list: &'static str,
    /// GET with `?keyword=`
    pub search: Option<&'static str>,
    /// GET one row, path contains `{id}`
    pub get: Option<&'static str>,
    pub create: Option<Route>,
    pub update: Option<Route>,
    pub delete: Option<Route>,
    /// POST `{ "ids": [..] }`
    pub delete_many: Option<&'static str>,
    /// GET, spreadsheet bytes
    pub export: Option<&'static str>,
}

impl Routes {
    /// Lookup-only table (catalog pickers)
    pub const fn read_only(list: &'static str, search: &'static str) -> Self {
        Self {
            list,
            search: Some(search),
            get: None,
            create: None,
            update: None,
            delete: None,
            delete_many: None,
            export: None,
        }
    }
}

/// Entity reachable through a [`ResourceList`]
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Create / update payload
    type Input: Serialize + Send + Sync;

    /// Human-readable name for logs
    const NAME: &'static str;

    fn routes() -> Routes;
}

fn with_id(path: &str, id: i64) -> String {
    path.replace(ID_PLACEHOLDER, &id.to_string())
}

fn unsupported<R: Resource>(operation: &str) -> ClientError {
    ClientError::Unsupported(format!("{} {}", R::NAME, operation))
}

fn check_ack(ack: Ack) -> ClientResult<Ack> {
    if ack.is_success() {
        Ok(ack)
    } else {
        Err(ClientError::Backend(
            ack.error
                .or(ack.message)
                .unwrap_or_else(|| "request failed".to_string()),
        ))
    }
}

#[derive(Serialize)]
struct IdList<'a> {
    ids: &'a [i64],
}

// ============================================================================
// ResourceList
// ============================================================================

/// CRUD client for one entity type
#[derive(Debug, Clone)]
pub struct ResourceList<R, C = NetworkHttpClient> {
    client: C,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource, C: HttpClient> ResourceList<R, C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// All rows
    pub async fn list(&self) -> ClientResult<Vec<R>> {
        let body: Body<Vec<R>> = self.client.get(R::routes().list).await?;
        body.into_result().map_err(ClientError::Backend)
    }

    /// Rows matching `keyword`; a blank keyword lists everything
    pub async fn search(&self, keyword: &str) -> ClientResult<Vec<R>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list().await;
        }
        let path = R::routes().search.ok_or_else(|| unsupported::<R>("search"))?;
        let body: Body<Vec<R>> = self
            .client
            .get_with_query(path, &[("keyword", keyword)])
            .await?;
        body.into_result().map_err(ClientError::Backend)
    }

    pub async fn get(&self, id: i64) -> ClientResult<R> {
        let path = R::routes().get.ok_or_else(|| unsupported::<R>("get"))?;
        let body: Body<R> = self.client.get(&with_id(path, id)).await?;
        body.into_result().map_err(ClientError::Backend)
    }

    /// Create a row; the ack carries the new id when the route returns one
    pub async fn create(&self, input: &R::Input) -> ClientResult<Ack> {
        let route = R::routes().create.ok_or_else(|| unsupported::<R>("create"))?;
        let ack = self.send(&route, route.path.to_string(), input).await?;
        tracing::info!(resource = R::NAME, id = ?ack.id, "Created");
        Ok(ack)
    }

    pub async fn update(&self, id: i64, input: &R::Input) -> ClientResult<Ack> {
        let route = R::routes().update.ok_or_else(|| unsupported::<R>("update"))?;
        let ack = self.send(&route, with_id(route.path, id), input).await?;
        tracing::info!(resource = R::NAME, id, "Updated");
        Ok(ack)
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Ack> {
        let route = R::routes().delete.ok_or_else(|| unsupported::<R>("delete"))?;
        let ack = self.send(&route, with_id(route.path, id), &()).await?;
        tracing::info!(resource = R::NAME, id, "Deleted");
        Ok(ack)
    }

    /// Delete several rows
    ///
    /// Uses the bulk route when the entity has one; otherwise deletes one by
    /// one and stops at the first failure (rows already deleted stay
    /// deleted).
    pub async fn delete_many(&self, ids: &[i64]) -> ClientResult<Ack> {
        if ids.is_empty() {
            return Ok(Ack::default());
        }
        let routes = R::routes();

        if let Some(path) = routes.delete_many {
            let ack: Ack = self.client.post(path, &IdList { ids }).await?;
            let ack = check_ack(ack)?;
            tracing::info!(resource = R::NAME, count = ids.len(), "Bulk deleted");
            return Ok(ack);
        }

        if routes.delete.is_none() {
            return Err(unsupported::<R>("delete"));
        }
        for (done, id) in ids.iter().enumerate() {
            if let Err(e) = self.delete(*id).await {
                tracing::error!(resource = R::NAME, id, deleted = done, error = %e, "Bulk delete stopped");
                return Err(e);
            }
        }
        Ok(Ack {
            success: Some(true),
            ..Default::default()
        })
    }

    /// Spreadsheet export (raw bytes as served)
    pub async fn export(&self) -> ClientResult<Vec<u8>> {
        let path = R::routes().export.ok_or_else(|| unsupported::<R>("export"))?;
        let bytes = self.client.get_bytes(path).await?;
        tracing::info!(resource = R::NAME, bytes = bytes.len(), "Exported");
        Ok(bytes)
    }

    async fn send<B: Serialize + Sync>(&self, route: &Route, path: String, body: &B) -> ClientResult<Ack> {
        let ack: Ack = if route.method == Method::PUT {
            self.client.put(&path, body).await?
        } else if route.method == Method::DELETE {
            self.client.delete(&path).await?
        } else {
            self.client.post(&path, body).await?
        };
        check_ack(ack)
    }
}

impl<C: HttpClient> ResourceList<InventoryItem, C> {
    /// Rows at or below their stock threshold
    pub async fn low_stock(&self) -> ClientResult<Vec<InventoryItem>> {
        let body: Body<Vec<InventoryItem>> = self.client.get("api/inventory/low-stock").await?;
        body.into_result().map_err(ClientError::Backend)
    }
}

// ============================================================================
// Entity route tables
// ============================================================================

impl Resource for Member {
    type Input = MemberInput;
    const NAME: &'static str = "member";

    fn routes() -> Routes {
        Routes {
            list: "api/member/list",
            search: Some("api/member/search"),
            get: Some("api/member/{id}"),
            create: Some(Route::post("api/member/create")),
            update: Some(Route::put("api/member/{id}")),
            delete: Some(Route::delete("api/member/{id}")),
            delete_many: None,
            export: Some("api/member/export"),
        }
    }
}

impl Resource for Staff {
    type Input = StaffInput;
    const NAME: &'static str = "staff";

    fn routes() -> Routes {
        Routes {
            list: "api/staff/list",
            search: Some("api/staff/search"),
            get: Some("api/staff/{id}"),
            create: Some(Route::post("api/staff/add")),
            update: Some(Route::put("api/staff/update/{id}")),
            delete: Some(Route::delete("api/staff/delete/{id}")),
            delete_many: None,
            export: None,
        }
    }
}

impl Resource for InventoryItem {
    type Input = InventoryInput;
    const NAME: &'static str = "inventory";

    fn routes() -> Routes {
        Routes {
            list: "api/inventory/list",
            search: Some("api/inventory/search"),
            get: Some("api/inventory/{id}"),
            create: Some(Route::post("api/inventory/add")),
            update: Some(Route::put("api/inventory/update/{id}")),
            delete: Some(Route::delete("api/inventory/delete/{id}")),
            delete_many: None,
            export: Some("api/inventory/export"),
        }
    }
}

impl Resource for ProductSellRecord {
    type Input = ProductSellPayload;
    const NAME: &'static str = "product sale";

    fn routes() -> Routes {
        Routes {
            list: "api/product-sell/list",
            search: Some("api/product-sell/search"),
            get: Some("api/product-sell/detail/{id}"),
            create: Some(Route::post("api/product-sell/add")),
            update: Some(Route::put("api/product-sell/update/{id}")),
            delete: Some(Route::delete("api/product-sell/delete/{id}")),
            delete_many: None,
            export: Some("api/product-sell/export"),
        }
    }
}

impl Resource for TherapySellRecord {
    type Input = TherapySellPayload;
    const NAME: &'static str = "therapy sale";

    fn routes() -> Routes {
        Routes {
            list: "api/therapy-sell/sales",
            search: Some("api/therapy-sell/sales/search"),
            get: None,
            // created in batches through the submission adapter
            create: None,
            update: None,
            delete: Some(Route::delete("api/therapy-sell/sales/{id}")),
            delete_many: None,
            export: Some("api/therapy-sell/sales/export"),
        }
    }
}

impl Resource for SalesOrderRow {
    type Input = SalesOrderPayload;
    const NAME: &'static str = "sales order";

    fn routes() -> Routes {
        Routes {
            list: "api/sales-orders",
            // same route, filtered by `keyword`
            search: Some("api/sales-orders"),
            get: None,
            create: None,
            update: None,
            delete: None,
            delete_many: Some("api/sales-orders/delete"),
            export: None,
        }
    }
}

impl Resource for Product {
    type Input = ();
    const NAME: &'static str = "product";

    fn routes() -> Routes {
        Routes::read_only("api/product-sell/products", "api/product-sell/products/search")
    }
}

impl Resource for TherapyPackage {
    type Input = ();
    const NAME: &'static str = "therapy package";

    fn routes() -> Routes {
        Routes::read_only("api/therapy-sell/packages", "api/therapy-sell/packages/search")
    }
}

//! gloo-net implementation of the core API traits

use std::sync::Arc;

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde_json::Value;

use item_console_core::{
    deliver_audit, ApiError, ApiResult, AppConfig, AuditEvent, AuditSink, BulkDeleteRequest,
    BulkDeleteResponse, Item, ItemApi, ItemFormData, ItemId, ItemPatch, LogApi, LogEntry,
    NewLogEntry,
};

/// HTTP client for both services. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpApi {
    config: Arc<AppConfig>,
}

impl HttpApi {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

/// Turn a non-success response into an [`ApiError`], keeping the JSON body
/// when there is one
async fn check(response: Response) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response
        .text()
        .await
        .ok()
        .and_then(|text| serde_json::from_str::<Value>(&text).ok());
    log::debug!("{} {} -> {}", response.url(), status, response.status_text());
    Err(ApiError::from_response(status, body.as_ref()))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl ItemApi for HttpApi {
    async fn list_items(&self) -> ApiResult<Vec<Item>> {
        let response = Request::get(&self.config.collections_url())
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn get_item(&self, id: ItemId) -> ApiResult<Item> {
        let response = Request::get(&self.config.item_url(id))
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn create_item(&self, data: &ItemFormData) -> ApiResult<Item> {
        let response = Request::post(&self.config.collections_url())
            .json(data)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn update_item(&self, id: ItemId, patch: &ItemPatch) -> ApiResult<Item> {
        let response = Request::patch(&self.config.item_url(id))
            .json(patch)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn delete_item(&self, id: ItemId) -> ApiResult<()> {
        let response = Request::delete(&self.config.item_url(id))
            .send()
            .await
            .map_err(network)?;
        check(response).await.map(|_| ())
    }

    async fn bulk_delete(&self, ids: &[ItemId]) -> ApiResult<BulkDeleteResponse> {
        let response = Request::delete(&self.config.bulk_delete_url())
            .json(&BulkDeleteRequest { ids })
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }
}

#[async_trait(?Send)]
impl LogApi for HttpApi {
    async fn list_logs(&self) -> ApiResult<Vec<LogEntry>> {
        let response = Request::get(&self.config.logs_query_url())
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn create_log(&self, entry: &NewLogEntry) -> ApiResult<()> {
        let response = Request::post(&self.config.logs_url())
            .json(entry)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        check(response).await.map(|_| ())
    }

    async fn clear_logs(&self) -> ApiResult<()> {
        let response = Request::delete(&self.config.logs_url())
            .send()
            .await
            .map_err(network)?;
        check(response).await.map(|_| ())
    }
}

impl AuditSink for HttpApi {
    /// Delivery runs detached; the caller never waits on it
    fn record(&self, event: AuditEvent) {
        let api = self.clone();
        spawn_local(async move {
            deliver_audit(&api, event).await;
        });
    }
}

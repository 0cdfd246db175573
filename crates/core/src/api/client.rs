use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::dashboard::DashboardSummary;
use crate::models::entity::{Entity, EntityId, Resource};
use crate::models::settings::ApiSettings;

use super::export::{CsvExport, ExportSink};
use super::http::HttpTransport;
use super::transport::{ApiRequest, ApiResponse, Method, Transport};

/// Dashboard summary route.
const DASHBOARD_PATH: &str = "/dashboard";

/// Error body shape of the backend (`{"message": "..."}`).
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Typed access to the finance REST API.
///
/// One method per (resource, verb) pair. Routes, JSON encoding and status
/// handling live here; moving bytes is delegated to a `Transport`.
pub struct ApiClient {
    transport: Box<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client over the reqwest transport configured by `settings`.
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, CoreError> {
        Ok(Self::new(Box::new(HttpTransport::new(settings)?)))
    }

    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    // ── Resource collections ────────────────────────────────────────

    /// `GET /{resource}`: the whole collection in server order.
    pub async fn list<E: Entity>(&self) -> Result<Vec<E>, CoreError> {
        let path = E::RESOURCE.path();
        let body = self.execute(ApiRequest::new(Method::Get, &path)).await?;
        decode(&path, &body)
    }

    /// `GET /{resource}/{id}`
    pub async fn get<E: Entity>(&self, id: &EntityId) -> Result<E, CoreError> {
        if !E::RESOURCE.supports_get() {
            return Err(CoreError::unsupported(E::RESOURCE.name(), "get"));
        }
        let path = E::RESOURCE.item_path(id);
        let body = self.execute(ApiRequest::new(Method::Get, &path)).await?;
        decode(&path, &body)
    }

    /// `POST /{resource}`: returns the stored entity with its new id.
    pub async fn create<E: Entity>(&self, payload: &E::Payload) -> Result<E, CoreError> {
        let path = E::RESOURCE.path();
        let request = ApiRequest::new(Method::Post, &path).with_body(encode(payload)?);
        let body = self.execute(request).await?;
        decode(&path, &body)
    }

    /// `PUT /{resource}/{id}`
    pub async fn update<E: Entity>(
        &self,
        id: &EntityId,
        payload: &E::Payload,
    ) -> Result<E, CoreError> {
        let path = E::RESOURCE.item_path(id);
        let request = ApiRequest::new(Method::Put, &path).with_body(encode(payload)?);
        let body = self.execute(request).await?;
        decode(&path, &body)
    }

    /// `DELETE /{resource}/{id}`. Any response body is ignored.
    pub async fn remove(&self, resource: Resource, id: &EntityId) -> Result<(), CoreError> {
        self.execute(ApiRequest::new(Method::Delete, resource.item_path(id)))
            .await?;
        Ok(())
    }

    /// `GET /{resource}/export`, handed to `sink` as `{resource}_export.csv`.
    ///
    /// The export is also returned so callers can report what was saved.
    pub async fn export_csv(
        &self,
        resource: Resource,
        sink: &dyn ExportSink,
    ) -> Result<CsvExport, CoreError> {
        if !resource.supports_export() {
            return Err(CoreError::unsupported(resource.name(), "export"));
        }
        let body = self
            .execute(ApiRequest::new(Method::Get, resource.export_path()))
            .await?;
        let export = CsvExport::new(resource, body);
        sink.deliver(&export)?;
        debug!("Exported {} ({} bytes)", export.file_name, export.bytes.len());
        Ok(export)
    }

    // ── Dashboard ───────────────────────────────────────────────────

    /// `GET /dashboard`
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, CoreError> {
        let body = self
            .execute(ApiRequest::new(Method::Get, DASHBOARD_PATH))
            .await?;
        decode(DASHBOARD_PATH, &body)
    }

    // ── Plumbing ────────────────────────────────────────────────────

    /// Send a request and return the body of a 2xx response.
    async fn execute(&self, request: ApiRequest) -> Result<Vec<u8>, CoreError> {
        let method = request.method;
        let path = request.path.clone();
        debug!("{method} {path}");

        let response = self.transport.send(request).await.map_err(|e| {
            warn!("{method} {path} failed: {e}");
            e
        })?;

        if !response.is_success() {
            warn!(
                "{method} {path} returned {}. Body: {}",
                response.status,
                response.text().trim()
            );
            return Err(http_error(&response));
        }

        Ok(response.body)
    }
}

fn encode<P: Serialize>(payload: &P) -> Result<Value, CoreError> {
    serde_json::to_value(payload).map_err(|e| CoreError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T, CoreError> {
    serde_json::from_slice(body).map_err(|e| {
        error!(
            "Failed to decode response from {path}. Body: {}, Error: {e}",
            String::from_utf8_lossy(body)
        );
        CoreError::Deserialization(format!("{path}: {e}"))
    })
}

/// Build the error for a non-2xx response. Only the `message` field of a
/// JSON body is kept; proxy pages and other raw bodies stay in the log.
fn http_error(response: &ApiResponse) -> CoreError {
    let message = serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(|b| b.message);
    CoreError::http(response.status, message)
}

// ═══════════════════════════════════════════════════════════════════
// Shared test doubles: in-memory backend, scripted confirm, memory sink
// ═══════════════════════════════════════════════════════════════════

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use finance_dashboard_core::api::export::{CsvExport, ExportSink};
use finance_dashboard_core::api::transport::{ApiRequest, ApiResponse, Method, Transport};
use finance_dashboard_core::controllers::confirm::Confirm;
use finance_dashboard_core::errors::CoreError;

// ── Mock backend ────────────────────────────────────────────────────

#[derive(Default)]
struct BackendState {
    collections: HashMap<String, Vec<Value>>,
    next_id: u64,
    requests: Vec<ApiRequest>,
    failures: HashMap<(Method, String), (u16, Vec<u8>)>,
    delays: VecDeque<u64>,
    offline: bool,
}

/// Behaves like the finance REST backend, keeping everything in memory.
///
/// Clones share state, so a test keeps one handle for inspection and
/// gives a boxed clone to the client.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<BackendState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().next_id = 1;
        backend
    }

    pub fn boxed(&self) -> Box<dyn Transport> {
        Box::new(self.clone())
    }

    /// Store a record as if it had been created earlier; returns its id.
    pub fn seed(&self, resource: &str, record: Value) -> u64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        let mut obj = record.as_object().cloned().unwrap_or_default();
        obj.insert("id".into(), json!(id));
        state
            .collections
            .entry(resource.to_string())
            .or_default()
            .push(Value::Object(obj));
        id
    }

    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .collections
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    /// Answer `method path` with `status` until cleared.
    pub fn fail(&self, method: Method, path: &str, status: u16, message: &str) {
        let body = if message.is_empty() {
            String::new()
        } else {
            json!({ "message": message }).to_string()
        };
        self.fail_raw(method, path, status, &body);
    }

    /// Answer `method path` with `status` and exactly `body`.
    pub fn fail_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert((method, path.to_string()), (status, body.as_bytes().to_vec()));
    }

    pub fn clear_failures(&self) {
        self.state.lock().unwrap().failures.clear();
    }

    /// Every request fails as if the server were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    /// Delay the next response by `ms` (one entry per request, FIFO). The
    /// response content is decided before the delay.
    pub fn delay_next(&self, ms: u64) {
        self.state.lock().unwrap().delays.push_back(ms);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn mutating_requests(&self) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::Get)
            .collect()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    fn handle(&self, request: &ApiRequest) -> Result<(ApiResponse, u64), CoreError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        let delay = state.delays.pop_front().unwrap_or(0);

        if state.offline {
            return Err(CoreError::Network("connection refused".into()));
        }

        if let Some((status, body)) = state
            .failures
            .get(&(request.method, request.path.clone()))
            .cloned()
        {
            return Ok((ApiResponse::new(status, body), delay));
        }

        let segments: Vec<&str> = request
            .path
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let response = match (request.method, segments.as_slice()) {
            (Method::Get, ["dashboard"]) => ApiResponse::json(200, &dashboard_body(&state.collections)),
            (Method::Get, [resource]) => {
                let items = state.collections.get(*resource).cloned().unwrap_or_default();
                ApiResponse::json(200, &Value::Array(items))
            }
            (Method::Get, [resource, "export"]) => {
                let items = state.collections.get(*resource).cloned().unwrap_or_default();
                ApiResponse::new(200, export_body(&items))
            }
            (Method::Get, [resource, id]) => match find(&state.collections, resource, id) {
                Some(item) => ApiResponse::json(200, &item),
                None => not_found(id),
            },
            (Method::Post, [resource]) => {
                let id = state.next_id;
                state.next_id += 1;
                let mut obj: Map<String, Value> = request
                    .body
                    .as_ref()
                    .and_then(|b| b.as_object().cloned())
                    .unwrap_or_default();
                obj.insert("id".into(), json!(id));
                let stored = Value::Object(obj);
                state
                    .collections
                    .entry(resource.to_string())
                    .or_default()
                    .push(stored.clone());
                ApiResponse::json(201, &stored)
            }
            (Method::Put, [resource, id]) => {
                let items = state.collections.entry(resource.to_string()).or_default();
                match items.iter_mut().find(|v| id_matches(v, id)) {
                    Some(slot) => {
                        let mut obj = request
                            .body
                            .as_ref()
                            .and_then(|b| b.as_object().cloned())
                            .unwrap_or_default();
                        obj.insert("id".into(), slot["id"].clone());
                        *slot = Value::Object(obj);
                        ApiResponse::json(200, slot)
                    }
                    None => not_found(id),
                }
            }
            (Method::Delete, [resource, id]) => {
                let items = state.collections.entry(resource.to_string()).or_default();
                let before = items.len();
                items.retain(|v| !id_matches(v, id));
                if items.len() < before {
                    ApiResponse::new(204, Vec::new())
                } else {
                    not_found(id)
                }
            }
            _ => ApiResponse::new(404, Vec::new()),
        };

        Ok((response, delay))
    }
}

#[async_trait]
impl Transport for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, CoreError> {
        let (response, delay) = self.handle(&request)?;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        Ok(response)
    }
}

fn id_matches(value: &Value, id: &str) -> bool {
    match &value["id"] {
        Value::Number(n) => n.to_string() == id,
        Value::String(s) => s == id,
        _ => false,
    }
}

fn find(collections: &HashMap<String, Vec<Value>>, resource: &str, id: &str) -> Option<Value> {
    collections
        .get(resource)?
        .iter()
        .find(|v| id_matches(v, id))
        .cloned()
}

fn not_found(id: &str) -> ApiResponse {
    ApiResponse::json(404, &json!({ "message": format!("Not found: {id}") }))
}

fn sum(collections: &HashMap<String, Vec<Value>>, resource: &str, field: &str) -> f64 {
    collections
        .get(resource)
        .map(|items| items.iter().map(|v| v[field].as_f64().unwrap_or(0.0)).sum())
        .unwrap_or(0.0)
}

fn count(collections: &HashMap<String, Vec<Value>>, resource: &str) -> usize {
    collections.get(resource).map(Vec::len).unwrap_or(0)
}

fn dashboard_body(collections: &HashMap<String, Vec<Value>>) -> Value {
    let total_assets = sum(collections, "assets", "value");
    let total_investments = sum(collections, "investments", "currentAmount");
    let total_liabilities = sum(collections, "liabilities", "amount");
    let with_investments = total_assets + total_investments;
    json!({
        "totalAssets": total_assets,
        "totalInvestments": total_investments,
        "totalAssetsWithInvestments": with_investments,
        "totalLiabilities": total_liabilities,
        "netWorth": with_investments - total_liabilities,
        "assetCount": count(collections, "assets"),
        "investmentCount": count(collections, "investments"),
        "liabilityCount": count(collections, "liabilities"),
    })
}

fn export_body(items: &[Value]) -> String {
    let mut csv = String::from("ID,Record\n");
    for item in items {
        csv.push_str(&format!("{},\"{}\"\n", item["id"], item.to_string().replace('"', "'")));
    }
    csv
}

// ── Confirm / sink doubles ──────────────────────────────────────────

/// Answers every prompt with a fixed answer and remembers the prompts.
pub struct ScriptedConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

#[derive(Default)]
pub struct MemorySink {
    pub exports: Mutex<Vec<CsvExport>>,
}

impl ExportSink for MemorySink {
    fn deliver(&self, export: &CsvExport) -> Result<(), CoreError> {
        self.exports.lock().unwrap().push(export.clone());
        Ok(())
    }
}

pub struct FailingSink;

impl ExportSink for FailingSink {
    fn deliver(&self, _export: &CsvExport) -> Result<(), CoreError> {
        Err(CoreError::FileIO("disk full".into()))
    }
}

// ── Fixtures ────────────────────────────────────────────────────────

pub fn investment_json(kind: &str, invested: f64, current: f64) -> Value {
    json!({
        "investmentType": kind,
        "providerBroker": "Zerodha",
        "investmentAmount": invested,
        "currentAmount": current,
        "purchasedDate": "2024-04-01",
        "maturityDate": null,
    })
}

pub fn asset_json(name: &str, asset_type: &str, value: f64) -> Value {
    json!({
        "name": name,
        "assetType": asset_type,
        "value": value,
        "description": null,
    })
}

pub fn liability_json(name: &str, liability_type: &str, amount: f64) -> Value {
    json!({
        "name": name,
        "liabilityType": liability_type,
        "amount": amount,
        "description": "monthly EMI",
    })
}

pub fn insurance_json(policy: &str, insurance_type: &str, premium: f64, coverage: f64) -> Value {
    json!({
        "policyNumber": policy,
        "insuranceType": insurance_type,
        "provider": "LIC",
        "premium": premium,
        "coverageAmount": coverage,
        "startDate": "2023-01-15",
        "endDate": null,
        "status": "Active",
        "description": null,
    })
}

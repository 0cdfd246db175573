use log::{debug, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::client::ApiClient;
use crate::errors::CoreError;
use crate::models::dashboard::{AllocationSlice, DashboardMetrics, DashboardSummary};
use crate::services::dashboard_service::DashboardService;

use super::scope::ViewScope;
use super::{lock, RefreshOutcome};

pub const DASHBOARD_LOAD_ERROR: &str = "Failed to load dashboard data";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub summary: Option<DashboardSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            summary: None,
            loading: true,
            error: None,
        }
    }
}

impl DashboardState {
    pub fn metrics(&self) -> Option<DashboardMetrics> {
        self.summary
            .as_ref()
            .map(|s| DashboardService::new().metrics(s))
    }

    pub fn allocation(&self) -> Option<Vec<AllocationSlice>> {
        self.summary
            .as_ref()
            .map(|s| DashboardService::new().asset_allocation(s))
    }
}

/// Loads the cross-resource summary for the dashboard view.
pub struct DashboardController {
    api: Arc<ApiClient>,
    scope: ViewScope,
    state: Mutex<DashboardState>,
    generation: AtomicU64,
}

impl DashboardController {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            state: Mutex::new(DashboardState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        lock(&self.state).clone()
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Fetch the summary. Same latest-wins rule as list refreshes; a failure
    /// keeps whatever summary was shown before.
    pub async fn load(&self) -> RefreshOutcome {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        lock(&self.state).loading = true;

        let result = self.scope.run(self.api.dashboard_summary()).await;

        if self.scope.is_closed() {
            return RefreshOutcome::Cancelled;
        }
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!("Dropping superseded dashboard load #{ticket}");
            return RefreshOutcome::Superseded;
        }

        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(summary) => {
                state.summary = Some(summary);
                state.error = None;
                RefreshOutcome::Loaded
            }
            Err(CoreError::Cancelled) => RefreshOutcome::Cancelled,
            Err(e) => {
                warn!("Failed to load dashboard: {e}");
                state.error = Some(DASHBOARD_LOAD_ERROR.to_string());
                RefreshOutcome::Failed(DASHBOARD_LOAD_ERROR.to_string())
            }
        }
    }

    pub fn close(&self) {
        self.scope.close();
    }
}

pub mod api;
pub mod controllers;
pub mod errors;
pub mod models;
pub mod presentation;
pub mod services;

use std::sync::Arc;

use api::client::ApiClient;
use api::transport::Transport;
use controllers::confirm::Confirm;
use controllers::dashboard::DashboardController;
use controllers::view::ResourceView;
use errors::CoreError;
use models::{
    asset::Asset, entity::Entity, insurance::Insurance, investment::Investment,
    liability::Liability, settings::ApiSettings,
};

pub use controllers::RefreshOutcome;

/// Main entry point for the finance dashboard core library.
///
/// Holds the shared API client and the confirmation dialog, and hands out
/// one controller bundle per view. Views are independent: each owns its
/// state and its lifetime, and nothing is shared between them besides the
/// client.
#[must_use]
pub struct FinanceDashboard {
    api: Arc<ApiClient>,
    confirm: Arc<dyn Confirm>,
}

impl std::fmt::Debug for FinanceDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceDashboard")
            .field("transport", &self.api.transport_name())
            .finish()
    }
}

impl FinanceDashboard {
    /// Connect to the backend described by `settings` over HTTP.
    pub fn connect(settings: &ApiSettings, confirm: Arc<dyn Confirm>) -> Result<Self, CoreError> {
        let api = ApiClient::from_settings(settings)?;
        log::debug!("Finance API at {}", settings.api_base_url);
        Ok(Self::with_client(api, confirm))
    }

    /// Use a custom transport (tests, alternative HTTP stacks).
    pub fn with_transport(transport: Box<dyn Transport>, confirm: Arc<dyn Confirm>) -> Self {
        Self::with_client(ApiClient::new(transport), confirm)
    }

    pub fn with_client(api: ApiClient, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            api: Arc::new(api),
            confirm,
        }
    }

    /// Direct access to the REST client.
    #[must_use]
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    // ── Views ───────────────────────────────────────────────────────

    /// A fresh view for any resource type. Call `mount()` on it to load.
    pub fn view<E: Entity>(&self) -> ResourceView<E> {
        ResourceView::new(self.api.clone(), self.confirm.clone())
    }

    pub fn investments(&self) -> ResourceView<Investment> {
        self.view()
    }

    pub fn assets(&self) -> ResourceView<Asset> {
        self.view()
    }

    pub fn liabilities(&self) -> ResourceView<Liability> {
        self.view()
    }

    pub fn insurances(&self) -> ResourceView<Insurance> {
        self.view()
    }

    pub fn dashboard(&self) -> DashboardController {
        DashboardController::new(self.api.clone())
    }
}

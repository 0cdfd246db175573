use log::warn;
use std::sync::Arc;

use crate::api::client::ApiClient;
use crate::api::export::{CsvExport, ExportSink};
use crate::models::entity::{Entity, EntityId};

use super::confirm::Confirm;
use super::form::{FormController, SubmitOutcome};
use super::list::{DeleteOutcome, ListController};
use super::scope::ViewScope;
use super::RefreshOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Exported(CsvExport),
    Failed(String),
}

/// One resource page: its list and its form, sharing one lifetime.
///
/// A successful submit reloads the list; closing the view cancels whatever
/// either controller still has in flight.
pub struct ResourceView<E: Entity> {
    api: Arc<ApiClient>,
    scope: ViewScope,
    list: ListController<E>,
    form: FormController<E>,
}

impl<E: Entity> ResourceView<E> {
    pub fn new(api: Arc<ApiClient>, confirm: Arc<dyn Confirm>) -> Self {
        let scope = ViewScope::new();
        Self {
            list: ListController::new(api.clone(), confirm, scope.clone()),
            form: FormController::new(api.clone(), scope.clone()),
            api,
            scope,
        }
    }

    pub fn list(&self) -> &ListController<E> {
        &self.list
    }

    pub fn form(&self) -> &FormController<E> {
        &self.form
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// First load when the view appears.
    pub async fn mount(&self) -> RefreshOutcome {
        self.list.refresh().await
    }

    /// Submit the form; on success the list is reloaded before returning.
    pub async fn submit(&self) -> SubmitOutcome<E> {
        let outcome = self.form.submit().await;
        if outcome.is_saved() {
            self.list.refresh().await;
        }
        outcome
    }

    pub fn edit(&self, id: &EntityId) -> bool {
        self.list.request_edit(id, &self.form)
    }

    pub async fn delete(&self, id: &EntityId) -> DeleteOutcome {
        self.list.request_delete(id).await
    }

    /// Download the collection as CSV into `sink`.
    pub async fn export(&self, sink: &dyn ExportSink) -> ExportOutcome {
        match self.scope.run(self.api.export_csv(E::RESOURCE, sink)).await {
            Ok(export) => ExportOutcome::Exported(export),
            Err(e) => {
                warn!("Failed to export {}: {e}", E::RESOURCE);
                let message = format!("Failed to export {}", E::RESOURCE);
                if !e.is_cancelled() {
                    self.list.set_error(message.clone());
                }
                ExportOutcome::Failed(message)
            }
        }
    }

    /// The view is going away; pending requests are abandoned.
    pub fn close(&self) {
        self.scope.close();
    }
}

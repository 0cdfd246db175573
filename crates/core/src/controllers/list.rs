use log::{debug, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::client::ApiClient;
use crate::errors::CoreError;
use crate::models::entity::{Entity, EntityId};

use super::confirm::Confirm;
use super::form::FormController;
use super::scope::ViewScope;
use super::{lock, RefreshOutcome};

/// The collection a list view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<E> {
    /// Server order, never re-sorted.
    pub items: Vec<E>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<E> ListState<E> {
    /// Loaded, no error, nothing to show.
    pub fn is_empty_view(&self) -> bool {
        !self.loading && self.error.is_none() && self.items.is_empty()
    }
}

impl<E> Default for ListState<E> {
    fn default() -> Self {
        // A freshly mounted view shows its loading indicator until the
        // first fetch settles.
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Deleted on the server, followed by this reload.
    Deleted(RefreshOutcome),
    /// The user said no; nothing was sent.
    Declined,
    Failed(String),
    Cancelled,
}

/// Fetch-and-render lifecycle of one resource collection.
///
/// `items` only ever changes by wholesale replacement from the server.
/// Overlapping refreshes are resolved latest-wins: every refresh takes a
/// ticket and a response whose ticket is no longer the newest is dropped.
pub struct ListController<E: Entity> {
    api: Arc<ApiClient>,
    confirm: Arc<dyn Confirm>,
    scope: ViewScope,
    state: Mutex<ListState<E>>,
    generation: AtomicU64,
}

impl<E: Entity> ListController<E> {
    pub fn new(api: Arc<ApiClient>, confirm: Arc<dyn Confirm>, scope: ViewScope) -> Self {
        Self {
            api,
            confirm,
            scope,
            state: Mutex::new(ListState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> ListState<E> {
        lock(&self.state).clone()
    }

    pub fn items(&self) -> Vec<E> {
        lock(&self.state).items.clone()
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn find(&self, id: &EntityId) -> Option<E> {
        lock(&self.state).items.iter().find(|e| e.id() == id).cloned()
    }

    /// Like `find`, but a missing id is an error.
    pub fn item(&self, id: &EntityId) -> Result<E, CoreError> {
        self.find(id)
            .ok_or_else(|| CoreError::NotFound(format!("{} {id}", E::RESOURCE.label())))
    }

    pub(crate) fn set_error(&self, message: String) {
        lock(&self.state).error = Some(message);
    }

    /// Reload the collection from the server.
    ///
    /// On failure the previous items stay visible next to the error.
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        lock(&self.state).loading = true;

        let result = self.scope.run(self.api.list::<E>()).await;

        if self.scope.is_closed() {
            return RefreshOutcome::Cancelled;
        }
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!("Dropping superseded {} refresh #{ticket}", E::RESOURCE);
            return RefreshOutcome::Superseded;
        }

        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(items) => {
                debug!("Loaded {} {}", items.len(), E::RESOURCE);
                state.items = items;
                state.error = None;
                RefreshOutcome::Loaded
            }
            Err(CoreError::Cancelled) => RefreshOutcome::Cancelled,
            Err(e) => {
                warn!("Failed to load {}: {e}", E::RESOURCE);
                let message = E::RESOURCE.load_error();
                state.error = Some(message.clone());
                RefreshOutcome::Failed(message)
            }
        }
    }

    /// Ask for confirmation, delete on the server, then reload.
    pub async fn request_delete(&self, id: &EntityId) -> DeleteOutcome {
        if self.scope.is_closed() {
            return DeleteOutcome::Cancelled;
        }
        if !self.confirm.confirm(&E::RESOURCE.delete_prompt()).await {
            debug!("Delete of {} {id} declined", E::RESOURCE.label());
            return DeleteOutcome::Declined;
        }

        match self.scope.run(self.api.remove(E::RESOURCE, id)).await {
            Ok(()) => DeleteOutcome::Deleted(self.refresh().await),
            Err(CoreError::Cancelled) => DeleteOutcome::Cancelled,
            Err(_) if self.scope.is_closed() => DeleteOutcome::Cancelled,
            Err(e) => {
                warn!("Failed to delete {} {id}: {e}", E::RESOURCE.label());
                let message = E::RESOURCE.delete_error();
                self.set_error(message.clone());
                DeleteOutcome::Failed(message)
            }
        }
    }

    /// Open `form` on the item with `id`. False when it is not in the list.
    pub fn request_edit(&self, id: &EntityId, form: &FormController<E>) -> bool {
        match self.item(id) {
            Ok(entity) => {
                form.begin_edit(&entity);
                true
            }
            Err(e) => {
                debug!("Edit not started: {e}");
                false
            }
        }
    }
}

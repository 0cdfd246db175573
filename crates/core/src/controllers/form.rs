use log::{debug, warn};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use crate::api::client::ApiClient;
use crate::errors::CoreError;
use crate::models::entity::{Entity, EntityId, Resource};
use crate::models::form::FormFields;

use super::lock;
use super::scope::ViewScope;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

/// Everything the rendering layer needs to draw a create/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub fields: FormFields,
    pub mode: FormMode,
    pub visible: bool,
    /// Single user-visible message from the last failed submit.
    pub error: Option<String>,
}

impl FormState {
    fn blank<E: Entity>() -> Self {
        Self {
            fields: E::default_fields(),
            mode: FormMode::Create,
            visible: false,
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Heading of the form, e.g. "Edit Investment" / "New Investment".
    pub fn title(&self, resource: Resource) -> String {
        let label = resource.label();
        let mut chars = label.chars();
        let noun = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        if self.is_editing() {
            format!("Edit {noun}")
        } else {
            format!("New {noun}")
        }
    }
}

/// What happened to a submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<E> {
    /// Stored by the server; the form was reset and hidden.
    Saved(E),
    /// The form did not parse; nothing was sent.
    Rejected(String),
    /// The server call failed; the form stays open and populated.
    Failed(String),
    /// The view closed while the request was pending.
    Cancelled,
}

impl<E> SubmitOutcome<E> {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_))
    }
}

/// Create/edit form state machine for one resource type.
pub struct FormController<E: Entity> {
    api: Arc<ApiClient>,
    scope: ViewScope,
    state: Mutex<FormState>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> FormController<E> {
    pub fn new(api: Arc<ApiClient>, scope: ViewScope) -> Self {
        Self {
            api,
            scope,
            state: Mutex::new(FormState::blank::<E>()),
            _entity: PhantomData,
        }
    }

    pub fn snapshot(&self) -> FormState {
        lock(&self.state).clone()
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.state).visible
    }

    pub fn mode(&self) -> FormMode {
        lock(&self.state).mode.clone()
    }

    /// Update one input. No validation until submit.
    pub fn set_field(&self, name: &str, value: impl Into<String>) {
        lock(&self.state).fields.set(name, value);
    }

    pub fn begin_create(&self) {
        let mut state = lock(&self.state);
        *state = FormState::blank::<E>();
        state.visible = true;
    }

    pub fn begin_edit(&self, entity: &E) {
        debug!("Editing {} {}", E::RESOURCE.label(), entity.id());
        let mut state = lock(&self.state);
        *state = FormState {
            fields: entity.to_fields(),
            mode: FormMode::Edit(entity.id().clone()),
            visible: true,
            error: None,
        };
    }

    /// The "Add" button: opens a blank form, or hides an open one.
    pub fn toggle(&self) {
        if self.is_visible() {
            lock(&self.state).visible = false;
        } else {
            self.begin_create();
        }
    }

    /// Close without saving.
    pub fn cancel(&self) {
        *lock(&self.state) = FormState::blank::<E>();
    }

    /// Parse the current fields without sending anything.
    pub fn parse(&self) -> Result<E::Payload, CoreError> {
        let fields = lock(&self.state).fields.clone();
        E::parse_fields(&fields)
    }

    /// Validate, then create or update depending on the mode.
    pub async fn submit(&self) -> SubmitOutcome<E> {
        let mode = lock(&self.state).mode.clone();

        let payload = match self.parse() {
            Ok(payload) => payload,
            Err(e) => {
                let message = e.user_message();
                debug!("Rejected {} form: {message}", E::RESOURCE.label());
                lock(&self.state).error = Some(message.clone());
                return SubmitOutcome::Rejected(message);
            }
        };

        let result = match &mode {
            FormMode::Create => self.scope.run(self.api.create::<E>(&payload)).await,
            FormMode::Edit(id) => self.scope.run(self.api.update::<E>(id, &payload)).await,
        };

        if self.scope.is_closed() {
            return SubmitOutcome::Cancelled;
        }

        match result {
            Ok(entity) => {
                debug!("Saved {} {}", E::RESOURCE.label(), entity.id());
                *lock(&self.state) = FormState::blank::<E>();
                SubmitOutcome::Saved(entity)
            }
            Err(CoreError::Cancelled) => SubmitOutcome::Cancelled,
            Err(e) => {
                warn!("Failed to save {} ({mode:?}): {e}", E::RESOURCE.label());
                let message = save_message(E::RESOURCE, &e);
                lock(&self.state).error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}

/// The server's own message when it sent one, else a generic line.
fn save_message(resource: Resource, err: &CoreError) -> String {
    match err {
        CoreError::Http {
            message: Some(message),
            ..
        } => message.clone(),
        _ => resource.save_error(),
    }
}

//! Workflow controller
//!
//! Async driver of one workflow instance. State lives behind a mutex that is
//! never held across an await; each service call is bracketed by a ticket so
//! that late responses for an abandoned or superseded instance are dropped.

use std::{cmp::Reverse, fmt, sync::Arc};

use domain::{
    Client, DomainError, DraftMessage, EntityId, GenerationRequest, IdentityNormalizer, Message,
    MessageSummary, WorkflowId,
};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use super::{
    host::ActiveWorkflowSlot,
    state::{OperationTicket, WorkflowState, WorkflowStep, WorkflowView},
};
use crate::{
    error::ApplicationError,
    ports::{GenerationPort, MessageHistoryPort, MessageStorePort},
    services::{
        entity_catalogs::EntityCatalogs,
        request_builder::{GenerationRequestBuilder, WorkflowForm},
    },
};

/// Collaborators shared by every workflow instance
#[derive(Clone)]
pub struct WorkflowDependencies {
    pub catalogs: EntityCatalogs,
    pub generation: Arc<dyn GenerationPort>,
    pub history: Arc<dyn MessageHistoryPort>,
    pub store: Arc<dyn MessageStorePort>,
}

impl WorkflowDependencies {
    /// Previous messages of a client, newest first
    ///
    /// Only messages whose client reference matches the client under either
    /// identifier spelling are kept.
    #[instrument(skip(self), fields(client_id = %client_id))]
    pub async fn client_history(
        &self,
        client_id: &EntityId,
    ) -> Result<Vec<MessageSummary>, ApplicationError> {
        let client = self.catalogs.require_client(client_id).await?;
        let mut messages: Vec<MessageSummary> = self
            .history
            .list_for_client(client_id)
            .await?
            .into_iter()
            .filter(|summary| IdentityNormalizer::matches(&client, summary.client_id.as_str()))
            .collect();
        messages.sort_by_key(|summary| Reverse(summary.created_at));
        debug!(count = messages.len(), "Loaded client history");
        Ok(messages)
    }
}

impl fmt::Debug for WorkflowDependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowDependencies")
            .field("catalogs", &self.catalogs)
            .finish_non_exhaustive()
    }
}

/// Drives one message-generation workflow
pub struct WorkflowController {
    id: WorkflowId,
    state: Mutex<WorkflowState>,
    dependencies: WorkflowDependencies,
    slot: ActiveWorkflowSlot,
}

impl fmt::Debug for WorkflowController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowController")
            .field("id", &self.id)
            .field("step", &self.state.lock().step())
            .finish_non_exhaustive()
    }
}

impl WorkflowController {
    /// Standalone controller that is immediately active
    pub fn new(dependencies: WorkflowDependencies) -> Self {
        let controller = Self::with_slot(dependencies, ActiveWorkflowSlot::new());
        controller.slot.activate(controller.id);
        controller
    }

    /// Controller sharing an activity slot with other instances
    ///
    /// The caller is responsible for activating it.
    pub fn with_slot(dependencies: WorkflowDependencies, slot: ActiveWorkflowSlot) -> Self {
        let id = WorkflowId::new();
        Self {
            id,
            state: Mutex::new(WorkflowState::new(id)),
            dependencies,
            slot,
        }
    }

    /// Instance identifier
    pub const fn id(&self) -> WorkflowId {
        self.id
    }

    /// Current step
    pub fn step(&self) -> WorkflowStep {
        self.state.lock().step()
    }

    /// Snapshot for rendering
    pub fn view(&self) -> WorkflowView {
        self.state.lock().view()
    }

    /// True while this instance holds the activity slot
    pub fn is_active(&self) -> bool {
        self.slot.is_active(self.id) && !self.state.lock().is_abandoned()
    }

    fn ensure_active(&self) -> Result<(), ApplicationError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(ApplicationError::StaleWorkflow(self.id))
        }
    }

    /// Apply `outcome` only if this instance is still the active one
    fn settle<T>(
        &self,
        ticket: OperationTicket,
        apply: impl FnOnce(&mut WorkflowState) -> Result<T, ApplicationError>,
    ) -> Result<T, ApplicationError> {
        let mut state = self.state.lock();
        if !self.slot.is_active(self.id) && !state.is_abandoned() {
            state.abandon();
        }
        let result = apply(&mut state);
        if let Err(ApplicationError::StaleWorkflow(_)) = &result {
            warn!(
                workflow_id = %self.id,
                operation = ?ticket.operation(),
                "Discarding response for inactive workflow"
            );
        }
        result
    }

    /// Edit the selection form
    ///
    /// Allowed while selecting entities or configuring options.
    pub fn edit_form<F>(&self, edit: F) -> Result<(), ApplicationError>
    where
        F: FnOnce(&mut WorkflowForm),
    {
        self.ensure_active()?;
        self.state.lock().edit_form(edit)
    }

    /// `SelectEntities -> ConfigureOptions`
    ///
    /// Requires a client and a product that both still resolve in the
    /// catalogs.
    #[instrument(skip(self), fields(workflow_id = %self.id))]
    pub async fn advance(&self) -> Result<(), ApplicationError> {
        self.ensure_active()?;
        let (client_id, product_id) = {
            let mut state = self.state.lock();
            state.ensure_step(WorkflowStep::SelectEntities, "advance")?;
            match Self::selected_entities(state.form()) {
                Ok(ids) => ids,
                Err(err) => {
                    state.surface(&err);
                    return Err(err);
                },
            }
        };

        let verified = self.verify_entities(&client_id, &product_id).await;

        let mut state = self.state.lock();
        if let Err(err) = verified {
            state.surface(&err);
            return Err(err);
        }
        state.enter_options()?;
        debug!("Entities verified, configuring options");
        Ok(())
    }

    /// `ConfigureOptions -> SelectEntities`, keeping all entered values
    pub fn back(&self) -> Result<(), ApplicationError> {
        self.ensure_active()?;
        self.state.lock().go_back()
    }

    /// Previous messages for the selected client, newest first
    #[instrument(skip(self), fields(workflow_id = %self.id))]
    pub async fn follow_up_candidates(&self) -> Result<Vec<MessageSummary>, ApplicationError> {
        self.ensure_active()?;
        let client_id = self
            .state
            .lock()
            .form()
            .client_id
            .clone()
            .ok_or_else(|| DomainError::missing_selection("client"))?;

        self.dependencies.client_history(&client_id).await
    }

    /// `ConfigureOptions -> Generating -> ReviewDraft`
    ///
    /// No service call is made if the form fails validation.
    #[instrument(skip(self), fields(workflow_id = %self.id))]
    pub async fn generate(&self) -> Result<DraftMessage, ApplicationError> {
        self.ensure_active()?;
        let (ticket, request) = {
            let mut state = self.state.lock();
            state.ensure_step(WorkflowStep::ConfigureOptions, "generate")?;
            let request = match GenerationRequestBuilder::build(state.form()) {
                Ok(request) => request,
                Err(err) => {
                    let err = ApplicationError::from(err);
                    state.surface(&err);
                    return Err(err);
                },
            };
            (state.begin_generate()?, request)
        };

        info!(
            message_type = %request.message_type,
            is_follow_up = request.is_follow_up,
            "Generating draft"
        );
        let outcome = self.produce(request).await;
        self.settle(ticket, |state| {
            state.complete_generation(ticket, outcome).cloned()
        })
    }

    /// `ReviewDraft -> Regenerating -> ReviewDraft`
    ///
    /// Re-issues the request that produced the current draft. On success the
    /// new draft replaces the old one and unsaved edits are discarded; the
    /// superseded message stays in the store.
    #[instrument(skip(self), fields(workflow_id = %self.id))]
    pub async fn regenerate(&self) -> Result<DraftMessage, ApplicationError> {
        self.ensure_active()?;
        let (ticket, request) = self.state.lock().begin_regenerate()?;

        info!("Regenerating draft");
        let outcome = self.produce(request).await;
        self.settle(ticket, |state| {
            state.complete_generation(ticket, outcome).cloned()
        })
    }

    /// Replace the subject buffer of an email draft
    pub fn edit_subject(&self, subject: impl Into<String>) -> Result<(), ApplicationError> {
        self.ensure_active()?;
        self.state.lock().edit_subject(subject.into())
    }

    /// Replace the content buffer
    pub fn edit_content(&self, content: impl Into<String>) -> Result<(), ApplicationError> {
        self.ensure_active()?;
        self.state.lock().edit_content(content.into())
    }

    /// `ReviewDraft -> Saving -> Committed`
    ///
    /// Writes the edit buffers to the message created by the latest
    /// generation.
    #[instrument(skip(self), fields(workflow_id = %self.id))]
    pub async fn save(&self) -> Result<Message, ApplicationError> {
        self.ensure_active()?;
        let (ticket, message_id, edit) = {
            let mut state = self.state.lock();
            match state.begin_save() {
                Ok(started) => started,
                Err(err) => {
                    if matches!(err, ApplicationError::Domain(_)) {
                        state.surface(&err);
                    }
                    return Err(err);
                },
            }
        };

        info!(message_id = %message_id, "Saving draft");
        let outcome = self.dependencies.store.update(&message_id, &edit).await;
        if let Err(err) = &outcome {
            warn!(error = %err, "Saving draft failed");
        }
        self.settle(ticket, |state| state.complete_save(ticket, outcome).cloned())
    }

    /// Abandon this instance; later responses are discarded
    pub fn abandon(&self) {
        self.state.lock().abandon();
        self.slot.release(self.id);
        debug!(workflow_id = %self.id, "Workflow abandoned");
    }

    fn selected_entities(form: &WorkflowForm) -> Result<(EntityId, EntityId), ApplicationError> {
        let client_id = form
            .client_id
            .clone()
            .ok_or_else(|| DomainError::missing_selection("client"))?;
        let product_id = form
            .product_id
            .clone()
            .ok_or_else(|| DomainError::missing_selection("product"))?;
        Ok((client_id, product_id))
    }

    async fn verify_entities(
        &self,
        client_id: &EntityId,
        product_id: &EntityId,
    ) -> Result<Client, ApplicationError> {
        let client = self.dependencies.catalogs.require_client(client_id).await?;
        self.dependencies.catalogs.require_product(product_id).await?;
        Ok(client)
    }

    /// Revalidate references, call the generation service, build the draft
    async fn produce(&self, request: GenerationRequest) -> Result<DraftMessage, ApplicationError> {
        let client = self
            .verify_entities(&request.client_id, &request.product_id)
            .await?;
        if let Some(previous) = &request.previous_message_id {
            self.verify_previous_message(&client, previous).await?;
        }

        let message = match self.dependencies.generation.generate(&request).await {
            Ok(message) => message,
            Err(err) => {
                warn!(error = %err, "Generation failed");
                return Err(err);
            },
        };
        let draft = DraftMessage::from_generated(&message, request)?;
        debug!(message_id = %draft.id, "Draft generated");
        Ok(draft)
    }

    /// The previous message must exist and belong to the selected client
    async fn verify_previous_message(
        &self,
        client: &Client,
        previous: &EntityId,
    ) -> Result<(), ApplicationError> {
        let message = self.dependencies.store.get(previous).await?;
        if !IdentityNormalizer::matches(client, message.client_id.as_str()) {
            return Err(DomainError::IntegrityViolation(format!(
                "message {previous} does not belong to the selected client"
            ))
            .into());
        }
        Ok(())
    }
}

//! Workflow state machine
//!
//! Synchronous transitions of one message-generation workflow. The async
//! controller drives these; every asynchronous operation is bracketed by a
//! `begin_*` call that moves into a transient step and hands out an
//! [`OperationTicket`], and a `complete_*` call that only applies its result
//! if the ticket is still the outstanding one.

use std::fmt;

use domain::{DomainError, DraftMessage, EntityId, GenerationRequest, Message, WorkflowId};

use crate::{error::ApplicationError, ports::MessageEdit, services::request_builder::WorkflowForm};

/// Steps of the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowStep {
    /// Choosing client and product
    SelectEntities,
    /// Choosing type, tone, instructions and follow-up linkage
    ConfigureOptions,
    /// First generation call in flight
    Generating,
    /// Draft held for inline editing
    ReviewDraft,
    /// Regeneration call in flight
    Regenerating,
    /// Persistence call in flight
    Saving,
    /// Edits committed
    Committed,
}

impl WorkflowStep {
    /// Steps during which an asynchronous call is outstanding
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Generating | Self::Regenerating | Self::Saving)
    }

    /// Steps in which the selection form may be edited
    #[must_use]
    pub const fn accepts_form_edits(&self) -> bool {
        matches!(self, Self::SelectEntities | Self::ConfigureOptions)
    }

    const fn describe(self) -> &'static str {
        match self {
            Self::SelectEntities => "selecting client and product",
            Self::ConfigureOptions => "configuring options",
            Self::Generating => "generating",
            Self::ReviewDraft => "reviewing the draft",
            Self::Regenerating => "regenerating",
            Self::Saving => "saving",
            Self::Committed => "committed",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// The three asynchronous operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Generate,
    Regenerate,
    Save,
}

impl Operation {
    /// Step required before the operation starts, and returned to on failure
    const fn origin(self) -> WorkflowStep {
        match self {
            Self::Generate => WorkflowStep::ConfigureOptions,
            Self::Regenerate | Self::Save => WorkflowStep::ReviewDraft,
        }
    }

    /// Step shown while the operation is outstanding
    const fn transient(self) -> WorkflowStep {
        match self {
            Self::Generate => WorkflowStep::Generating,
            Self::Regenerate => WorkflowStep::Regenerating,
            Self::Save => WorkflowStep::Saving,
        }
    }

    const fn action(self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Regenerate => "regenerate",
            Self::Save => "save",
        }
    }
}

/// Proof that an operation was started; required to apply its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationTicket {
    workflow: WorkflowId,
    sequence: u64,
    operation: Operation,
}

impl OperationTicket {
    /// Workflow instance the operation belongs to
    pub const fn workflow(&self) -> WorkflowId {
        self.workflow
    }

    /// Which operation was started
    pub const fn operation(&self) -> Operation {
        self.operation
    }
}

/// Editable copies of the draft's subject and content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffers {
    pub subject: Option<String>,
    pub content: String,
}

impl EditBuffers {
    fn from_draft(draft: &DraftMessage) -> Self {
        Self {
            subject: draft.subject.clone(),
            content: draft.content.clone(),
        }
    }
}

/// Immutable snapshot for rendering
#[derive(Debug, Clone)]
pub struct WorkflowView {
    pub id: WorkflowId,
    pub step: WorkflowStep,
    /// True while a transient step disables step-advancing controls
    pub busy: bool,
    pub form: WorkflowForm,
    pub draft: Option<DraftMessage>,
    pub buffers: EditBuffers,
    pub last_error: Option<String>,
    pub committed: Option<Message>,
}

/// Mutable state of one workflow instance
#[derive(Debug)]
pub struct WorkflowState {
    id: WorkflowId,
    step: WorkflowStep,
    form: WorkflowForm,
    draft: Option<DraftMessage>,
    buffers: EditBuffers,
    committed: Option<Message>,
    last_error: Option<String>,
    in_flight: Option<OperationTicket>,
    next_sequence: u64,
    abandoned: bool,
}

impl WorkflowState {
    /// Fresh workflow in the selection step
    pub fn new(id: WorkflowId) -> Self {
        Self {
            id,
            step: WorkflowStep::SelectEntities,
            form: WorkflowForm::default(),
            draft: None,
            buffers: EditBuffers::default(),
            committed: None,
            last_error: None,
            in_flight: None,
            next_sequence: 0,
            abandoned: false,
        }
    }

    pub const fn step(&self) -> WorkflowStep {
        self.step
    }

    pub const fn form(&self) -> &WorkflowForm {
        &self.form
    }

    pub const fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    /// Snapshot for rendering
    pub fn view(&self) -> WorkflowView {
        WorkflowView {
            id: self.id,
            step: self.step,
            busy: self.step.is_transient(),
            form: self.form.clone(),
            draft: self.draft.clone(),
            buffers: self.buffers.clone(),
            last_error: self.last_error.clone(),
            committed: self.committed.clone(),
        }
    }

    /// Record an error for display
    pub fn surface(&mut self, err: &ApplicationError) {
        self.last_error = Some(err.user_message());
    }

    /// Require the given step for a synchronous action
    pub fn ensure_step(
        &self,
        expected: WorkflowStep,
        action: &'static str,
    ) -> Result<(), ApplicationError> {
        if self.abandoned {
            return Err(ApplicationError::StaleWorkflow(self.id));
        }
        if self.step.is_transient() {
            return Err(ApplicationError::OperationInFlight(self.step));
        }
        if self.step != expected {
            return Err(ApplicationError::InvalidTransition {
                step: self.step,
                action,
            });
        }
        Ok(())
    }

    /// Mutate the form; only before a draft exists
    pub fn edit_form<F>(&mut self, edit: F) -> Result<(), ApplicationError>
    where
        F: FnOnce(&mut WorkflowForm),
    {
        if self.abandoned {
            return Err(ApplicationError::StaleWorkflow(self.id));
        }
        if self.step.is_transient() {
            return Err(ApplicationError::OperationInFlight(self.step));
        }
        if !self.step.accepts_form_edits() {
            return Err(ApplicationError::InvalidTransition {
                step: self.step,
                action: "edit the selection",
            });
        }
        edit(&mut self.form);
        Ok(())
    }

    /// `SelectEntities -> ConfigureOptions`, after the entities were verified
    pub fn enter_options(&mut self) -> Result<(), ApplicationError> {
        self.ensure_step(WorkflowStep::SelectEntities, "advance")?;
        self.step = WorkflowStep::ConfigureOptions;
        self.last_error = None;
        Ok(())
    }

    /// `ConfigureOptions -> SelectEntities`, keeping every entered value
    pub fn go_back(&mut self) -> Result<(), ApplicationError> {
        self.ensure_step(WorkflowStep::ConfigureOptions, "go back")?;
        self.step = WorkflowStep::SelectEntities;
        self.last_error = None;
        Ok(())
    }

    fn begin(&mut self, operation: Operation) -> Result<OperationTicket, ApplicationError> {
        self.ensure_step(operation.origin(), operation.action())?;
        let ticket = OperationTicket {
            workflow: self.id,
            sequence: self.next_sequence,
            operation,
        };
        self.next_sequence += 1;
        self.in_flight = Some(ticket);
        self.step = operation.transient();
        self.last_error = None;
        Ok(ticket)
    }

    /// Start the first generation
    pub fn begin_generate(&mut self) -> Result<OperationTicket, ApplicationError> {
        self.begin(Operation::Generate)
    }

    /// Start a regeneration, returning the original request to re-issue
    pub fn begin_regenerate(
        &mut self,
    ) -> Result<(OperationTicket, GenerationRequest), ApplicationError> {
        self.ensure_step(WorkflowStep::ReviewDraft, "regenerate")?;
        let request = self
            .draft
            .as_ref()
            .map(|draft| draft.request.clone())
            .ok_or_else(|| ApplicationError::Internal("review step without a draft".into()))?;
        let ticket = self.begin(Operation::Regenerate)?;
        Ok((ticket, request))
    }

    /// Start a save of the current edit buffers
    pub fn begin_save(
        &mut self,
    ) -> Result<(OperationTicket, EntityId, MessageEdit), ApplicationError> {
        self.ensure_step(WorkflowStep::ReviewDraft, "save")?;
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| ApplicationError::Internal("review step without a draft".into()))?;

        if self.buffers.content.trim().is_empty() {
            return Err(DomainError::missing_selection("content").into());
        }
        let edit = MessageEdit {
            content: self.buffers.content.clone(),
            subject: if draft.message_type.has_subject() {
                Some(self.buffers.subject.clone().unwrap_or_default())
            } else {
                None
            },
        };
        let id = draft.id.clone();
        let ticket = self.begin(Operation::Save)?;
        Ok((ticket, id, edit))
    }

    /// Reject results whose ticket is no longer the outstanding one
    fn accept(&mut self, ticket: OperationTicket) -> Result<(), ApplicationError> {
        if self.abandoned || ticket.workflow != self.id || self.in_flight != Some(ticket) {
            return Err(ApplicationError::StaleWorkflow(ticket.workflow));
        }
        self.in_flight = None;
        Ok(())
    }

    /// Apply the result of a generate or regenerate call
    ///
    /// Success replaces the draft and resets the edit buffers from it.
    /// Failure returns to the originating step leaving draft and buffers
    /// untouched.
    pub fn complete_generation(
        &mut self,
        ticket: OperationTicket,
        outcome: Result<DraftMessage, ApplicationError>,
    ) -> Result<&DraftMessage, ApplicationError> {
        self.accept(ticket)?;
        match outcome {
            Ok(draft) => {
                self.buffers = EditBuffers::from_draft(&draft);
                self.step = WorkflowStep::ReviewDraft;
                Ok(self.draft.insert(draft))
            },
            Err(err) => {
                self.step = ticket.operation.origin();
                self.surface(&err);
                Err(err)
            },
        }
    }

    /// Apply the result of a save call
    pub fn complete_save(
        &mut self,
        ticket: OperationTicket,
        outcome: Result<Message, ApplicationError>,
    ) -> Result<&Message, ApplicationError> {
        self.accept(ticket)?;
        match outcome {
            Ok(message) => {
                self.step = WorkflowStep::Committed;
                Ok(self.committed.insert(message))
            },
            Err(err) => {
                self.step = WorkflowStep::ReviewDraft;
                self.surface(&err);
                Err(err)
            },
        }
    }

    /// Replace the subject buffer; email drafts only
    pub fn edit_subject(&mut self, subject: String) -> Result<(), ApplicationError> {
        self.ensure_step(WorkflowStep::ReviewDraft, "edit the subject")?;
        let has_subject = self
            .draft
            .as_ref()
            .is_some_and(|draft| draft.message_type.has_subject());
        if !has_subject {
            return Err(DomainError::ValidationError(
                "networking notes have no subject".to_string(),
            )
            .into());
        }
        self.buffers.subject = Some(subject);
        Ok(())
    }

    /// Replace the content buffer
    pub fn edit_content(&mut self, content: String) -> Result<(), ApplicationError> {
        self.ensure_step(WorkflowStep::ReviewDraft, "edit the content")?;
        self.buffers.content = content;
        Ok(())
    }

    /// Mark the instance as abandoned; outstanding results will be dropped
    pub fn abandon(&mut self) {
        self.abandoned = true;
        self.in_flight = None;
    }
}

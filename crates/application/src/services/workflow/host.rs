//! Workflow host
//!
//! Owns the single active workflow instance. Starting a new instance
//! abandons the previous one; responses that arrive for an abandoned
//! instance are discarded by the controller.

use std::{fmt, sync::Arc};

use domain::WorkflowId;
use parking_lot::{Mutex, RwLock};
use tracing::info;

use super::controller::{WorkflowController, WorkflowDependencies};

/// Shared record of which workflow instance is currently active
#[derive(Debug, Clone, Default)]
pub struct ActiveWorkflowSlot {
    current: Arc<RwLock<Option<WorkflowId>>>,
}

impl ActiveWorkflowSlot {
    /// Empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` the active instance, returning the one it replaced
    pub fn activate(&self, id: WorkflowId) -> Option<WorkflowId> {
        self.current.write().replace(id)
    }

    /// Clear the slot if `id` still holds it
    pub fn release(&self, id: WorkflowId) {
        let mut current = self.current.write();
        if *current == Some(id) {
            *current = None;
        }
    }

    /// Currently active instance
    pub fn current(&self) -> Option<WorkflowId> {
        *self.current.read()
    }

    /// True if `id` is the active instance
    pub fn is_active(&self, id: WorkflowId) -> bool {
        self.current() == Some(id)
    }
}

/// Starts workflow instances and tracks the active one
pub struct WorkflowHost {
    dependencies: WorkflowDependencies,
    slot: ActiveWorkflowSlot,
    active: Mutex<Option<Arc<WorkflowController>>>,
}

impl fmt::Debug for WorkflowHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowHost")
            .field("active", &self.slot.current())
            .finish_non_exhaustive()
    }
}

impl WorkflowHost {
    /// Create a host with no active workflow
    pub fn new(dependencies: WorkflowDependencies) -> Self {
        Self {
            dependencies,
            slot: ActiveWorkflowSlot::new(),
            active: Mutex::new(None),
        }
    }

    /// Start a fresh workflow, abandoning the active one if any
    pub fn start(&self) -> Arc<WorkflowController> {
        let controller = Arc::new(WorkflowController::with_slot(
            self.dependencies.clone(),
            self.slot.clone(),
        ));

        let previous = self.active.lock().replace(Arc::clone(&controller));
        if let Some(previous) = previous {
            info!(workflow_id = %previous.id(), "Abandoning workflow for a new one");
            previous.abandon();
        }
        self.slot.activate(controller.id());
        info!(workflow_id = %controller.id(), "Workflow started");
        controller
    }

    /// The active workflow, if any
    pub fn active(&self) -> Option<Arc<WorkflowController>> {
        self.active.lock().clone()
    }

    /// Abandon the active workflow without starting another
    pub fn abandon_active(&self) {
        if let Some(controller) = self.active.lock().take() {
            controller.abandon();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_tracks_latest_activation() {
        let slot = ActiveWorkflowSlot::new();
        let first = WorkflowId::new();
        let second = WorkflowId::new();

        assert_eq!(slot.activate(first), None);
        assert_eq!(slot.activate(second), Some(first));
        assert!(slot.is_active(second));
        assert!(!slot.is_active(first));
    }

    #[test]
    fn release_only_clears_own_id() {
        let slot = ActiveWorkflowSlot::new();
        let first = WorkflowId::new();
        let second = WorkflowId::new();
        slot.activate(second);

        slot.release(first);
        assert_eq!(slot.current(), Some(second));
        slot.release(second);
        assert_eq!(slot.current(), None);
    }
}

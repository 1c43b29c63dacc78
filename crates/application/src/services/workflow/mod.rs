//! Message-generation workflow
//!
//! Select client and product, configure options, generate, review and edit
//! the draft, then commit the edits.

mod controller;
mod host;
mod state;

pub use controller::{WorkflowController, WorkflowDependencies};
pub use host::{ActiveWorkflowSlot, WorkflowHost};
pub use state::{EditBuffers, Operation, OperationTicket, WorkflowStep, WorkflowView};

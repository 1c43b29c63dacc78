//! Application services - Use case implementations

pub mod entity_catalogs;
pub mod request_builder;
pub mod workflow;

pub use entity_catalogs::EntityCatalogs;
pub use request_builder::{GenerationRequestBuilder, WorkflowForm};
pub use workflow::{
    ActiveWorkflowSlot, EditBuffers, WorkflowController, WorkflowDependencies, WorkflowHost,
    WorkflowStep, WorkflowView,
};

//! Value Objects - Immutable, identity-less domain primitives

mod entity_id;
mod message_status;
mod message_type;
mod role_category;
mod tone;
mod workflow_id;

pub use entity_id::EntityId;
pub use message_status::MessageStatus;
pub use message_type::MessageType;
pub use role_category::RoleCategory;
pub use tone::Tone;
pub use workflow_id::WorkflowId;

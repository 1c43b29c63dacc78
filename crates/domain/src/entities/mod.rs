//! Domain entities - Objects with identity and lifecycle

mod client;
mod draft_message;
mod generation_request;
mod message;
mod product;

pub use client::Client;
pub use draft_message::DraftMessage;
pub use generation_request::{GenerationRequest, MAX_CUSTOM_INSTRUCTIONS_LEN};
pub use message::{Message, MessageSummary};
pub use product::{Feature, Product};

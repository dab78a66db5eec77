pub mod dto;
mod helpers;
mod request_context;

pub use dto::RequestContext;
pub use helpers::{action_param, extract_context_from_query, nonce_param, token_param};
pub use request_context::RequestContextExt;

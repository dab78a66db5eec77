pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod payment_methods;
pub mod updates;

pub use auth::{action_scope, AntiForgeryVerifier, ScopedNonces};
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};

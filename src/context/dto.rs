use serde::{Deserialize, Serialize};

/// Snapshot of the incoming interaction, built once per request by the
/// surrounding web layer and passed by value into the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestContext {
    pub authenticated: bool,
    pub on_payment_methods_page: bool,
    pub user_id: u64,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub token_id: Option<String>,
    #[serde(default)]
    pub nonce: Option<String>,
}

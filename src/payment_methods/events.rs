use serde::{Deserialize, Serialize};

/// Domain notifications emitted after a dispatched action. Fire-and-forget;
/// the dispatcher never waits on or inspects listener handling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TokenEvent {
    #[serde(rename = "payment_method_deleted")]
    Deleted { token_id: String, user_id: u64 },
    #[serde(rename = "payment_method_made_default")]
    MadeDefault { token_id: String, user_id: u64 },
    #[serde(rename = "payment_method_custom_action")]
    Custom { action: String, token_id: String },
}

pub trait EventSink {
    fn emit(&self, event: TokenEvent);
}

/// Default sink: events go to the log stream and nowhere else.
#[derive(Debug, Default, Clone)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: TokenEvent) {
        tracing::info!("Token event: {:?}", event);
    }
}

use std::collections::HashMap;

use super::dto::RequestContext;

pub fn action_param(gateway_slug: &str) -> String {
    format!("wc-{}-token-action", gateway_slug)
}

pub fn token_param(gateway_slug: &str) -> String {
    format!("wc-{}-token", gateway_slug)
}

pub fn nonce_param(gateway_slug: &str) -> String {
    format!("wc-{}-token-nonce", gateway_slug)
}

/// Builds a request context from the decoded query pairs of the current
/// request. Page and session facts come from the caller; only the
/// gateway-scoped action parameters are read from the query itself.
pub fn extract_context_from_query(
    gateway_slug: &str,
    authenticated: bool,
    on_payment_methods_page: bool,
    user_id: u64,
    query: &HashMap<String, String>,
) -> RequestContext {
    RequestContext {
        authenticated,
        on_payment_methods_page,
        user_id,
        action: non_empty(query.get(&action_param(gateway_slug))),
        token_id: non_empty(query.get(&token_param(gateway_slug))),
        nonce: non_empty(query.get(&nonce_param(gateway_slug))),
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

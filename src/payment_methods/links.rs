use crate::context::{action_param, nonce_param, token_param};

use super::dispatcher::{ACTION_DELETE, ACTION_MAKE_DEFAULT};
use super::dto::PaymentToken;

/// The actions offered for one token: delete always, make-default only while
/// the token is not already the default.
pub fn available_actions(token: &PaymentToken) -> Vec<(&'static str, &'static str)> {
    let mut actions = vec![(ACTION_DELETE, "Delete")];
    if !token.is_default {
        actions.push((ACTION_MAKE_DEFAULT, "Make Default"));
    }
    actions
}

/// Builds the href for a payment-method row action: the account page URL
/// with the gateway-scoped action parameters and nonce appended.
pub fn build_action_url(
    account_url: &str,
    gateway_slug: &str,
    action: &str,
    token_id: &str,
    nonce: &str,
) -> String {
    let separator = if account_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}={}&{}={}&{}={}",
        account_url,
        separator,
        action_param(gateway_slug),
        urlencoding::encode(action),
        token_param(gateway_slug),
        urlencoding::encode(token_id),
        nonce_param(gateway_slug),
        urlencoding::encode(nonce),
    )
}

use std::sync::Arc;

use crate::auth::{action_scope, AntiForgeryVerifier};
use crate::context::{RequestContext, RequestContextExt};

use super::dto::ActionOutcome;
use super::events::{EventSink, TokenEvent};
use super::store::TokenStore;

pub const ACTION_DELETE: &str = "delete";
pub const ACTION_MAKE_DEFAULT: &str = "make-default";

// The invalid-request notice is shared by every validation failure so the
// response never reveals which check rejected the request.
const NOTICE_INVALID_REQUEST: &str = "Oops, something went wrong! Please try again.";
const NOTICE_REMOVE_FAILED: &str = "Error removing payment method";
const NOTICE_DELETED: &str = "Payment method deleted.";
const NOTICE_DEFAULT_UPDATED: &str = "Default payment method updated.";

/// Validates, authorizes and executes one payment-method action per
/// interaction, always resolving into an [`ActionOutcome`].
pub struct ActionDispatcher {
    gateway_slug: String,
    account_url: String,
    store: Arc<dyn TokenStore + Send + Sync>,
    verifier: Arc<dyn AntiForgeryVerifier + Send + Sync>,
    events: Arc<dyn EventSink + Send + Sync>,
}

impl ActionDispatcher {
    pub fn new(
        gateway_slug: impl Into<String>,
        account_url: impl Into<String>,
        store: Arc<dyn TokenStore + Send + Sync>,
        verifier: Arc<dyn AntiForgeryVerifier + Send + Sync>,
        events: Arc<dyn EventSink + Send + Sync>,
    ) -> Self {
        Self {
            gateway_slug: gateway_slug.into(),
            account_url: account_url.into(),
            store,
            verifier,
            events,
        }
    }

    pub fn dispatch(&self, ctx: &RequestContext) -> ActionOutcome {
        // Sanity check: a registered user viewing the payment methods page
        if !ctx.authenticated || !ctx.on_payment_methods_page {
            return ActionOutcome::NoOp;
        }

        let Some((action, token_id)) = ctx.action_pair() else {
            return ActionOutcome::NoOp;
        };

        let scope = action_scope(&self.gateway_slug, action);
        let presented = ctx.nonce.as_deref().unwrap_or_default();
        if !self.verifier.verify(presented, &scope) {
            tracing::warn!(
                "Anti-forgery check failed for {} action {:?}",
                ctx.label(),
                action
            );
            return self.error(NOTICE_INVALID_REQUEST);
        }

        match action {
            ACTION_DELETE => self.delete(ctx.user_id, token_id),
            ACTION_MAKE_DEFAULT => self.make_default(ctx.user_id, token_id),
            custom => self.custom(ctx.user_id, custom, token_id),
        }
    }

    fn delete(&self, user_id: u64, token_id: &str) -> ActionOutcome {
        if self.store.remove_token(user_id, token_id) {
            self.events.emit(TokenEvent::Deleted {
                token_id: token_id.to_string(),
                user_id,
            });
            self.success(Some(NOTICE_DELETED))
        } else {
            tracing::warn!("Token store refused removal of {} for user {}", token_id, user_id);
            self.error(NOTICE_REMOVE_FAILED)
        }
    }

    fn make_default(&self, user_id: u64, token_id: &str) -> ActionOutcome {
        self.store.set_default_token(user_id, token_id);
        self.events.emit(TokenEvent::MadeDefault {
            token_id: token_id.to_string(),
            user_id,
        });
        self.success(Some(NOTICE_DEFAULT_UPDATED))
    }

    fn custom(&self, user_id: u64, action: &str, token_id: &str) -> ActionOutcome {
        // Custom actions mutate nothing here, but the target must still be a
        // token the acting user owns.
        let owned = self
            .store
            .tokens_for_user(user_id)
            .iter()
            .any(|token| token.id == token_id);
        if !owned {
            tracing::warn!(
                "Rejected custom action {:?} against token {} not owned by user {}",
                action,
                token_id,
                user_id
            );
            return self.error(NOTICE_INVALID_REQUEST);
        }

        self.events.emit(TokenEvent::Custom {
            action: action.to_string(),
            token_id: token_id.to_string(),
        });
        self.success(None)
    }

    fn success(&self, notice: Option<&str>) -> ActionOutcome {
        ActionOutcome::Success {
            notice: notice.map(str::to_string),
            redirect_to: self.account_url.clone(),
        }
    }

    fn error(&self, notice: &str) -> ActionOutcome {
        ActionOutcome::Error {
            notice: notice.to_string(),
            redirect_to: self.account_url.clone(),
        }
    }
}

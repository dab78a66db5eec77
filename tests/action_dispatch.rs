use std::sync::{Arc, Mutex};

use storefront_bridge::auth::{action_scope, ScopedNonces};
use storefront_bridge::context::RequestContext;
use storefront_bridge::payment_methods::{
    ActionDispatcher, ActionOutcome, EventSink, InMemoryTokenStore, PaymentToken, TokenEvent,
    TokenKind, TokenStore, ACTION_DELETE, ACTION_MAKE_DEFAULT,
};

const GATEWAY_SLUG: &str = "storefront-gateway";
const ACCOUNT_URL: &str = "https://shop.example.com/my-account/payment-methods";
const SECRET: &str = "test-secret";
const USER_ID: u64 = 7;

#[derive(Default)]
struct RecordingStore {
    inner: InMemoryTokenStore,
    mutations: Mutex<Vec<String>>,
}

impl TokenStore for RecordingStore {
    fn tokens_for_user(&self, user_id: u64) -> Vec<PaymentToken> {
        self.inner.tokens_for_user(user_id)
    }

    fn remove_token(&self, user_id: u64, token_id: &str) -> bool {
        self.mutations
            .lock()
            .unwrap()
            .push(format!("remove:{}", token_id));
        self.inner.remove_token(user_id, token_id)
    }

    fn set_default_token(&self, user_id: u64, token_id: &str) {
        self.mutations
            .lock()
            .unwrap()
            .push(format!("set_default:{}", token_id));
        self.inner.set_default_token(user_id, token_id)
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<TokenEvent>>,
}

impl EventSink for RecordingSink {
    fn emit(&self, event: TokenEvent) {
        self.events.lock().unwrap().push(event);
    }
}

struct Harness {
    store: Arc<RecordingStore>,
    sink: Arc<RecordingSink>,
    dispatcher: ActionDispatcher,
}

fn harness() -> Harness {
    let store = Arc::new(RecordingStore::default());
    let sink = Arc::new(RecordingSink::default());
    let dispatcher = ActionDispatcher::new(
        GATEWAY_SLUG,
        ACCOUNT_URL,
        Arc::clone(&store) as Arc<dyn TokenStore + Send + Sync>,
        Arc::new(ScopedNonces::with_secret(SECRET)),
        Arc::clone(&sink) as Arc<dyn EventSink + Send + Sync>,
    );
    Harness {
        store,
        sink,
        dispatcher,
    }
}

fn token(id: &str, is_default: bool) -> PaymentToken {
    PaymentToken {
        id: id.to_string(),
        user_id: USER_ID,
        kind: TokenKind::Card,
        last_four: Some("1234".to_string()),
        exp_month: Some(3),
        exp_year: Some(2027),
        nickname: None,
        is_default,
        image_url: None,
    }
}

fn valid_nonce(action: &str) -> String {
    ScopedNonces::with_secret(SECRET).issue(&action_scope(GATEWAY_SLUG, action))
}

fn ctx(action: &str, token_id: &str, nonce: Option<String>) -> RequestContext {
    RequestContext {
        authenticated: true,
        on_payment_methods_page: true,
        user_id: USER_ID,
        action: Some(action.to_string()),
        token_id: Some(token_id.to_string()),
        nonce,
    }
}

#[test]
fn unauthenticated_request_is_noop_with_no_side_effects() {
    let h = harness();
    let mut context = ctx(ACTION_DELETE, "tok_1", Some(valid_nonce(ACTION_DELETE)));
    context.authenticated = false;

    assert_eq!(h.dispatcher.dispatch(&context), ActionOutcome::NoOp);
    assert!(h.store.mutations.lock().unwrap().is_empty());
    assert!(h.sink.events.lock().unwrap().is_empty());
}

#[test]
fn request_off_the_payment_methods_page_is_noop() {
    let h = harness();
    let mut context = ctx(ACTION_DELETE, "tok_1", Some(valid_nonce(ACTION_DELETE)));
    context.on_payment_methods_page = false;

    assert_eq!(h.dispatcher.dispatch(&context), ActionOutcome::NoOp);
    assert!(h.store.mutations.lock().unwrap().is_empty());
}

#[test]
fn missing_action_or_token_is_noop() {
    let h = harness();

    let mut context = ctx(ACTION_DELETE, "tok_1", Some(valid_nonce(ACTION_DELETE)));
    context.action = None;
    assert_eq!(h.dispatcher.dispatch(&context), ActionOutcome::NoOp);

    let mut context = ctx(ACTION_DELETE, "tok_1", Some(valid_nonce(ACTION_DELETE)));
    context.token_id = Some(String::new());
    assert_eq!(h.dispatcher.dispatch(&context), ActionOutcome::NoOp);

    assert!(h.store.mutations.lock().unwrap().is_empty());
    assert!(h.sink.events.lock().unwrap().is_empty());
}

#[test]
fn invalid_nonce_is_a_generic_error_with_zero_store_calls() {
    let h = harness();
    h.store.inner.insert(token("tok_2", false));

    let context = ctx(ACTION_MAKE_DEFAULT, "tok_2", Some("bogus".to_string()));
    let outcome = h.dispatcher.dispatch(&context);

    match outcome {
        ActionOutcome::Error { notice, redirect_to } => {
            assert_eq!(notice, "Oops, something went wrong! Please try again.");
            assert_eq!(redirect_to, ACCOUNT_URL);
        }
        other => panic!("expected error outcome, got {:?}", other),
    }
    assert!(h.store.mutations.lock().unwrap().is_empty());
    assert!(h.sink.events.lock().unwrap().is_empty());
}

#[test]
fn missing_nonce_is_rejected() {
    let h = harness();
    let outcome = h.dispatcher.dispatch(&ctx(ACTION_DELETE, "tok_1", None));
    assert!(matches!(outcome, ActionOutcome::Error { .. }));
    assert!(h.store.mutations.lock().unwrap().is_empty());
}

#[test]
fn nonce_issued_for_another_action_is_rejected() {
    let h = harness();
    h.store.inner.insert(token("tok_1", false));

    let context = ctx(ACTION_MAKE_DEFAULT, "tok_1", Some(valid_nonce(ACTION_DELETE)));
    assert!(matches!(
        h.dispatcher.dispatch(&context),
        ActionOutcome::Error { .. }
    ));
    assert!(h.store.mutations.lock().unwrap().is_empty());
}

#[test]
fn delete_success_emits_event_and_redirects() {
    let h = harness();
    h.store.inner.insert(token("tok_1", false));

    let context = ctx(ACTION_DELETE, "tok_1", Some(valid_nonce(ACTION_DELETE)));
    let outcome = h.dispatcher.dispatch(&context);

    assert_eq!(
        outcome,
        ActionOutcome::Success {
            notice: Some("Payment method deleted.".to_string()),
            redirect_to: ACCOUNT_URL.to_string(),
        }
    );
    assert_eq!(
        *h.sink.events.lock().unwrap(),
        vec![TokenEvent::Deleted {
            token_id: "tok_1".to_string(),
            user_id: USER_ID,
        }]
    );
    assert!(h.store.tokens_for_user(USER_ID).is_empty());
}

#[test]
fn failed_removal_is_an_error_without_an_event() {
    let h = harness();
    // nothing seeded: the store reports failure

    let context = ctx(ACTION_DELETE, "tok_missing", Some(valid_nonce(ACTION_DELETE)));
    let outcome = h.dispatcher.dispatch(&context);

    match outcome {
        ActionOutcome::Error { notice, .. } => {
            assert_eq!(notice, "Error removing payment method");
        }
        other => panic!("expected error outcome, got {:?}", other),
    }
    assert_eq!(
        *h.store.mutations.lock().unwrap(),
        vec!["remove:tok_missing".to_string()]
    );
    assert!(h.sink.events.lock().unwrap().is_empty());
}

#[test]
fn make_default_updates_store_and_emits_event() {
    let h = harness();
    h.store.inner.insert(token("tok_1", true));
    h.store.inner.insert(token("tok_2", false));

    let context = ctx(
        ACTION_MAKE_DEFAULT,
        "tok_2",
        Some(valid_nonce(ACTION_MAKE_DEFAULT)),
    );
    let outcome = h.dispatcher.dispatch(&context);

    assert_eq!(
        outcome,
        ActionOutcome::Success {
            notice: Some("Default payment method updated.".to_string()),
            redirect_to: ACCOUNT_URL.to_string(),
        }
    );
    assert_eq!(
        *h.sink.events.lock().unwrap(),
        vec![TokenEvent::MadeDefault {
            token_id: "tok_2".to_string(),
            user_id: USER_ID,
        }]
    );

    let defaults: Vec<_> = h
        .store
        .tokens_for_user(USER_ID)
        .into_iter()
        .filter(|t| t.is_default)
        .map(|t| t.id)
        .collect();
    assert_eq!(defaults, vec!["tok_2".to_string()]);
}

#[test]
fn custom_action_routes_event_without_store_mutation() {
    let h = harness();
    h.store.inner.insert(token("tok_3", false));

    let context = ctx("suspend", "tok_3", Some(valid_nonce("suspend")));
    let outcome = h.dispatcher.dispatch(&context);

    assert_eq!(
        outcome,
        ActionOutcome::Success {
            notice: None,
            redirect_to: ACCOUNT_URL.to_string(),
        }
    );
    assert_eq!(
        *h.sink.events.lock().unwrap(),
        vec![TokenEvent::Custom {
            action: "suspend".to_string(),
            token_id: "tok_3".to_string(),
        }]
    );
    assert!(h.store.mutations.lock().unwrap().is_empty());
}

#[test]
fn custom_action_against_unowned_token_is_rejected() {
    let h = harness();
    // tok_9 belongs to nobody in this store

    let context = ctx("suspend", "tok_9", Some(valid_nonce("suspend")));
    let outcome = h.dispatcher.dispatch(&context);

    match outcome {
        ActionOutcome::Error { notice, .. } => {
            // Same generic notice as a failed anti-forgery check
            assert_eq!(notice, "Oops, something went wrong! Please try again.");
        }
        other => panic!("expected error outcome, got {:?}", other),
    }
    assert!(h.sink.events.lock().unwrap().is_empty());
}

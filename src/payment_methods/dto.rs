use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Card,
    Bank,
    Other,
}

impl TokenKind {
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::Card => "Credit card",
            TokenKind::Bank => "Bank account",
            TokenKind::Other => "Payment method",
        }
    }
}

/// A stored payment credential reference. Created and destroyed by payment
/// processing outside this crate; read here, mutated only through the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentToken {
    pub id: String,
    pub user_id: u64,
    pub kind: TokenKind,
    #[serde(default)]
    pub last_four: Option<String>,
    #[serde(default)]
    pub exp_month: Option<u8>,
    #[serde(default)]
    pub exp_year: Option<u16>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl PaymentToken {
    /// Name shown in the payment methods table: the customer's nickname if
    /// set, otherwise the kind label.
    pub fn display_name(&self) -> String {
        self.nickname
            .clone()
            .unwrap_or_else(|| self.kind.label().to_string())
    }

    /// `MM/YY` expiration, when both parts are known.
    pub fn expiry(&self) -> Option<String> {
        match (self.exp_month, self.exp_year) {
            (Some(month), Some(year)) => Some(format!("{:02}/{:02}", month, year % 100)),
            _ => None,
        }
    }
}

/// Terminal result of one action dispatch. `NoOp` lets the surrounding page
/// render proceed; the other two end the interaction with a redirect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionOutcome {
    NoOp,
    Success {
        notice: Option<String>,
        redirect_to: String,
    },
    Error {
        notice: String,
        redirect_to: String,
    },
}

impl ActionOutcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, ActionOutcome::NoOp)
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            ActionOutcome::NoOp => None,
            ActionOutcome::Success { notice, .. } => notice.as_deref(),
            ActionOutcome::Error { notice, .. } => Some(notice),
        }
    }

    pub fn redirect_to(&self) -> Option<&str> {
        match self {
            ActionOutcome::NoOp => None,
            ActionOutcome::Success { redirect_to, .. }
            | ActionOutcome::Error { redirect_to, .. } => Some(redirect_to),
        }
    }
}

use super::dto::RequestContext;

pub trait RequestContextExt {
    fn action_pair(&self) -> Option<(&str, &str)>;
    fn label(&self) -> String;
}

impl RequestContextExt for RequestContext {
    /// The requested action and token id, when both were supplied.
    fn action_pair(&self) -> Option<(&str, &str)> {
        match (self.action.as_deref(), self.token_id.as_deref()) {
            (Some(action), Some(token_id)) if !action.is_empty() && !token_id.is_empty() => {
                Some((action, token_id))
            }
            _ => None,
        }
    }

    fn label(&self) -> String {
        format!("user:{}", self.user_id)
    }
}

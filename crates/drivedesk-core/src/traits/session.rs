//! Session collaborator.

/// Supplies the access token for transfer calls.
pub trait AccessTokenSource: Send + Sync + 'static {
    /// The current token, or `None` when the session has expired.
    fn access_token(&self) -> Option<String>;
}

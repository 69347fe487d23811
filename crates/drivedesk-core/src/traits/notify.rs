//! User-facing notification collaborator (toasts).

/// Displays short messages to the user.
pub trait Notifier: Send + Sync + 'static {
    /// Show a success message.
    fn success(&self, message: &str);

    /// Show an error message.
    fn error(&self, message: &str);
}

//! Driven port for transient user notifications.

/// Fire-and-forget success and error messages.
///
/// Implementations must not block the caller: views notify and carry on.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Announce that an action completed.
    fn success(&self, message: &str);

    /// Announce that an action failed.
    fn error(&self, message: &str);
}

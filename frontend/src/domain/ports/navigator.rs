//! Driven ports for leaving a view.

use crate::domain::Route;

/// Moves the user to another view.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Navigate to `route`. The current view is discarded.
    fn go_to(&self, route: Route);
}

/// Asks the user a yes/no question before a destructive action.
#[cfg_attr(test, mockall::automock)]
pub trait ConfirmationPrompt: Send + Sync {
    /// Return `true` when the user accepts `message`.
    fn confirm(&self, message: &str) -> bool;
}

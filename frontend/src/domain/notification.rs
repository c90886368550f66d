//! Shared toast dispatcher for transient notifications.
//!
//! One [`ToastDispatcher`] is cloned into every view. Toasts are queued in
//! arrival order and dismiss themselves once their lifetime has elapsed on the
//! injected clock; renderers poll [`ToastDispatcher::visible`] or take the
//! whole queue with [`ToastDispatcher::drain`].

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tracing::debug;

use super::ports::Notifier;

const SUCCESS_LIFETIME: Duration = Duration::from_secs(2);
const ERROR_LIFETIME: Duration = Duration::from_secs(4);

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// Identifier handed out by [`ToastDispatcher::enqueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToastId(u64);

/// A queued notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Dispatcher-assigned identifier.
    pub id: ToastId,
    /// Severity.
    pub level: ToastLevel,
    /// Message text.
    pub message: String,
    /// Instant the toast stops being visible.
    pub expires_at: DateTime<Utc>,
}

/// How long each toast level stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastLifetimes {
    /// Lifetime of success toasts.
    pub success: Duration,
    /// Lifetime of error toasts.
    pub error: Duration,
}

impl Default for ToastLifetimes {
    fn default() -> Self {
        Self {
            success: SUCCESS_LIFETIME,
            error: ERROR_LIFETIME,
        }
    }
}

impl ToastLifetimes {
    const fn for_level(self, level: ToastLevel) -> Duration {
        match level {
            ToastLevel::Success => self.success,
            ToastLevel::Error => self.error,
        }
    }
}

#[derive(Debug, Default)]
struct ToastQueue {
    next_id: u64,
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    fn prune(&mut self, now: DateTime<Utc>) {
        self.toasts.retain(|toast| toast.expires_at > now);
    }
}

/// Process-wide toast queue with auto-dismiss.
///
/// Cloning shares the same queue.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use frontend::domain::ToastDispatcher;
/// use frontend::domain::ports::Notifier;
/// use mockable::DefaultClock;
///
/// let toasts = ToastDispatcher::new(Arc::new(DefaultClock));
/// toasts.success("Customer created successfully");
/// assert_eq!(toasts.visible().len(), 1);
/// ```
#[derive(Clone)]
pub struct ToastDispatcher {
    queue: Arc<Mutex<ToastQueue>>,
    clock: Arc<dyn Clock + Send + Sync>,
    lifetimes: ToastLifetimes,
}

impl ToastDispatcher {
    /// Build a dispatcher with the default lifetimes.
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self::with_lifetimes(clock, ToastLifetimes::default())
    }

    /// Build a dispatcher with explicit lifetimes.
    pub fn with_lifetimes(
        clock: Arc<dyn Clock + Send + Sync>,
        lifetimes: ToastLifetimes,
    ) -> Self {
        Self {
            queue: Arc::new(Mutex::new(ToastQueue::default())),
            clock,
            lifetimes,
        }
    }

    /// Queue a toast and return its identifier.
    pub fn enqueue(&self, level: ToastLevel, message: impl Into<String>) -> ToastId {
        let now = self.clock.utc();
        let lifetime =
            TimeDelta::from_std(self.lifetimes.for_level(level)).unwrap_or(TimeDelta::MAX);
        let expires_at = now
            .checked_add_signed(lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut queue = self.lock();
        queue.prune(now);
        let id = ToastId(queue.next_id);
        queue.next_id += 1;
        let message = message.into();
        debug!(?level, toast_id = id.0, %message, "toast queued");
        queue.toasts.push_back(Toast {
            id,
            level,
            message,
            expires_at,
        });
        id
    }

    /// Toasts that have not yet expired, oldest first.
    pub fn visible(&self) -> Vec<Toast> {
        let now = self.clock.utc();
        let mut queue = self.lock();
        queue.prune(now);
        queue.toasts.iter().cloned().collect()
    }

    /// Dismiss a toast early. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut queue = self.lock();
        let before = queue.toasts.len();
        queue.toasts.retain(|toast| toast.id != id);
        queue.toasts.len() != before
    }

    /// Take every visible toast, leaving the queue empty.
    pub fn drain(&self) -> Vec<Toast> {
        let now = self.clock.utc();
        let mut queue = self.lock();
        queue.prune(now);
        queue.toasts.drain(..).collect()
    }

    fn lock(&self) -> MutexGuard<'_, ToastQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for ToastDispatcher {
    fn success(&self, message: &str) {
        self.enqueue(ToastLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.enqueue(ToastLevel::Error, message);
    }
}

impl fmt::Debug for ToastDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastDispatcher")
            .field("lifetimes", &self.lifetimes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    //! Auto-dismiss coverage driven by a hand-advanced clock.

    use super::*;
    use chrono::{Local, TimeZone};
    use rstest::{fixture, rstest};

    struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        fn advance_millis(&self, millis: i64) {
            let mut guard = self.0.lock().expect("clock mutex");
            *guard += TimeDelta::milliseconds(millis);
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock mutex")
        }
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid fixed time");
        Arc::new(MutableClock(Mutex::new(start)))
    }

    #[rstest]
    fn toasts_are_visible_in_arrival_order(clock: Arc<MutableClock>) {
        let toasts = ToastDispatcher::new(clock);
        toasts.success("first");
        toasts.error("second");

        let messages = toasts
            .visible()
            .into_iter()
            .map(|toast| toast.message)
            .collect::<Vec<_>>();
        assert_eq!(messages, ["first", "second"]);
    }

    #[rstest]
    fn success_toasts_expire_before_error_toasts(clock: Arc<MutableClock>) {
        let toasts = ToastDispatcher::new(clock.clone());
        toasts.success("saved");
        toasts.error("failed");

        clock.advance_millis(2_000);
        let visible = toasts.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.first().map(|toast| toast.level), Some(ToastLevel::Error));

        clock.advance_millis(2_000);
        assert!(toasts.visible().is_empty());
    }

    #[rstest]
    fn clones_share_one_queue(clock: Arc<MutableClock>) {
        let toasts = ToastDispatcher::new(clock);
        let shared = toasts.clone();
        shared.error("from another view");
        assert_eq!(toasts.visible().len(), 1);
    }

    #[rstest]
    fn dismiss_removes_only_the_named_toast(clock: Arc<MutableClock>) {
        let toasts = ToastDispatcher::new(clock);
        let first = toasts.enqueue(ToastLevel::Success, "one");
        toasts.enqueue(ToastLevel::Success, "two");

        assert!(toasts.dismiss(first));
        assert!(!toasts.dismiss(first));
        let remaining = toasts.visible();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining.first().map(|toast| toast.message.as_str()), Some("two"));
    }

    #[rstest]
    fn drain_empties_the_queue_and_skips_expired_toasts(clock: Arc<MutableClock>) {
        let toasts = ToastDispatcher::with_lifetimes(
            clock.clone(),
            ToastLifetimes {
                success: Duration::from_millis(100),
                error: Duration::from_secs(10),
            },
        );
        toasts.success("stale");
        toasts.error("fresh");
        clock.advance_millis(500);

        let drained = toasts.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained.first().map(|toast| toast.message.as_str()), Some("fresh"));
        assert!(toasts.visible().is_empty());
    }

    #[rstest]
    fn identifiers_are_unique(clock: Arc<MutableClock>) {
        let toasts = ToastDispatcher::new(clock);
        let first = toasts.enqueue(ToastLevel::Error, "a");
        let second = toasts.enqueue(ToastLevel::Error, "a");
        assert_ne!(first, second);
    }
}

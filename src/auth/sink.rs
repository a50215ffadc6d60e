//! Irrecoverable-auth-failure notification
//!
//! When a token refresh itself fails, the credentials are gone and no
//! request-level recovery is possible; someone above the client has to
//! flip the application into its signed-out state. [`AuthFailureSink`] is
//! that escalation point: a single-slot callback registry the session
//! layer plugs into.

use std::sync::{Arc, Mutex};

/// Callback invoked with no arguments on irrecoverable auth failure.
pub type FailureCallback = Box<dyn Fn() + Send + Sync>;

/// Zero-or-one registered failure callback.
///
/// Cloning shares the slot. The callback is synchronous: it fires from
/// inside the refresh protocol after the credential wipe, so it only needs
/// to flip in-memory state.
///
/// # Examples
///
/// ```
/// use courier::auth::sink::AuthFailureSink;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let sink = AuthFailureSink::new();
/// let count = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&count);
/// sink.register(Box::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// sink.notify();
/// assert_eq!(count.load(Ordering::SeqCst), 1);
///
/// sink.unregister();
/// sink.notify(); // no-op once unregistered
/// assert_eq!(count.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone, Default)]
pub struct AuthFailureSink {
    slot: Arc<Mutex<Option<FailureCallback>>>,
}

impl AuthFailureSink {
    /// Creates a sink with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback`, replacing any previous registration.
    pub fn register(&self, callback: FailureCallback) {
        *self.slot.lock().unwrap() = Some(callback);
    }

    /// Clears the registration. Safe to call when nothing is registered.
    pub fn unregister(&self) {
        *self.slot.lock().unwrap() = None;
    }

    /// Invokes the registered callback, if any. Absent registration is a
    /// legal no-op, not an error.
    pub fn notify(&self) {
        let guard = self.slot.lock().unwrap();
        if let Some(callback) = guard.as_ref() {
            callback();
        }
    }
}

impl std::fmt::Debug for AuthFailureSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registered = self.slot.lock().map(|g| g.is_some()).unwrap_or(false);
        f.debug_struct("AuthFailureSink")
            .field("registered", &registered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_without_registration_is_noop() {
        let sink = AuthFailureSink::new();
        sink.notify(); // must not panic
    }

    #[test]
    fn test_notify_invokes_registered_callback() {
        let sink = AuthFailureSink::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        sink.register(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        sink.notify();
        sink.notify();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_register_replaces_previous_callback() {
        let sink = AuthFailureSink::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&first);
        sink.register(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let counter = Arc::clone(&second);
        sink.register(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        sink.notify();
        assert_eq!(first.load(Ordering::SeqCst), 0, "replaced callback silent");
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unregister_silences_sink() {
        let sink = AuthFailureSink::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        sink.register(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        sink.unregister();
        sink.notify();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_clones_share_the_slot() {
        let sink = AuthFailureSink::new();
        let clone = sink.clone();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        clone.register(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        sink.notify();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}

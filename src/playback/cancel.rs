//! Cancellation for the blocking part of a playback session.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

/// How a [`CancelToken::wait_timeout`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full duration passed
    Elapsed,
    /// `cancel()` was called before the duration passed
    Cancelled,
}

/// A cloneable, sticky cancellation flag.
///
/// Any clone can cancel; every waiter on every clone wakes up. Once
/// cancelled, a token stays cancelled.
///
/// # Examples
///
/// ```
/// use pinky::{CancelToken, WaitOutcome};
/// use std::time::Duration;
///
/// let token = CancelToken::new();
/// let remote = token.clone();
/// std::thread::spawn(move || remote.cancel());
///
/// // Returns well before the minute is up
/// assert_eq!(token.wait_timeout(Duration::from_secs(60)), WaitOutcome::Cancelled);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token cancelled and wakes all waiters.
    pub fn cancel(&self) {
        let (flag, wake) = &*self.inner;
        *flag.lock().unwrap_or_else(PoisonError::into_inner) = true;
        wake.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks for `timeout` or until the token is cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> WaitOutcome {
        let (flag, wake) = &*self.inner;
        let guard = flag.lock().unwrap_or_else(PoisonError::into_inner);
        let (cancelled, _) = wake
            .wait_timeout_while(guard, timeout, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);
        if *cancelled {
            WaitOutcome::Cancelled
        } else {
            WaitOutcome::Elapsed
        }
    }
}

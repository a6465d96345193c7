use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

/// A busy flag in watched state, shared by every operation that raises it.
///
/// The flag stays up while at least one guard is alive, so overlapping
/// operations never lower it for each other.
pub(crate) struct Flag<T> {
    pending: AtomicUsize,
    set: fn(&mut T, bool),
}

impl<T> Flag<T> {
    pub(crate) const fn new(set: fn(&mut T, bool)) -> Self {
        Self {
            pending: AtomicUsize::new(0),
            set,
        }
    }

    pub(crate) fn raise<'a>(&'a self, state: &'a watch::Sender<T>) -> FlagGuard<'a, T> {
        state.send_modify(|s| {
            self.pending.fetch_add(1, Ordering::SeqCst);
            (self.set)(s, true);
        });
        FlagGuard { flag: self, state }
    }
}

/// Releases one hold on a [`Flag`] when dropped.
///
/// Dropping covers every way out of an operation: normal return, early
/// return, panic, and the caller dropping the future mid-await.
pub(crate) struct FlagGuard<'a, T> {
    flag: &'a Flag<T>,
    state: &'a watch::Sender<T>,
}

impl<T> Drop for FlagGuard<'_, T> {
    fn drop(&mut self) {
        let flag = self.flag;
        self.state.send_modify(|s| {
            if flag.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
                (flag.set)(s, false);
            }
        });
    }
}

// ── State subscriptions ──
//
// Read-only handles onto one published state container.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A subscription to one state container.
///
/// Provides point-in-time snapshot access and change notification via
/// [`changed()`](Self::changed) or by converting into a `Stream`.
pub struct StateStream<T: Clone + Send + Sync + 'static> {
    current: T,
    receiver: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> StateStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<T>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation or at the last `changed()`.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// The latest snapshot (may have changed since `current`).
    pub fn latest(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` once the controller has been dropped.
    pub async fn changed(&mut self) -> Option<T> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` that yields the current value first, then
    /// every subsequent change.
    pub fn into_stream(self) -> StateWatchStream<T> {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct StateWatchStream<T: Clone + Send + Sync + 'static> {
    inner: WatchStream<T>,
}

impl<T: Clone + Send + Sync + 'static> Stream for StateWatchStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready, task};

    #[test]
    fn changed_waits_for_a_send() {
        let (tx, rx) = watch::channel(0_u32);
        let mut stream = StateStream::new(rx);
        assert_eq!(*stream.current(), 0);

        let mut next = task::spawn(stream.changed());
        assert_pending!(next.poll());

        tx.send_replace(7);
        assert!(next.is_woken());
        assert_eq!(assert_ready!(next.poll()), Some(7));
        drop(next);
        assert_eq!(*stream.current(), 7);
    }

    #[test]
    fn changed_ends_with_the_sender() {
        let (tx, rx) = watch::channel("a");
        let mut stream = StateStream::new(rx);
        drop(tx);

        let mut next = task::spawn(stream.changed());
        assert_eq!(assert_ready!(next.poll()), None);
        drop(next);
        assert_eq!(stream.latest(), "a");
    }
}

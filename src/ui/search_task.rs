use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::booking::Snapshot;

/// Handle to a scheduled search completion.
///
/// The search itself is a fixed delay standing in for backend latency. The
/// timer thread waits on a cancellation channel: a message, or the handle
/// being dropped, stops it before it delivers the snapshot, so no completion
/// can fire after the form that scheduled it is gone.
pub(crate) struct DelayedSearch {
    cancel_tx: Sender<()>,
    done_rx: Receiver<Snapshot>,
}

impl DelayedSearch {
    /// Deliver `snapshot` once `delay` has elapsed, unless cancelled first.
    pub(crate) fn schedule(snapshot: Snapshot, delay: Duration) -> Self {
        let (cancel_tx, cancel_rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel();

        thread::spawn(move || match cancel_rx.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => {
                let _ = done_tx.send(snapshot);
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
        });

        Self { cancel_tx, done_rx }
    }

    /// The completed snapshot, if the delay has elapsed.
    pub(crate) fn try_finish(&self) -> Option<Snapshot> {
        self.done_rx.try_recv().ok()
    }

    /// Stop the timer without waiting for it.
    pub(crate) fn cancel(&self) {
        let _ = self.cancel_tx.send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingQuery;
    use std::time::Instant;

    fn snapshot() -> Snapshot {
        Snapshot::new(BookingQuery::default())
    }

    #[test]
    fn delivers_the_snapshot_after_the_delay() {
        let search = DelayedSearch::schedule(snapshot(), Duration::from_millis(10));
        let deadline = Instant::now() + Duration::from_secs(1);
        loop {
            if let Some(done) = search.try_finish() {
                assert_eq!(done.query(), &BookingQuery::default());
                break;
            }
            assert!(Instant::now() < deadline, "search never completed");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn nothing_is_delivered_before_the_delay() {
        let search = DelayedSearch::schedule(snapshot(), Duration::from_secs(30));
        assert!(search.try_finish().is_none());
    }

    #[test]
    fn cancel_stops_a_pending_search() {
        let search = DelayedSearch::schedule(snapshot(), Duration::from_millis(20));
        search.cancel();
        thread::sleep(Duration::from_millis(80));
        assert!(search.try_finish().is_none());
    }

    #[test]
    fn dropping_the_handle_cancels_too() {
        let search = DelayedSearch::schedule(snapshot(), Duration::from_millis(20));
        let done_rx = search.done_rx;
        drop(search.cancel_tx);
        assert!(matches!(
            done_rx.recv_timeout(Duration::from_millis(500)),
            Err(RecvTimeoutError::Disconnected)
        ));
    }
}

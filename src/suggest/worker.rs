use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::warn;

use super::{Side, SuggestError, SuggestSource};
use crate::booking::Airport;

/// Commands understood by the background fetch worker.
#[derive(Debug)]
pub enum FetchCommand {
    /// Fetch candidates for one side of the form.
    Fetch {
        /// Identifier correlating the reply with the originating request.
        id: u64,
        /// Which autocomplete side asked.
        side: Side,
        /// Free text as currently typed.
        term: String,
    },
    /// Stop the background worker thread.
    Shutdown,
}

/// Reply emitted back to the UI layer.
#[derive(Debug)]
pub struct FetchReply {
    /// Identifier matching the [`FetchCommand::Fetch`] that produced this.
    pub id: u64,
    /// Side the candidates belong to.
    pub side: Side,
    /// Candidates, or the error to surface for this side.
    pub outcome: Result<Vec<Airport>, SuggestError>,
}

/// Newest request id per side, shared between the UI and the worker.
///
/// The UI stores its side's id before sending a fetch; the worker consults
/// it to skip requests that are already superseded and to drop replies that
/// lost the race while in flight. The UI re-checks on receipt, so a reply is
/// applied exactly when it carries the side's newest id.
#[derive(Debug, Default)]
pub struct LatestIds {
    origin: AtomicU64,
    destination: AtomicU64,
}

impl LatestIds {
    /// Record `id` as the newest request for `side`.
    pub fn store(&self, side: Side, id: u64) {
        self.cell(side).store(id, AtomicOrdering::Release);
    }

    /// The newest request id recorded for `side`.
    pub fn load(&self, side: Side) -> u64 {
        self.cell(side).load(AtomicOrdering::Acquire)
    }

    fn cell(&self, side: Side) -> &AtomicU64 {
        match side {
            Side::Origin => &self.origin,
            Side::Destination => &self.destination,
        }
    }
}

/// Launch the background fetch worker and return its communication channels.
pub fn spawn<S: SuggestSource>(source: S) -> (Sender<FetchCommand>, Receiver<FetchReply>, Arc<LatestIds>) {
    let (command_tx, command_rx) = mpsc::channel();
    let (reply_tx, reply_rx) = mpsc::channel();
    let latest = Arc::new(LatestIds::default());
    let thread_latest = Arc::clone(&latest);

    thread::spawn(move || worker_loop(&source, command_rx, reply_tx, &thread_latest));

    (command_tx, reply_rx, latest)
}

fn worker_loop(
    source: &impl SuggestSource,
    command_rx: Receiver<FetchCommand>,
    reply_tx: Sender<FetchReply>,
    latest: &LatestIds,
) {
    while let Ok(command) = command_rx.recv() {
        if !handle_command(source, &reply_tx, latest, command) {
            break;
        }
    }
}

fn handle_command(
    source: &impl SuggestSource,
    reply_tx: &Sender<FetchReply>,
    latest: &LatestIds,
    command: FetchCommand,
) -> bool {
    match command {
        FetchCommand::Fetch { id, side, term } => {
            if latest.load(side) != id {
                // A newer request for this side is already queued.
                return true;
            }
            let outcome = source.search(&term);
            if let Err(error) = &outcome {
                warn!(side = side.as_str(), term = %term, %error, "suggestion fetch failed");
            }
            if latest.load(side) != id {
                // Superseded while in flight; the reply must not be applied.
                return true;
            }
            reply_tx.send(FetchReply { id, side, outcome }).is_ok()
        }
        FetchCommand::Shutdown => false,
    }
}

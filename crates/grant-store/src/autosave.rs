//! Debounced autosave
//!
//! Every draft change is handed to [`Autosaver::schedule`]. In debounced mode
//! a background task holds the latest draft and writes it once no new change
//! has arrived for the quiet period; each change restarts the timer, so a
//! burst of edits costs one write of the final state.

use crate::draft_store::DraftStore;
use grant_model::SubmissionDraft;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Quiet period used when none is configured
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(400);

#[derive(Debug)]
enum Command {
    Schedule(Box<SubmissionDraft>),
    Discard,
    Flush(oneshot::Sender<()>),
}

#[derive(Debug)]
enum Mode {
    Immediate(DraftStore),
    Debounced {
        tx: mpsc::UnboundedSender<Command>,
        task: JoinHandle<()>,
    },
}

/// Writes draft changes to a [`DraftStore`], coalescing bursts
///
/// Dropping the autosaver closes its channel; the background task still
/// writes whatever change was pending before it exits.
#[derive(Debug)]
pub struct Autosaver {
    mode: Mode,
}

impl Autosaver {
    /// Start an autosaver with the given quiet period
    ///
    /// A zero period, or no tokio runtime on the current thread, gives an
    /// autosaver that writes synchronously on every change.
    #[must_use]
    pub fn spawn(store: DraftStore, quiet_period: Duration) -> Self {
        if quiet_period.is_zero() {
            return Self::immediate(store);
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let (tx, rx) = mpsc::unbounded_channel();
                let task = handle.spawn(run(store, quiet_period, rx));
                Self {
                    mode: Mode::Debounced { tx, task },
                }
            }
            Err(_) => {
                tracing::warn!("no async runtime available, autosave writes synchronously");
                Self::immediate(store)
            }
        }
    }

    /// Autosaver that writes on every change
    #[inline]
    #[must_use]
    pub fn immediate(store: DraftStore) -> Self {
        Self {
            mode: Mode::Immediate(store),
        }
    }

    /// Check if writes are coalesced by a background task
    #[inline]
    #[must_use]
    pub fn is_debounced(&self) -> bool {
        matches!(self.mode, Mode::Debounced { .. })
    }

    /// Record a change; the latest scheduled draft wins
    pub fn schedule(&self, draft: &SubmissionDraft) {
        match &self.mode {
            Mode::Immediate(store) => write(store, draft),
            Mode::Debounced { tx, .. } => {
                if tx.send(Command::Schedule(Box::new(draft.clone()))).is_err() {
                    tracing::warn!("autosave task stopped, change not persisted");
                } else {
                    tracing::trace!("autosave scheduled");
                }
            }
        }
    }

    /// Drop a pending change without writing it
    pub fn discard_pending(&self) {
        if let Mode::Debounced { tx, .. } = &self.mode {
            let _ = tx.send(Command::Discard);
        }
    }

    /// Write the pending change now, if there is one
    pub async fn flush(&self) {
        if let Mode::Debounced { tx, .. } = &self.mode {
            let (ack, done) = oneshot::channel();
            if tx.send(Command::Flush(ack)).is_ok() {
                let _ = done.await;
            }
        }
    }

    /// Write the pending change and stop the background task
    pub async fn shutdown(self) {
        if let Mode::Debounced { tx, task } = self.mode {
            drop(tx);
            if let Err(err) = task.await {
                tracing::warn!(error = %err, "autosave task ended abnormally");
            }
        }
    }
}

async fn run(store: DraftStore, quiet_period: Duration, mut rx: mpsc::UnboundedReceiver<Command>) {
    let mut pending: Option<Box<SubmissionDraft>> = None;
    loop {
        let command = if pending.is_some() {
            match tokio::time::timeout(quiet_period, rx.recv()).await {
                Ok(command) => command,
                Err(_) => {
                    if let Some(draft) = pending.take() {
                        write(&store, &draft);
                    }
                    continue;
                }
            }
        } else {
            rx.recv().await
        };

        match command {
            Some(Command::Schedule(draft)) => pending = Some(draft),
            Some(Command::Discard) => pending = None,
            Some(Command::Flush(ack)) => {
                if let Some(draft) = pending.take() {
                    write(&store, &draft);
                }
                let _ = ack.send(());
            }
            None => {
                if let Some(draft) = pending.take() {
                    write(&store, &draft);
                }
                break;
            }
        }
    }
}

fn write(store: &DraftStore, draft: &SubmissionDraft) {
    if let Err(err) = store.save_draft(draft) {
        tracing::warn!(error = %err, "autosave write failed, draft kept in memory");
    }
}

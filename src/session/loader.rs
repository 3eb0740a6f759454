use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;
use tracing::{
    debug,
    warn,
};
use uuid::Uuid;

use super::{
    sampler,
    state::ReviewSession,
};
use crate::{
    api::KanjiApiClient,
    core::{
        KanfudaError,
        SessionConfig,
    },
};

pub type SessionId = Uuid;

/// Completion message posted by a background load, tagged with the session
/// it belongs to.
#[derive(Debug)]
pub enum LoaderEvent {
    SessionLoaded { session_id: SessionId, outcome: Result<ReviewSession, KanfudaError> },
}

/// Runs the fetch+sample pipeline off-thread and hands finished sessions to a
/// synchronous front-end. Only the most recent `begin` counts: results from
/// superseded or abandoned loads are dropped on arrival, so a late response
/// can never overwrite a newer session.
pub struct SessionLoader {
    runtime: Arc<Runtime>,
    sender: mpsc::Sender<LoaderEvent>,
    receiver: mpsc::Receiver<LoaderEvent>,
    current: Option<SessionId>,
}

impl SessionLoader {
    pub fn new() -> Result<Self, KanfudaError> {
        let runtime = Arc::new(Runtime::new()?);
        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, sender, receiver, current: None })
    }

    /// Start loading a session. Supersedes any load still in flight; retry
    /// after a failure is simply another `begin` with the same config.
    pub fn begin(&mut self, client: Arc<KanjiApiClient>, config: SessionConfig) -> SessionId {
        let session_id = Uuid::new_v4();
        self.current = Some(session_id);

        let sender = self.sender.clone();
        let runtime = self.runtime.clone();

        thread::spawn(move || {
            let outcome = runtime.block_on(async {
                let candidates =
                    client.fetch_candidates(config.mode, config.difficulty).await?;
                let cards = sampler::sample(candidates, &config, &mut rand::rng());
                ReviewSession::new(config, cards)
            });

            // The receiver may be gone if the whole loader was dropped.
            let _ = sender.send(LoaderEvent::SessionLoaded { session_id, outcome });
        });

        debug!(%session_id, mode = %config.mode, "session load started");
        session_id
    }

    /// Drop interest in the in-flight load; its result will be discarded.
    pub fn abandon(&mut self) {
        self.current = None;
    }

    /// Non-blocking: the finished current load, if any. Stale results are
    /// drained and dropped along the way.
    pub fn poll(&mut self) -> Option<Result<ReviewSession, KanfudaError>> {
        while let Ok(event) = self.receiver.try_recv() {
            if let Some(outcome) = self.accept(event) {
                return Some(outcome);
            }
        }
        None
    }

    /// Blocking variant for front-ends with nothing else to do during
    /// `Loading`. Returns `None` when no load is in flight.
    pub fn wait(&mut self) -> Option<Result<ReviewSession, KanfudaError>> {
        self.current?;

        while let Ok(event) = self.receiver.recv() {
            if let Some(outcome) = self.accept(event) {
                return Some(outcome);
            }
        }
        None
    }

    fn accept(&mut self, event: LoaderEvent) -> Option<Result<ReviewSession, KanfudaError>> {
        let LoaderEvent::SessionLoaded { session_id, outcome } = event;
        if self.current == Some(session_id) {
            self.current = None;
            Some(outcome)
        } else {
            warn!(%session_id, "dropping result for a superseded session");
            None
        }
    }
}

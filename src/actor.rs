//! Async host for a `SpinSession`.
//!
//! UI events may fire in quick succession. Routing them through one task that owns
//! the session means two spins can never be processed concurrently: each event is
//! handled to completion, including any step transition, before the next is read.

use crate::engine::{Effect, EventId, RunEvent, SpinSession};
use crate::error::ActorError;
use crate::sequence::{HistorySnapshot, SpinResult, StepId};
use tokio::sync::{mpsc, oneshot};

const QUEUE_CAPACITY: usize = 64;

enum Command {
    Dispatch(RunEvent, oneshot::Sender<Vec<Effect>>),
    RecordSpin(StepId, SpinResult, oneshot::Sender<Vec<Effect>>),
    IssueEventId(oneshot::Sender<EventId>),
    Snapshot(oneshot::Sender<HistorySnapshot>),
}

/// Cloneable handle to a session running on its own task.
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<Command>,
}

/// Moves `session` onto a new task. Must be called inside a tokio runtime.
pub fn spawn(session: SpinSession) -> SessionHandle {
    let (sender, receiver) = mpsc::channel(QUEUE_CAPACITY);
    tokio::spawn(run(session, receiver));
    SessionHandle { sender }
}

async fn run(mut session: SpinSession, mut receiver: mpsc::Receiver<Command>) {
    while let Some(command) = receiver.recv().await {
        // A dropped reply channel only means the caller stopped waiting.
        match command {
            Command::Dispatch(event, reply) => {
                let _ = reply.send(session.dispatch(event));
            }
            Command::RecordSpin(step_id, outcome, reply) => {
                let _ = reply.send(session.record_spin(step_id, outcome));
            }
            Command::IssueEventId(reply) => {
                let _ = reply.send(session.issue_event_id());
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(session.snapshot());
            }
        }
    }
    log::debug!("Session actor stopped");
}

impl SessionHandle {
    pub async fn dispatch(&self, event: RunEvent) -> Result<Vec<Effect>, ActorError> {
        self.request(|reply| Command::Dispatch(event, reply)).await
    }

    /// Records an outcome spun for `step_id`. See `SpinSession::record_spin`.
    pub async fn record_spin(
        &self,
        step_id: impl Into<StepId>,
        outcome: SpinResult,
    ) -> Result<Vec<Effect>, ActorError> {
        let step_id = step_id.into();
        self.request(|reply| Command::RecordSpin(step_id, outcome, reply))
            .await
    }

    pub async fn issue_event_id(&self) -> Result<EventId, ActorError> {
        self.request(Command::IssueEventId).await
    }

    pub async fn snapshot(&self) -> Result<HistorySnapshot, ActorError> {
        self.request(Command::Snapshot).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, ActorError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(command(reply))
            .await
            .map_err(|_| ActorError::SessionClosed)?;
        response.await.map_err(|_| ActorError::SessionClosed)
    }
}

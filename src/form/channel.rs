//! Submission channel: carries form payloads to a backend and brings the
//! resolutions back to the UI loop.
//!
//! Backends run on a blocking worker so the UI keeps drawing while a
//! submission is outstanding. Resolutions queue up until the event loop
//! drains them with [`SubmissionChannel::try_next`].

use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::errors::ErrorMap;
use super::store::{FormState, Ticket};
use crate::routes::Method;

/// How a backend resolved a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected(ErrorMap),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Converts to the shape [`FormStore::complete`](super::FormStore::complete) takes.
    pub fn into_result(self) -> Result<(), ErrorMap> {
        match self {
            Self::Accepted => Ok(()),
            Self::Rejected(errors) => Err(errors),
        }
    }
}

/// A payload addressed to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub endpoint: String,
    pub method: Method,
    pub payload: FormState,
}

impl Request {
    pub fn new(endpoint: impl Into<String>, method: Method, payload: FormState) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            payload,
        }
    }
}

/// The remote side of a submission.
///
/// Transport or storage failures must come back as a rejection with no field
/// attribution (see [`ErrorMap::general`]).
pub trait Backend: Send + Sync {
    fn submit(&self, request: &Request) -> Outcome;
}

/// A resolution waiting to be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Outcome,
}

/// Dispatches requests to a [`Backend`] off the UI thread.
pub struct SubmissionChannel {
    runtime: Runtime,
    backend: Arc<dyn Backend>,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
    outstanding: usize,
}

impl SubmissionChannel {
    pub fn new(backend: Arc<dyn Backend>) -> std::io::Result<Self> {
        let runtime = Builder::new_current_thread().build()?;
        let (tx, rx) = unbounded_channel();
        Ok(Self {
            runtime,
            backend,
            tx,
            rx,
            outstanding: 0,
        })
    }

    /// Sends `request`; its resolution is later returned by
    /// [`try_next`](Self::try_next) tagged with `ticket`. No retries.
    pub fn send(&mut self, ticket: Ticket, request: Request) {
        tracing::info!(
            ticket = ticket.id(),
            method = %request.method,
            endpoint = %request.endpoint,
            "dispatching submission"
        );
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        self.outstanding += 1;
        self.runtime.spawn_blocking(move || {
            let outcome = backend.submit(&request);
            // The receiver lives as long as the channel; a send error means
            // the app is shutting down.
            let _ = tx.send(Completion { ticket, outcome });
        });
    }

    /// Returns the next resolution, if one has arrived.
    pub fn try_next(&mut self) -> Option<Completion> {
        let completion = self.rx.try_recv().ok()?;
        self.outstanding = self.outstanding.saturating_sub(1);
        tracing::debug!(ticket = completion.ticket.id(), "submission resolved");
        Some(completion)
    }

    /// Blocks until the next resolution arrives. Returns `None` if nothing is
    /// outstanding.
    pub fn wait_next(&mut self) -> Option<Completion> {
        if self.outstanding == 0 {
            return None;
        }
        let completion = self.rx.blocking_recv()?;
        self.outstanding = self.outstanding.saturating_sub(1);
        Some(completion)
    }

    /// Number of submissions sent but not yet drained.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }
}

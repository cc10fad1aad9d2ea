//! Background dispatch queue
//!
//! One worker thread drains an unbounded queue and runs each request
//! through the shared performer. Submitting never blocks. Every accepted
//! request runs to completion, including the ones still queued when the
//! dispatcher shuts down.

use crate::error::{DispatchError, Result};
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use hectic_core::{FeedbackKind, FeedbackPerformer, Outcome};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// Queued request
#[derive(Debug, Clone, Copy)]
enum Request {
    Perform(FeedbackKind),
    WaitAndPerform(FeedbackKind),
}

struct Job {
    request: Request,
    reply: Sender<Outcome>,
}

/// Handle to a submitted request
///
/// Dropping it is fine: the request still runs, the outcome is discarded.
#[derive(Debug)]
pub struct Completion {
    rx: Receiver<Outcome>,
}

impl Completion {
    /// Block until the request has triggered
    pub fn wait(self) -> Result<Outcome> {
        self.rx.recv().map_err(|_| DispatchError::WorkerLost)
    }

    /// Block up to `timeout`; `Ok(None)` if it has not run yet
    pub fn wait_timeout(&self, timeout: Duration) -> Result<Option<Outcome>> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Ok(Some(outcome)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(DispatchError::WorkerLost),
        }
    }

    /// Non-blocking check
    pub fn try_outcome(&self) -> Result<Option<Outcome>> {
        match self.rx.try_recv() {
            Ok(outcome) => Ok(Some(outcome)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(DispatchError::WorkerLost),
        }
    }
}

/// Runs feedback requests on a background worker
pub struct FeedbackDispatcher {
    performer: Arc<FeedbackPerformer>,
    /// None once shut down
    tx: Mutex<Option<Sender<Job>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    pending: Arc<AtomicUsize>,
}

impl FeedbackDispatcher {
    /// Start the worker thread for `performer`
    pub fn new(performer: Arc<FeedbackPerformer>) -> Result<Self> {
        let (tx, rx) = unbounded::<Job>();
        let pending = Arc::new(AtomicUsize::new(0));

        let worker = {
            let performer = performer.clone();
            let pending = pending.clone();
            std::thread::Builder::new()
                .name("hectic-dispatch".to_string())
                .spawn(move || run_worker(performer, rx, pending))
                .map_err(DispatchError::Spawn)?
        };

        Ok(Self {
            performer,
            tx: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
            pending,
        })
    }

    /// The performer requests are run through
    pub fn performer(&self) -> &Arc<FeedbackPerformer> {
        &self.performer
    }

    /// Queue a `perform` without blocking
    pub fn request_perform(&self, kind: FeedbackKind) -> Result<Completion> {
        self.submit(Request::Perform(kind))
    }

    /// Queue a `wait_and_perform` without blocking
    pub fn request_wait_and_perform(&self, kind: FeedbackKind) -> Result<Completion> {
        self.submit(Request::WaitAndPerform(kind))
    }

    /// Requests accepted but not yet finished
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Whether `shutdown` has been called
    pub fn is_shut_down(&self) -> bool {
        self.tx.lock().is_none()
    }

    /// Stop accepting requests, let the queue drain, and join the worker
    pub fn shutdown(&self) -> Result<()> {
        // Dropping the last sender ends the worker loop after the backlog
        let tx = self.tx.lock().take();
        drop(tx);

        let worker = self.worker.lock().take();
        if let Some(worker) = worker {
            debug!("Waiting for feedback worker to drain {} request(s)", self.pending());
            worker.join().map_err(|_| DispatchError::WorkerLost)?;
        }
        Ok(())
    }

    fn submit(&self, request: Request) -> Result<Completion> {
        let (reply, rx) = bounded(1);

        let guard = self.tx.lock();
        let tx = guard.as_ref().ok_or(DispatchError::Closed)?;

        self.pending.fetch_add(1, Ordering::SeqCst);
        if tx.send(Job { request, reply }).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            return Err(DispatchError::Closed);
        }

        Ok(Completion { rx })
    }
}

impl Drop for FeedbackDispatcher {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("Feedback worker did not shut down cleanly: {}", e);
        }
    }
}

impl std::fmt::Debug for FeedbackDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackDispatcher")
            .field("pending", &self.pending())
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

fn run_worker(performer: Arc<FeedbackPerformer>, rx: Receiver<Job>, pending: Arc<AtomicUsize>) {
    debug!("Feedback worker started");

    for job in rx.iter() {
        let outcome = match job.request {
            Request::Perform(kind) => performer.perform(kind),
            Request::WaitAndPerform(kind) => performer.wait_and_perform(kind),
        };
        pending.fetch_sub(1, Ordering::SeqCst);

        // Caller may have dropped its completion handle
        let _ = job.reply.send(outcome);
    }

    debug!("Feedback worker stopped");
}

//! Completion delivery on a single designated context
//!
//! Requests run on the tokio runtime, but their completion handlers run on
//! one [`CallbackLoop`], one at a time, in the order results arrived. A
//! [`Completion`] is consumed when it delivers, so a request can complete at
//! most once; dropping one undelivered reports an error instead.

use beagle_domain::ApiError;
use tokio::sync::mpsc;
use tracing::{debug, warn};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Create a connected dispatcher and loop.
pub fn callback_channel() -> (CallbackDispatcher, CallbackLoop) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (CallbackDispatcher { sender }, CallbackLoop { receiver })
}

/// Sending half: hands work to the callback loop.
#[derive(Clone)]
pub struct CallbackDispatcher {
    sender: mpsc::UnboundedSender<Job>,
}

impl CallbackDispatcher {
    /// Queue `job` on the loop. Returns `false` once the loop is gone.
    pub fn dispatch<F>(&self, job: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let sent = self.sender.send(Box::new(job)).is_ok();
        if !sent {
            warn!("Callback loop has shut down, dropping completion");
        }
        sent
    }

    /// Wrap `handler` so it runs on the loop with the request's result.
    pub fn completion<T, F>(&self, handler: F) -> Completion<T>
    where
        T: Send + 'static,
        F: FnOnce(Result<T, ApiError>) + Send + 'static,
    {
        Completion { dispatcher: self.clone(), handler: Some(Box::new(handler)) }
    }
}

/// Receiving half: runs queued handlers one after another.
pub struct CallbackLoop {
    receiver: mpsc::UnboundedReceiver<Job>,
}

impl CallbackLoop {
    /// Run handlers until every dispatcher has been dropped.
    pub async fn run(mut self) {
        while let Some(job) = self.receiver.recv().await {
            job();
        }
        debug!("Callback loop finished");
    }

    /// Run every handler queued so far without waiting for more.
    ///
    /// For hosts that already have their own tick, such as a game client
    /// thread.
    pub fn drain(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.receiver.try_recv() {
            job();
            ran += 1;
        }
        ran
    }
}

/// One-shot result slot for a single logical request.
pub struct Completion<T: Send + 'static> {
    dispatcher: CallbackDispatcher,
    handler: Option<Box<dyn FnOnce(Result<T, ApiError>) + Send>>,
}

impl<T: Send + 'static> Completion<T> {
    pub fn complete(mut self, result: Result<T, ApiError>) {
        self.deliver(result);
    }

    pub fn succeed(self, value: T) {
        self.complete(Ok(value));
    }

    pub fn fail(self, err: ApiError) {
        self.complete(Err(err));
    }

    fn deliver(&mut self, result: Result<T, ApiError>) {
        if let Some(handler) = self.handler.take() {
            self.dispatcher.dispatch(move || handler(result));
        }
    }
}

impl<T: Send + 'static> Drop for Completion<T> {
    fn drop(&mut self) {
        if self.handler.is_some() {
            warn!("Request was abandoned before completing");
            self.deliver(Err(ApiError::transport("request abandoned before completion")));
        }
    }
}

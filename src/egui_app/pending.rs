//! Background gateway calls.
//!
//! Gateway methods block, so each call runs on its own worker thread and
//! reports back over a channel. The UI checks the channel once per frame.

use std::sync::mpsc::{channel, Receiver, TryRecvError};

use crate::shared::error::GatewayError;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// A gateway call running on a worker thread
pub struct PendingCall<T> {
    rx: Receiver<GatewayResult<T>>,
}

impl<T: Send + 'static> PendingCall<T> {
    /// Run `call` on a new thread
    pub fn spawn<F>(call: F) -> Self
    where
        F: FnOnce() -> GatewayResult<T> + Send + 'static,
    {
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(call());
        });
        Self { rx }
    }
}

impl<T> PendingCall<T> {
    /// Non-blocking check. `None` while the call is still running.
    pub fn try_take(&self) -> Option<GatewayResult<T>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(worker_lost())),
        }
    }

    /// Block until the call finishes.
    pub fn wait(&self) -> GatewayResult<T> {
        self.rx.recv().unwrap_or_else(|_| Err(worker_lost()))
    }
}

// The worker thread panicked before sending.
fn worker_lost() -> GatewayError {
    GatewayError::transient("background request ended unexpectedly")
}

//! Asynchronous single-shot mesh delivery.
//!
//! Mesh loading runs on a worker thread so the event loop never blocks on
//! it; completion is delivered through a channel the loop polls each turn.
//! A successful load is the sole trigger for the particle system's
//! `Unready -> Ready` transition and the first buffer build. A failed load
//! is logged by the caller and leaves the scene empty; it is never fatal.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::MeshError;
use crate::mesh::TriangleMesh;

/// Handle to an in-flight mesh load.
pub struct MeshLoader {
    rx: Receiver<Result<TriangleMesh, MeshError>>,
}

impl MeshLoader {
    /// Run `load` on a background thread and return a pollable handle.
    pub fn spawn<F>(load: F) -> Self
    where
        F: FnOnce() -> Result<TriangleMesh, MeshError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The receiver may be gone if the app shut down mid-load.
            let _ = tx.send(load());
        });
        Self { rx }
    }

    /// Check for a completed load without blocking.
    ///
    /// Returns `Some` exactly once; afterwards the loader is spent.
    pub fn poll(&self) -> Option<Result<TriangleMesh, MeshError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

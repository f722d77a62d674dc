//! Lazily initialized, shared OCR engine.
//!
//! Engine start-up is slow (loading language data), so the engine is created
//! on first use and then shared. The holder guarantees at most one
//! initialization runs at a time: callers arriving while it is in flight wait
//! for it and receive the same engine. A failed initialization leaves the
//! holder empty, and the next caller tries again.

use super::OcrEngine;
use crate::error::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Owner of the process-wide engine instance.
pub struct EngineHolder<E> {
    slot: Mutex<Option<Arc<E>>>,
}

impl<E> Default for EngineHolder<E> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<E: OcrEngine> EngineHolder<E> {
    /// Create an empty holder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the engine, running `init` if there is none yet.
    ///
    /// The slot stays locked while `init` runs, so concurrent callers block
    /// until it finishes and then share its result.
    pub fn get_or_init<F>(&self, init: F) -> Result<Arc<E>>
    where
        F: FnOnce() -> Result<E>,
    {
        let mut slot = self.lock();
        if let Some(engine) = slot.as_ref() {
            return Ok(Arc::clone(engine));
        }

        log::info!("Initializing OCR engine");
        let engine = match init() {
            Ok(engine) => Arc::new(engine),
            Err(e) => {
                log::error!("Error initializing OCR engine: {}", e);
                return Err(e);
            },
        };
        *slot = Some(Arc::clone(&engine));
        Ok(engine)
    }

    /// The engine, if one is initialized.
    pub fn current(&self) -> Option<Arc<E>> {
        self.lock().clone()
    }

    /// Tear down the engine. Returns false when there was none.
    ///
    /// Callers still holding the engine keep a working handle; the next
    /// [`EngineHolder::get_or_init`] creates a fresh one.
    pub fn terminate(&self) -> bool {
        let engine = self.lock().take();
        match engine {
            Some(engine) => {
                log::info!("Terminating OCR engine");
                engine.terminate();
                true
            },
            None => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<E>>> {
        // a panicking initializer never stores an engine, so the slot is still valid
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

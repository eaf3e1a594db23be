//! Ctrl+C handling and the pipeline's cancellation flag.
//!
//! The pipeline takes an `Arc<AtomicBool>` and checks it before every item
//! in every stage. [`ShutdownHandler`] owns that flag; [`install_handler`]
//! additionally sets it when the user presses Ctrl+C.
//!
//! # Usage
//!
//! ```rust,no_run
//! use foldersweep::signal::install_handler;
//!
//! let handler = install_handler().expect("Failed to install signal handler");
//! let cancel = handler.flag();
//! // pass `cancel` to foldersweep::pipeline::run
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared cancellation flag for a cleanup run.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no shutdown requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every pipeline stage to stop at its next item.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// The flag to hand to [`crate::pipeline::run`].
    #[must_use]
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Clear the flag so the handler can serve another run.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install the process-wide Ctrl+C hook and return its handler.
///
/// `ctrlc` accepts a single hook per process, so later calls return the
/// already-installed handler with its flag cleared for the new run.
///
/// # Errors
///
/// Returns `SignalError` if the hook cannot be registered.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = GLOBAL_HANDLER.get_or_init(ShutdownHandler::new).clone();
    let flag = handler.flag();

    match ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        let _ = writeln!(std::io::stderr(), "\nInterrupted. Finishing current file...");
        let _ = std::io::stderr().flush();
        log::info!("Shutdown signal received");
    }) {
        Ok(()) => Ok(handler),
        // Another thread won the race and installed the same global flag.
        Err(ctrlc::Error::MultipleHandlers) => Ok(handler),
        Err(e) => Err(e.into()),
    }
}

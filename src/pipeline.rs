//! The scan, classify, execute, report pipeline.
//!
//! # Overview
//!
//! The scan runs synchronously on the calling thread. Classification and
//! execution then run on their own threads, connected by bounded
//! single-producer/single-consumer queues; reporting runs on the calling
//! thread and feeds the [`RunObserver`]. Each stage handles records one at a
//! time in scan order, so concurrency only exists between stages.
//!
//! ```text
//! scan ─► [files] ─► classify ─► (queue) ─► execute ─► (queue) ─► report
//! ```
//!
//! # Cancellation and failure
//!
//! Every stage checks the caller's cancellation flag before each item. A
//! stage that stops drops its sender, which closes the next queue, and a
//! stage whose consumer has gone away stops too. A hash or filesystem error
//! additionally raises an internal abort flag so upstream stages stop
//! producing, and the first such error becomes the result of the run.
//! Actions already applied stay applied.
//!
//! # Example
//!
//! ```no_run
//! use foldersweep::pipeline::{run, NoopObserver, RunOptions};
//! use foldersweep::record::RunMode;
//! use foldersweep::signal::ShutdownHandler;
//! use std::path::Path;
//!
//! let handler = ShutdownHandler::new();
//! let options = RunOptions::default().with_mode(RunMode::Delete).with_dry_run(true);
//! let summary = run(Path::new("/photos"), options, handler.flag(), &NoopObserver).unwrap();
//! println!("{} duplicates", summary.duplicates);
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::actions::{ExecuteStats, ExecutionError, Executor};
use crate::duplicates::{ClassifyStats, Classifier};
use crate::error::CleanupError;
use crate::record::{FileRecord, RunMode};
use crate::report::{describe_action, RunSummary};
use crate::scanner::{scan, HashError, ScanOutcome, ScannedFile};

/// Default capacity of each inter-stage queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Parameters of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Disposition given to removable files
    pub mode: RunMode,
    /// Simulate actions without touching the filesystem
    pub dry_run: bool,
    /// Capacity of each inter-stage queue
    pub queue_capacity: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            mode: RunMode::Move,
            dry_run: false,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl RunOptions {
    #[must_use]
    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the queue capacity (at least 1).
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }
}

/// Receives pipeline output as it happens.
///
/// All calls are made from the thread that called [`run`], in scan order.
pub trait RunObserver: Send + Sync {
    /// Called once after the scan with the number of files to classify.
    fn on_start(&self, _total: usize) {}

    /// Called for each record that completed execution.
    fn on_record(&self, record: &FileRecord, description: &str);

    /// Called once with the final summary.
    fn on_finish(&self, _summary: &RunSummary) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {
    fn on_record(&self, _record: &FileRecord, _description: &str) {}
}

/// Caller cancellation plus internal abort on fatal errors.
#[derive(Debug, Clone)]
struct StopSignal {
    cancel: Arc<AtomicBool>,
    abort: Arc<AtomicBool>,
}

impl StopSignal {
    fn new(cancel: Arc<AtomicBool>) -> Self {
        Self {
            cancel,
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    fn is_stopped(&self) -> bool {
        self.is_cancelled() || self.abort.load(Ordering::SeqCst)
    }

    fn abort(&self) {
        self.abort.store(true, Ordering::SeqCst);
    }
}

/// Run the whole pipeline over `dir`.
///
/// # Errors
///
/// - `CleanupError::Scan` if the directory cannot be listed (nothing is run)
/// - `CleanupError::Hash` if a file cannot be read during classification
/// - `CleanupError::Execution` if a move or delete fails
/// - `CleanupError::Spawn` / `StagePanicked` for thread failures
///
/// Cancellation is not an error: the summary comes back with
/// `interrupted` set.
pub fn run(
    dir: &Path,
    options: RunOptions,
    cancel: Arc<AtomicBool>,
    observer: &dyn RunObserver,
) -> Result<RunSummary, CleanupError> {
    let ScanOutcome { files, stats: scan_stats } = scan(dir)?;
    let scanned = files.len();
    observer.on_start(scanned);

    let stop = StopSignal::new(cancel);
    let capacity = options.queue_capacity.max(1);
    let (classified_tx, classified_rx) = bounded::<FileRecord>(capacity);
    let (executed_tx, executed_rx) = bounded::<FileRecord>(capacity);

    log::debug!(
        "Starting pipeline: {} files, mode={}, dry_run={}, queue capacity {}",
        scanned,
        options.mode,
        options.dry_run,
        capacity
    );

    let classify_handle = {
        let stage_stop = stop.clone();
        spawn_stage("classify", move || {
            classify_stage(files, options.mode, &stage_stop, classified_tx)
        })?
    };

    let execute_handle = {
        let stage_stop = stop.clone();
        let spawned = spawn_stage("execute", move || {
            execute_stage(classified_rx, options.dry_run, &stage_stop, executed_tx)
        });
        match spawned {
            Ok(handle) => handle,
            Err(e) => {
                stop.abort();
                let _ = classify_handle.join();
                return Err(e);
            }
        }
    };

    let reported = report_stage(executed_rx, options.dry_run, &stop, observer);

    let classify_result = join_stage("classify", classify_handle)?;
    let execute_result = join_stage("execute", execute_handle)?;
    let classify_stats = classify_result?;
    let execute_stats = execute_result?;

    let mut summary = RunSummary::from_stages(scanned, scan_stats, classify_stats, execute_stats);
    summary.reported = reported;
    summary.dry_run = options.dry_run;
    summary.interrupted = stop.is_cancelled();

    if summary.interrupted {
        log::warn!("Run interrupted after {} of {} files", reported, scanned);
    } else {
        log::info!(
            "Run complete: {} evaluated, {} processed",
            summary.evaluated,
            summary.processed
        );
    }

    observer.on_finish(&summary);
    Ok(summary)
}

fn spawn_stage<T, F>(stage: &'static str, f: F) -> Result<JoinHandle<T>, CleanupError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    thread::Builder::new()
        .name(format!("foldersweep-{stage}"))
        .spawn(f)
        .map_err(|source| CleanupError::Spawn { stage, source })
}

fn join_stage<T>(stage: &'static str, handle: JoinHandle<T>) -> Result<T, CleanupError> {
    handle
        .join()
        .map_err(|_| CleanupError::StagePanicked(stage))
}

fn classify_stage(
    files: Vec<ScannedFile>,
    mode: RunMode,
    stop: &StopSignal,
    tx: Sender<FileRecord>,
) -> Result<ClassifyStats, HashError> {
    let mut classifier = Classifier::new(mode);
    for file in files {
        if stop.is_stopped() {
            log::debug!("classify: stop requested");
            break;
        }
        let record = classifier.classify(file).map_err(|e| {
            log::error!("classify: {}", e);
            stop.abort();
            e
        })?;
        if tx.send(record).is_err() {
            log::debug!("classify: downstream closed");
            break;
        }
    }
    Ok(classifier.into_stats())
}

fn execute_stage(
    rx: Receiver<FileRecord>,
    dry_run: bool,
    stop: &StopSignal,
    tx: Sender<FileRecord>,
) -> Result<ExecuteStats, ExecutionError> {
    let mut executor = Executor::new(dry_run);
    for record in rx.iter() {
        if stop.is_stopped() {
            log::debug!("execute: stop requested");
            break;
        }
        executor.execute(&record).map_err(|e| {
            log::error!("execute: {}", e);
            stop.abort();
            e
        })?;
        if tx.send(record).is_err() {
            log::debug!("execute: downstream closed");
            break;
        }
    }
    Ok(executor.into_stats())
}

/// Drain executed records into the observer; returns how many were reported.
fn report_stage(
    rx: Receiver<FileRecord>,
    dry_run: bool,
    stop: &StopSignal,
    observer: &dyn RunObserver,
) -> usize {
    let mut reported = 0;
    for record in rx.iter() {
        if stop.is_cancelled() {
            log::debug!("report: stop requested");
            break;
        }
        let description = describe_action(&record, dry_run);
        observer.on_record(&record, &description);
        reported += 1;
    }
    reported
}

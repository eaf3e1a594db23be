use foldersweep::actions::{ExecutionError, MOVED_DIR_NAME};
use foldersweep::error::CleanupError;
use foldersweep::pipeline::{run, NoopObserver, RunObserver, RunOptions};
use foldersweep::record::{Disposition, FileRecord, Reason, RunMode};
use foldersweep::report::RunSummary;
use foldersweep::scanner::HashError;
use foldersweep::signal::ShutdownHandler;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::tempdir;

/// Captures everything the pipeline reports.
#[derive(Default)]
struct Recorder {
    records: Mutex<Vec<(String, Disposition, Reason, PathBuf)>>,
    descriptions: Mutex<Vec<String>>,
}

impl RunObserver for Recorder {
    fn on_record(&self, record: &FileRecord, description: &str) {
        self.records.lock().unwrap().push((
            record.name().to_string(),
            record.disposition(),
            record.reason(),
            record.original_path().to_path_buf(),
        ));
        self.descriptions
            .lock()
            .unwrap()
            .push(description.to_string());
    }
}

/// Requests shutdown as soon as the first record is reported.
struct CancelAfterFirst {
    handler: ShutdownHandler,
    seen: Mutex<usize>,
}

impl RunObserver for CancelAfterFirst {
    fn on_record(&self, _record: &FileRecord, _description: &str) {
        *self.seen.lock().unwrap() += 1;
        self.handler.request_shutdown();
    }
}

/// Removes a file once the scan is done, before anything is hashed.
struct RemoveAfterScan(PathBuf);

impl RunObserver for RemoveAfterScan {
    fn on_start(&self, _total: usize) {
        fs::remove_file(&self.0).unwrap();
    }

    fn on_record(&self, _record: &FileRecord, _description: &str) {}
}

fn scenario(dir: &Path) {
    fs::write(dir.join("a.jpg"), [42u8; 100]).unwrap();
    fs::write(dir.join("bb.jpg"), [42u8; 100]).unwrap();
    fs::write(dir.join("c.jpg"), b"").unwrap();
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn run_in(dir: &Path, options: RunOptions, observer: &dyn RunObserver) -> RunSummary {
    run(dir, options, ShutdownHandler::new().flag(), observer).unwrap()
}

#[test]
fn test_scenario_move_mode() {
    let dir = tempdir().unwrap();
    scenario(dir.path());
    let recorder = Recorder::default();

    let summary = run_in(dir.path(), RunOptions::default(), &recorder);

    let records = recorder.records.lock().unwrap();
    assert_eq!(records.len(), 3);

    let a = records.iter().find(|r| r.0 == "a.jpg").unwrap();
    assert_eq!((a.1, a.2), (Disposition::Keep, Reason::None));

    let bb = records.iter().find(|r| r.0 == "bb.jpg").unwrap();
    assert_eq!((bb.1, bb.2), (Disposition::Move, Reason::Duplicate));
    assert_eq!(bb.3, dir.path().join("a.jpg"));

    let c = records.iter().find(|r| r.0 == "c.jpg").unwrap();
    assert_eq!((c.1, c.2), (Disposition::Move, Reason::ZeroByte));

    assert_eq!(summary.evaluated, 3);
    assert_eq!(summary.empty, 1);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.unique, 1);
    assert_eq!(summary.total_bytes, 200);
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.processed_bytes, 100);
    assert!(!summary.interrupted);

    assert_eq!(listing(dir.path()), vec!["a.jpg", MOVED_DIR_NAME]);
    assert_eq!(
        listing(&dir.path().join(MOVED_DIR_NAME)),
        vec!["bb.jpg", "c.jpg"]
    );
}

#[test]
fn test_scenario_delete_mode() {
    let dir = tempdir().unwrap();
    scenario(dir.path());

    let summary = run_in(
        dir.path(),
        RunOptions::default().with_mode(RunMode::Delete),
        &NoopObserver,
    );

    assert_eq!(summary.processed, 2);
    assert_eq!(listing(dir.path()), vec!["a.jpg"]);
}

#[test]
fn test_descriptions_reach_observer() {
    let dir = tempdir().unwrap();
    scenario(dir.path());
    let recorder = Recorder::default();

    run_in(
        dir.path(),
        RunOptions::default().with_mode(RunMode::Delete),
        &recorder,
    );

    let descriptions = recorder.descriptions.lock().unwrap();
    assert!(descriptions.contains(&"[keep] a.jpg [100 B]\n".to_string()));
    assert!(descriptions.contains(&"[delete] c.jpg [0 B]\n - Zero Bytes\n".to_string()));
    assert!(descriptions
        .iter()
        .any(|d| d.ends_with(" - Duplicate of a.jpg\n")));
}

#[test]
fn test_dry_run_matches_real_run_accounting() {
    let dry_dir = tempdir().unwrap();
    let real_dir = tempdir().unwrap();
    scenario(dry_dir.path());
    scenario(real_dir.path());
    let before = listing(dry_dir.path());

    let dry = run_in(
        dry_dir.path(),
        RunOptions::default().with_dry_run(true),
        &NoopObserver,
    );
    let real = run_in(real_dir.path(), RunOptions::default(), &NoopObserver);

    assert_eq!(listing(dry_dir.path()), before);
    assert!(!dry_dir.path().join(MOVED_DIR_NAME).exists());
    assert!(dry.dry_run);
    assert_eq!(dry.processed, real.processed);
    assert_eq!(dry.processed_bytes, real.processed_bytes);
    assert_eq!(dry.evaluated, real.evaluated);
}

#[test]
fn test_dry_run_delete_keeps_files() {
    let dir = tempdir().unwrap();
    scenario(dir.path());
    let before = listing(dir.path());

    let summary = run_in(
        dir.path(),
        RunOptions::default()
            .with_mode(RunMode::Delete)
            .with_dry_run(true),
        &NoopObserver,
    );

    assert_eq!(summary.processed, 2);
    assert_eq!(listing(dir.path()), before);
}

#[test]
fn test_second_move_run_finds_nothing() {
    let dir = tempdir().unwrap();
    scenario(dir.path());
    fs::write(dir.path().join("d.mp4"), b"video").unwrap();

    run_in(dir.path(), RunOptions::default(), &NoopObserver);
    let second = run_in(dir.path(), RunOptions::default(), &NoopObserver);

    assert_eq!(second.skipped_directories, 1);
    assert_eq!(second.evaluated, 2);
    assert_eq!(second.unique, 2);
    assert_eq!(second.duplicates, 0);
    assert_eq!(second.empty, 0);
    assert_eq!(second.processed, 0);
}

#[test]
fn test_move_collision_aborts_run() {
    let dir = tempdir().unwrap();
    scenario(dir.path());
    let moved = dir.path().join(MOVED_DIR_NAME);
    fs::create_dir(&moved).unwrap();
    fs::write(moved.join("bb.jpg"), b"earlier run").unwrap();

    let err = run(
        dir.path(),
        RunOptions::default(),
        ShutdownHandler::new().flag(),
        &NoopObserver,
    )
    .unwrap_err();

    match err {
        CleanupError::Execution(e) => assert_eq!(e.path(), dir.path().join("bb.jpg")),
        other => panic!("expected execution error, got {other}"),
    }
    assert!(dir.path().join("bb.jpg").exists());
    assert_eq!(fs::read(moved.join("bb.jpg")).unwrap(), b"earlier run");
}

#[test]
fn test_cancellation_mid_run() {
    let dir = tempdir().unwrap();
    for i in 0..20 {
        fs::write(dir.path().join(format!("{i:02}.jpg")), format!("file {i}")).unwrap();
    }
    let handler = ShutdownHandler::new();
    let observer = CancelAfterFirst {
        handler: handler.clone(),
        seen: Mutex::new(0),
    };

    let summary = run(
        dir.path(),
        RunOptions::default().with_dry_run(true),
        handler.flag(),
        &observer,
    )
    .unwrap();

    assert!(summary.interrupted);
    assert_eq!(*observer.seen.lock().unwrap(), 1);
    assert_eq!(summary.reported, 1);
    assert!(summary.reported < summary.scanned);
    assert!(summary.evaluated >= 1);
    assert!(summary.evaluated <= summary.scanned);
    assert!(summary.processed <= summary.evaluated);
    assert!(summary.total_bytes <= 20 * 7);
}

#[test]
fn test_pipeline_reusable_across_runs() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    scenario(first.path());
    scenario(second.path());
    let options = RunOptions::default().with_dry_run(true);

    let a = run_in(first.path(), options, &NoopObserver);
    let b = run_in(second.path(), options, &NoopObserver);

    assert_eq!(a, b);
    assert_eq!(b.duplicates, 1);
}

#[test]
fn test_empty_directory() {
    let dir = tempdir().unwrap();

    let summary = run_in(dir.path(), RunOptions::default(), &NoopObserver);

    assert_eq!(summary.scanned, 0);
    assert_eq!(summary.evaluated, 0);
    assert!(!summary.found_removable());
}

#[test]
fn test_hash_failure_aborts_run() {
    let dir = tempdir().unwrap();
    scenario(dir.path());
    fs::write(dir.path().join("ddd.jpg"), b"vanishes").unwrap();
    fs::write(dir.path().join("eeee_copy.jpg"), [42u8; 100]).unwrap();
    let observer = RemoveAfterScan(dir.path().join("ddd.jpg"));

    let err = run(
        dir.path(),
        RunOptions::default().with_mode(RunMode::Delete),
        ShutdownHandler::new().flag(),
        &observer,
    )
    .unwrap_err();

    match err {
        CleanupError::Hash(HashError::NotFound(path)) => {
            assert_eq!(path, dir.path().join("ddd.jpg"))
        }
        other => panic!("expected hash error, got {other}"),
    }
    // Nothing after the failing file is acted on.
    assert!(dir.path().join("a.jpg").exists());
    assert!(dir.path().join("eeee_copy.jpg").exists());
}

#[cfg(unix)]
#[test]
fn test_delete_failure_aborts_run() {
    use std::process::Command;
    use std::thread;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.jpg"), [42u8; 100]).unwrap();
    fs::write(dir.path().join("later_copy.jpg"), [42u8; 100]).unwrap();
    let fifo = dir.path().join("pipe.mp4");
    let status = Command::new("mkfifo").arg(&fifo).status().unwrap();
    assert!(status.success());

    // Once the classifier has the pipe open, swap the path for a directory
    // so hashing succeeds and the later delete cannot.
    let swap = {
        let fifo = fifo.clone();
        thread::spawn(move || {
            let writer = fs::OpenOptions::new().write(true).open(&fifo).unwrap();
            fs::remove_file(&fifo).unwrap();
            fs::create_dir(&fifo).unwrap();
            drop(writer);
        })
    };

    let result = run(
        dir.path(),
        RunOptions::default().with_mode(RunMode::Delete),
        ShutdownHandler::new().flag(),
        &NoopObserver,
    );
    swap.join().unwrap();

    match result.unwrap_err() {
        CleanupError::Execution(ExecutionError::Delete(e)) => assert_eq!(e.path, fifo),
        other => panic!("expected delete error, got {other}"),
    }
    assert!(fifo.is_dir());
    assert!(dir.path().join("a.jpg").exists());
    assert!(dir.path().join("later_copy.jpg").exists());
}

#[cfg(unix)]
#[test]
fn test_move_keeps_raw_file_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempdir().unwrap();
    let raw = OsStr::from_bytes(b"b\xff.jpg");
    fs::write(dir.path().join("a.jpg"), b"same").unwrap();
    fs::write(dir.path().join(raw), b"same").unwrap();

    let summary = run_in(dir.path(), RunOptions::default(), &NoopObserver);

    assert_eq!(summary.duplicates, 1);
    assert!(dir.path().join(MOVED_DIR_NAME).join(raw).exists());
    assert!(!dir.path().join(raw).exists());
}

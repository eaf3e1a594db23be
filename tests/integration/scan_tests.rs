use foldersweep::scanner::{scan, ScanError};
use std::fs::{self, File};
use tempfile::tempdir;

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let outcome = scan(dir.path()).unwrap();

    assert!(outcome.files.is_empty());
    assert_eq!(outcome.stats.skipped_directories, 0);
    assert_eq!(outcome.stats.skipped_files, 0);
}

#[test]
fn test_scan_all_supported_extensions() {
    let dir = tempdir().unwrap();
    for name in ["a.jpg", "b.jpeg", "c.dng", "d.mpg", "e.mp4"] {
        File::create(dir.path().join(name)).unwrap();
    }
    for name in ["f.png", "g.mov", "h.JPG", "i"] {
        File::create(dir.path().join(name)).unwrap();
    }

    let outcome = scan(dir.path()).unwrap();

    assert_eq!(outcome.files.len(), 5);
    assert_eq!(outcome.stats.skipped_files, 4);
}

#[test]
fn test_scan_order_by_name_length() {
    let dir = tempdir().unwrap();
    for name in ["IMG_0001 (1).jpg", "IMG_0001.jpg", "IMG_0001 copy.jpg", "x.mp4"] {
        fs::write(dir.path().join(name), b"same").unwrap();
    }

    let outcome = scan(dir.path()).unwrap();
    let names: Vec<_> = outcome.files.iter().map(|f| f.name.clone()).collect();

    assert_eq!(
        names,
        vec!["x.mp4", "IMG_0001.jpg", "IMG_0001 (1).jpg", "IMG_0001 copy.jpg"]
    );
}

#[test]
fn test_scan_records_sizes_and_paths() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("clip.mp4"), vec![0u8; 2048]).unwrap();

    let outcome = scan(dir.path()).unwrap();
    let file = &outcome.files[0];

    assert_eq!(file.size, 2048);
    assert_eq!(file.path, dir.path().join("clip.mp4"));
    assert_eq!(file.metadata.len(), 2048);
}

#[test]
fn test_scan_skips_moved_directory() {
    let dir = tempdir().unwrap();
    let moved = dir.path().join("moved");
    fs::create_dir(&moved).unwrap();
    fs::write(moved.join("dup.jpg"), b"dup").unwrap();
    fs::write(dir.path().join("orig.jpg"), b"dup").unwrap();

    let outcome = scan(dir.path()).unwrap();

    assert_eq!(outcome.files.len(), 1);
    assert_eq!(outcome.stats.skipped_directories, 1);
}

#[test]
fn test_scan_missing_path() {
    let dir = tempdir().unwrap();
    let err = scan(&dir.path().join("missing")).unwrap_err();

    assert!(matches!(err, ScanError::NotFound(_)));
    assert!(err.to_string().contains("Path not found"));
}

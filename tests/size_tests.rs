use edgarflow::utils::compute_directory_size;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_size_sums_nested_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.bin"), vec![0u8; 100]).unwrap();
    let nested = dir.path().join("nested");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(nested.join("b.bin"), vec![0u8; 250]).unwrap();

    let size = compute_directory_size(dir.path(), Duration::from_secs(10)).unwrap();
    assert_eq!(size, 350);
}

#[test]
fn test_size_of_single_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("solo.bin");
    std::fs::write(&file, vec![0u8; 42]).unwrap();

    let size = compute_directory_size(&file, Duration::from_secs(10)).unwrap();
    assert_eq!(size, 42);
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("target");
    std::fs::create_dir_all(&target).unwrap();
    std::fs::write(target.join("big.bin"), vec![0u8; 1000]).unwrap();

    let scanned = dir.path().join("scanned");
    std::fs::create_dir_all(&scanned).unwrap();
    std::os::unix::fs::symlink(&target, scanned.join("link")).unwrap();

    let size = compute_directory_size(&scanned, Duration::from_secs(10)).unwrap();
    assert_eq!(size, 0);
}

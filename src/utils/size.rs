/// Bounded-time directory size computation

use crate::{EdgarFlowError, Result};
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Run `task` on a worker thread, waiting at most `timeout` for the result.
///
/// On expiry the worker is abandoned, not killed; it may run to completion
/// in the background. A known resource-leak tradeoff, not a cancellation.
pub fn run_with_deadline<T, F>(task: F, timeout: Duration) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(task());
    });
    match rx.recv_timeout(timeout) {
        Ok(value) => Ok(value),
        Err(mpsc::RecvTimeoutError::Timeout) => Err(EdgarFlowError::OperationTimeout {
            seconds: timeout.as_secs_f64(),
        }),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(EdgarFlowError::OperationFailed(
            "size worker exited without a result".to_string(),
        )),
    }
}

/// Total size in bytes of every file under `path`, computed on a worker
/// bounded by `timeout`. Entries that cannot be stat'ed are skipped;
/// symlinks are not followed.
pub fn compute_directory_size(path: &Path, timeout: Duration) -> Result<u64> {
    let path = path.to_path_buf();
    run_with_deadline(move || walk_size(&path), timeout)
}

fn walk_size(path: &Path) -> u64 {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(_) => return 0,
    };
    if meta.is_file() {
        return meta.len();
    }
    if !meta.is_dir() {
        return 0;
    }
    match fs::read_dir(path) {
        Ok(entries) => entries
            .flatten()
            .map(|entry| walk_size(&entry.path()))
            .sum(),
        Err(_) => 0,
    }
}

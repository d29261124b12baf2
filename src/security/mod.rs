//! Input validation guarding the filesystem and subprocess boundaries.
//!
//! The command denylist is a guardrail, not a sandbox. Substring matching is
//! bypassable and over-broad (an argument merely containing "dd" is
//! rejected); callers needing real isolation need a stronger policy than
//! this module provides.

use crate::{EdgarFlowError, Result};
use std::ffi::OsString;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::warn;

/// Tokens that reject a path component outright.
const FORBIDDEN_TOKENS: &[&str] = &["..", "~", "$", "`", "|", ";", "&", ">", "<", "\0"];

/// Case-insensitive substrings that reject a subprocess argument list.
const COMMAND_DENYLIST: &[&str] = &["rm", "del", "format", "mkfs", "dd", "chmod 777", "sudo rm"];

/// Hard ceiling on subprocess timeouts, in seconds.
pub const MAX_SUBPROCESS_TIMEOUT_SECS: u64 = 300;

/// Validate a single path component destined for the filesystem.
///
/// Fails on an empty value, a forbidden token, or an absolute path.
/// Characters outside `[A-Za-z0-9_./-]` are allowed through with a warning.
pub fn sanitize_path_component(component: &str) -> Result<String> {
    let trimmed = component.trim();
    if trimmed.is_empty() {
        return Err(EdgarFlowError::InvalidPathComponent(
            "empty path component".to_string(),
        ));
    }
    for token in FORBIDDEN_TOKENS {
        if trimmed.contains(token) {
            return Err(EdgarFlowError::InvalidPathComponent(format!(
                "{:?} contains forbidden token {:?}",
                trimmed, token
            )));
        }
    }
    if Path::new(trimmed).is_absolute() {
        return Err(EdgarFlowError::InvalidPathComponent(format!(
            "{:?} is an absolute path",
            trimmed
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '-'))
    {
        warn!(
            component = %trimmed,
            "path component contains characters outside [A-Za-z0-9_./-]"
        );
    }
    Ok(trimmed.to_string())
}

/// Resolve symlinks in `path` and fail with `PathTraversal` unless the
/// result still has `root` as a prefix.
pub fn validate_within_root(path: &Path, root: &Path) -> Result<PathBuf> {
    let resolved_root = resolve_existing_prefix(root);
    let resolved = resolve_existing_prefix(path);
    if resolved.starts_with(&resolved_root) {
        Ok(resolved)
    } else {
        Err(EdgarFlowError::PathTraversal {
            path: resolved,
            root: resolved_root,
        })
    }
}

/// Canonicalize the deepest existing prefix of `path`, then re-append the
/// not-yet-existing tail with `.`/`..` folded lexically. Unlike
/// `fs::canonicalize` this works for paths that do not exist yet.
pub(crate) fn resolve_existing_prefix(path: &Path) -> PathBuf {
    let mut current = path.to_path_buf();
    let mut tail: Vec<OsString> = Vec::new();
    loop {
        match std::fs::canonicalize(&current) {
            Ok(mut resolved) => {
                for segment in tail.iter().rev() {
                    resolved.push(segment);
                }
                return normalize_lexically(&resolved);
            }
            Err(_) => match (current.parent(), current.file_name()) {
                (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
                    tail.push(name.to_os_string());
                    current = parent.to_path_buf();
                }
                _ => {
                    // Nothing along the path exists; fold what we have.
                    let mut out = current.clone();
                    for segment in tail.iter().rev() {
                        out.push(segment);
                    }
                    return normalize_lexically(&out);
                }
            },
        }
    }
}

/// Fold `.` and `..` components without touching the filesystem.
pub(crate) fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Reject argument lists containing known-destructive substrings. Returns
/// the arguments unchanged when clean.
pub fn validate_subprocess_args(args: &[String]) -> Result<Vec<String>> {
    for arg in args {
        let lowered = arg.to_lowercase();
        for banned in COMMAND_DENYLIST {
            if lowered.contains(banned) {
                return Err(EdgarFlowError::DangerousCommand(format!(
                    "argument {:?} matches denylisted pattern {:?}",
                    arg, banned
                )));
            }
        }
    }
    Ok(args.to_vec())
}

/// Captured result of a completed subprocess. A non-zero exit is not an
/// error; callers inspect `status_code`.
#[derive(Debug)]
pub struct SubprocessOutput {
    pub status_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl SubprocessOutput {
    pub fn success(&self) -> bool {
        self.status_code == Some(0)
    }
}

/// Validate `args`, then run them synchronously with captured output and a
/// timeout clamped to [`MAX_SUBPROCESS_TIMEOUT_SECS`]. The child is killed
/// on expiry.
pub fn run_subprocess_securely(args: &[String], timeout_secs: u64) -> Result<SubprocessOutput> {
    let args = validate_subprocess_args(args)?;
    let (program, rest) = args
        .split_first()
        .ok_or_else(|| EdgarFlowError::OperationFailed("empty argument list".to_string()))?;
    let timeout = Duration::from_secs(timeout_secs.min(MAX_SUBPROCESS_TIMEOUT_SECS));

    let mut child = Command::new(program)
        .args(rest)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            EdgarFlowError::OperationFailed(format!("failed to launch {:?}: {}", program, e))
        })?;

    // Drain both pipes on their own threads so a chatty child cannot fill a
    // pipe buffer and deadlock against our poll loop.
    let stdout = drain_pipe(child.stdout.take());
    let stderr = drain_pipe(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(EdgarFlowError::OperationTimeout {
                        seconds: timeout.as_secs_f64(),
                    });
                }
                std::thread::sleep(Duration::from_millis(20));
            }
            Err(e) => {
                return Err(EdgarFlowError::OperationFailed(format!(
                    "failed to poll {:?}: {}",
                    program, e
                )))
            }
        }
    };

    Ok(SubprocessOutput {
        status_code: status.code(),
        stdout: stdout.join().unwrap_or_default(),
        stderr: stderr.join().unwrap_or_default(),
    })
}

fn drain_pipe<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_accepts_clean_components() {
        assert_eq!(
            sanitize_path_component("valid-name_123").unwrap(),
            "valid-name_123"
        );
        assert_eq!(sanitize_path_component("  padded  ").unwrap(), "padded");
        assert_eq!(sanitize_path_component("a/b.json").unwrap(), "a/b.json");
    }

    #[test]
    fn test_sanitize_rejects_traversal_and_injection() {
        assert!(sanitize_path_component("../../etc/passwd").is_err());
        assert!(sanitize_path_component("").is_err());
        assert!(sanitize_path_component("   ").is_err());
        assert!(sanitize_path_component("~root").is_err());
        assert!(sanitize_path_component("a;b").is_err());
        assert!(sanitize_path_component("a|b").is_err());
        assert!(sanitize_path_component("$HOME").is_err());
        assert!(sanitize_path_component("`id`").is_err());
        assert!(sanitize_path_component("a&b").is_err());
        assert!(sanitize_path_component("a>b").is_err());
        assert!(sanitize_path_component("a<b").is_err());
        assert!(sanitize_path_component("a\0b").is_err());
        assert!(sanitize_path_component("/etc/passwd").is_err());
    }

    #[test]
    fn test_args_denylist() {
        let dangerous = vec!["rm".to_string(), "-rf".to_string(), "/".to_string()];
        assert!(matches!(
            validate_subprocess_args(&dangerous),
            Err(EdgarFlowError::DangerousCommand(_))
        ));

        let clean = vec!["echo".to_string(), "hi".to_string()];
        assert_eq!(validate_subprocess_args(&clean).unwrap(), clean);
    }

    #[test]
    fn test_denylist_is_case_insensitive() {
        let args = vec!["SUDO RM".to_string()];
        assert!(validate_subprocess_args(&args).is_err());
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/a/b/../c/./d")),
            PathBuf::from("/a/c/d")
        );
        assert_eq!(normalize_lexically(Path::new("/a/../..")), PathBuf::from("/"));
    }
}

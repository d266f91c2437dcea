//! # Estimate Files
//!
//! Disk layer for `.boq` estimate files. A save never overwrites the
//! previous bill in place:
//!
//! 1. the new JSON is written to a `.boq.tmp` sibling and fsynced,
//! 2. the previous `.boq` (if any) is copied aside to `.boq.bak`,
//! 3. the temp file is renamed over the `.boq`.
//!
//! A truncated or corrupt `.boq` can then be reopened from the `.bak` with
//! [`recover_estimate`]. Concurrent editing on a shared drive is guarded by
//! [`FileLock`]: an OS-level advisory lock paired with a `.boq.lock` sidecar
//! that names the holder.
//!
//! ## Example
//!
//! ```rust,no_run
//! use boq_core::file_io::{save_estimate, load_estimate, FileLock};
//! use boq_core::estimate::Estimate;
//! use std::path::Path;
//!
//! let estimate = Estimate::new("R. Sharma", "FO-2108", "Horizon Interiors");
//! let path = Path::new("site.boq");
//!
//! let lock = FileLock::acquire(path, "sharma@site").unwrap();
//! save_estimate(&estimate, path).unwrap();
//! drop(lock); // releases the lock and removes the sidecar
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::estimate::Estimate;

fn io_error(operation: &str, path: &Path, err: std::io::Error) -> EstimateError {
    EstimateError::file_error(operation, path.display().to_string(), err.to_string())
}

/// Append a suffix to the full file name, so `site.boq` keeps its extension:
/// `site.boq.tmp`, `site.boq.bak`, `site.boq.lock`.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(suffix);
    path.with_file_name(name)
}

/// Path of the backup written on each save over an existing estimate
pub fn backup_path_for(path: &Path) -> PathBuf {
    sibling(path, ".bak")
}

fn temp_path_for(path: &Path) -> PathBuf {
    sibling(path, ".tmp")
}

fn lock_path_for(path: &Path) -> PathBuf {
    sibling(path, ".lock")
}

// ============================================================================
// Save / Load
// ============================================================================

/// Write contents to a temp sibling, fsync, then rename over the target.
///
/// The rename is atomic on the filesystems estimates live on, so an
/// interrupted save leaves either the old file or the new one, never a
/// half-written bill.
fn write_atomic(path: &Path, contents: &str) -> EstimateResult<()> {
    let tmp = temp_path_for(path);

    let mut file = File::create(&tmp).map_err(|e| io_error("create temp", &tmp, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| io_error("write temp", &tmp, e))?;
    file.sync_all().map_err(|e| io_error("sync temp", &tmp, e))?;

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_error("replace", path, e));
    }
    Ok(())
}

/// Save an estimate to a `.boq` file.
///
/// When the file already exists, the previous version is copied to a `.bak`
/// sibling first, then the new JSON replaces the main file atomically.
pub fn save_estimate(estimate: &Estimate, path: &Path) -> EstimateResult<()> {
    let json =
        serde_json::to_string_pretty(estimate).map_err(|e| EstimateError::SerializationError {
            reason: e.to_string(),
        })?;

    if path.exists() {
        let backup = backup_path_for(path);
        fs::copy(path, &backup).map_err(|e| io_error("back up", &backup, e))?;
    }

    write_atomic(path, &json)
}

/// Load an estimate from a `.boq` file.
///
/// # Returns
///
/// * `Err(EstimateError::VersionMismatch)` - schema version is incompatible
/// * `Err(EstimateError::SerializationError)` - invalid JSON
/// * `Err(EstimateError::FileError)` - I/O failure
pub fn load_estimate(path: &Path) -> EstimateResult<Estimate> {
    let contents = fs::read_to_string(path).map_err(|e| io_error("read", path, e))?;

    let estimate: Estimate =
        serde_json::from_str(&contents).map_err(|e| EstimateError::SerializationError {
            reason: format!("invalid JSON in {}: {}", path.display(), e),
        })?;

    estimate.meta.check_version()?;
    Ok(estimate)
}

/// Load an estimate, falling back to its `.bak` sibling when the main file
/// is unreadable or corrupt.
///
/// Returns the estimate plus a flag reporting whether the backup was used,
/// so a shell can warn that the last save was lost.
pub fn recover_estimate(path: &Path) -> EstimateResult<(Estimate, bool)> {
    match load_estimate(path) {
        Ok(estimate) => Ok((estimate, false)),
        Err(primary) => {
            let backup = backup_path_for(path);
            if backup.exists() {
                Ok((load_estimate(&backup)?, true))
            } else {
                Err(primary)
            }
        }
    }
}

/// Load an estimate together with the active lock on it, if any.
///
/// A shell opening a locked file should treat it as read-only and show who
/// holds it.
pub fn load_estimate_with_lock_check(path: &Path) -> EstimateResult<(Estimate, Option<LockInfo>)> {
    let estimate = load_estimate(path)?;
    Ok((estimate, FileLock::check(path)))
}

// ============================================================================
// Locking
// ============================================================================

/// Lock holder metadata stored in the `.boq.lock` sidecar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where the lock was taken
    pub machine: String,
    /// Process that holds the lock
    pub pid: u32,
    /// When the lock was taken
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    fn for_current_process(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Holder description for lock error messages
    pub fn holder(&self) -> String {
        format!("{} ({})", self.user_id, self.machine)
    }

    /// A lock is stale when its holder process is gone on this machine, or
    /// the lock is older than a working day and was never cleaned up.
    fn is_stale(&self) -> bool {
        if hostname().as_deref() == Some(self.machine.as_str()) && !process_alive(self.pid) {
            return true;
        }
        Utc::now() - self.locked_at > Duration::hours(24)
    }
}

fn hostname() -> Option<String> {
    ["HOSTNAME", "HOST", "COMPUTERNAME"]
        .iter()
        .find_map(|key| std::env::var(key).ok())
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{pid}")).exists()
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    // No cheap liveness probe here; the age check decides alone
    true
}

fn read_lock_info(lock_path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Exclusive lock on an estimate file, released on drop.
///
/// Two layers: an OS advisory lock (via fs2) for process safety, and the
/// JSON sidecar so other users see who is editing.
pub struct FileLock {
    lock_path: PathBuf,
    // Dropping the handle releases the OS lock
    _handle: File,
    /// Metadata written to the sidecar
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on an estimate file.
    ///
    /// A stale sidecar (dead holder process or abandoned for over a day) is
    /// taken over silently.
    ///
    /// # Returns
    ///
    /// * `Err(EstimateError::FileLocked)` - another user holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> EstimateResult<Self> {
        let lock_path = lock_path_for(path);

        if let Some(existing) = read_lock_info(&lock_path) {
            if !existing.is_stale() {
                return Err(EstimateError::file_locked(
                    path.display().to_string(),
                    existing.holder(),
                    existing.locked_at.to_rfc3339(),
                ));
            }
        }

        let mut handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| io_error("create lock", &lock_path, e))?;

        handle.try_lock_exclusive().map_err(|_| {
            EstimateError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        let info = LockInfo::for_current_process(user_id);
        let json =
            serde_json::to_string_pretty(&info).map_err(|e| EstimateError::SerializationError {
                reason: e.to_string(),
            })?;
        handle
            .write_all(json.as_bytes())
            .map_err(|e| io_error("write lock", &lock_path, e))?;
        handle
            .sync_all()
            .map_err(|e| io_error("sync lock", &lock_path, e))?;

        Ok(FileLock {
            lock_path,
            _handle: handle,
            info,
        })
    }

    /// Report the active lock on an estimate file without taking it.
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path)).filter(|info| !info.is_stale())
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // The OS lock releases with the handle; remove the sidecar
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_estimate_path(name: &str) -> PathBuf {
        temp_dir().join(format!("boq_test_{}.boq", name))
    }

    fn cleanup(path: &Path) {
        let _ = fs::remove_file(path);
        let _ = fs::remove_file(backup_path_for(path));
        let _ = fs::remove_file(lock_path_for(path));
    }

    #[test]
    fn test_sidecar_paths_keep_boq_extension() {
        let path = Path::new("/jobs/site.boq");
        assert_eq!(temp_path_for(path), Path::new("/jobs/site.boq.tmp"));
        assert_eq!(backup_path_for(path), Path::new("/jobs/site.boq.bak"));
        assert_eq!(lock_path_for(path), Path::new("/jobs/site.boq.lock"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_estimate_path("roundtrip");

        let estimate = Estimate::new("R. Sharma", "FO-2108", "Horizon Interiors");
        save_estimate(&estimate, &path).unwrap();

        let loaded = load_estimate(&path).unwrap();
        assert_eq!(loaded.meta.estimator, "R. Sharma");
        assert_eq!(loaded.meta.job_id, "FO-2108");
        assert_eq!(loaded.meta.client, "Horizon Interiors");

        cleanup(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_temp() {
        let path = temp_estimate_path("atomic");

        let estimate = Estimate::new("Estimator", "FO-1", "Client");
        save_estimate(&estimate, &path).unwrap();

        assert!(path.exists());
        assert!(!temp_path_for(&path).exists());

        cleanup(&path);
    }

    #[test]
    fn test_save_backs_up_previous_version() {
        let path = temp_estimate_path("backup");

        let first = Estimate::new("First", "FO-1", "Client");
        save_estimate(&first, &path).unwrap();
        // First save of a new file has nothing to back up
        assert!(!backup_path_for(&path).exists());

        let second = Estimate::new("Second", "FO-2", "Client");
        save_estimate(&second, &path).unwrap();

        let backup = load_estimate(&backup_path_for(&path)).unwrap();
        assert_eq!(backup.meta.job_id, "FO-1");
        assert_eq!(load_estimate(&path).unwrap().meta.job_id, "FO-2");

        cleanup(&path);
    }

    #[test]
    fn test_recover_from_corrupt_file() {
        let path = temp_estimate_path("recover");

        save_estimate(&Estimate::new("Estimator", "FO-1", "Client"), &path).unwrap();
        save_estimate(&Estimate::new("Estimator", "FO-2", "Client"), &path).unwrap();

        // Simulate a torn write on the main file
        fs::write(&path, "{\"meta\": {\"version\": \"0.1").unwrap();

        let (recovered, used_backup) = recover_estimate(&path).unwrap();
        assert!(used_backup);
        assert_eq!(recovered.meta.job_id, "FO-1");

        cleanup(&path);
    }

    #[test]
    fn test_recover_without_backup_reports_original_error() {
        let path = temp_estimate_path("recover_none");

        fs::write(&path, "not json").unwrap();
        let err = recover_estimate(&path).unwrap_err();
        assert!(matches!(err, EstimateError::SerializationError { .. }));

        cleanup(&path);
    }

    #[test]
    fn test_recover_prefers_intact_main_file() {
        let path = temp_estimate_path("recover_intact");

        save_estimate(&Estimate::new("Estimator", "FO-1", "Client"), &path).unwrap();
        save_estimate(&Estimate::new("Estimator", "FO-2", "Client"), &path).unwrap();

        let (estimate, used_backup) = recover_estimate(&path).unwrap();
        assert!(!used_backup);
        assert_eq!(estimate.meta.job_id, "FO-2");

        cleanup(&path);
    }

    #[test]
    fn test_lock_acquire_and_release() {
        let path = temp_estimate_path("lock");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "sharma@site").unwrap();
        assert_eq!(lock.info.user_id, "sharma@site");
        assert!(lock_path_for(&path).exists());

        drop(lock);
        assert!(!lock_path_for(&path).exists());

        cleanup(&path);
    }

    #[test]
    fn test_second_acquire_is_refused() {
        let path = temp_estimate_path("lock_contended");
        File::create(&path).unwrap();

        let _lock = FileLock::acquire(&path, "first@site").unwrap();
        let second = FileLock::acquire(&path, "second@site");
        assert!(matches!(second, Err(EstimateError::FileLocked { .. })));

        cleanup(&path);
    }

    #[test]
    fn test_stale_lock_is_taken_over() {
        let path = temp_estimate_path("lock_stale");
        File::create(&path).unwrap();

        // Abandoned sidecar: two days old, no live holder handle
        let abandoned = LockInfo {
            user_id: "gone@site".to_string(),
            machine: "old-machine".to_string(),
            pid: 1,
            locked_at: Utc::now() - Duration::hours(48),
        };
        fs::write(
            lock_path_for(&path),
            serde_json::to_string_pretty(&abandoned).unwrap(),
        )
        .unwrap();

        let lock = FileLock::acquire(&path, "fresh@site").unwrap();
        assert_eq!(lock.info.user_id, "fresh@site");

        cleanup(&path);
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_estimate_path("lock_check");

        save_estimate(&Estimate::new("Estimator", "FO-1", "Client"), &path).unwrap();

        let (loaded, lock_info) = load_estimate_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "FO-1");
        assert!(lock_info.is_none());

        cleanup(&path);
    }
}

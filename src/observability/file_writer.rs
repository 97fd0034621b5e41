//! Append-only trace file with size-based rotation.
//!
//! Rotated files keep the primary name plus a unix timestamp suffix
//! (`layout-picker-otlp.json.1718000000`). Only the newest backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotate once the trace file grows past 10 MB.
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated files kept next to the live one.
pub const DEFAULT_BACKUPS: usize = 3;

/// Line-oriented writer shared by the span exporter.
///
/// The file is opened lazily on the first write, so a missing directory
/// only surfaces as an export error.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    /// Writer with the default rotation limits.
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_BACKUPS)
    }

    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            handle: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors or when the lock was poisoned by a panicking writer.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        if self.is_full() {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            );
        }

        let Some(file) = handle.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file not open"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn is_full(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let backup = self.backup_path(stamp);

        if self.path.exists() {
            fs::rename(&self.path, backup)?;
        }

        self.prune_backups()
    }

    fn backup_path(&self, stamp: i64) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{stamp}"));
        PathBuf::from(name)
    }

    fn prune_backups(&self) -> io::Result<()> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        let Some(prefix) = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| format!("{n}."))
        else {
            return Ok(());
        };

        let mut backups: Vec<(u128, PathBuf)> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name();
                let stamp = name.to_str()?.strip_prefix(&prefix)?.parse::<u128>().ok()?;
                Some((stamp, entry.path()))
            })
            .collect();

        // Newest first.
        backups.sort_by(|a, b| b.0.cmp(&a.0));

        for (_, stale) in backups.iter().skip(self.backups) {
            if let Err(e) = fs::remove_file(stale) {
                tracing::debug!(path = %stale.display(), error = %e, "failed to remove old trace file");
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups_in(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("trace.json."))
            .count()
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::new(dir.path().join("trace.json"));

        writer.append_line("{\"a\":1}").unwrap();
        writer.append_line("{\"b\":2}").unwrap();

        let contents = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
        assert_eq!(backups_in(dir.path()), 0);
    }

    #[test]
    fn rotates_when_full_and_keeps_limited_backups() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::with_limits(dir.path().join("trace.json"), 4, 2);

        for i in 0..6 {
            writer.append_line(&format!("line-{i}")).unwrap();
        }

        let live = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(live, "line-5\n");
        assert!(backups_in(dir.path()) <= 2);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::new(dir.path().join("absent").join("trace.json"));

        assert!(writer.append_line("x").is_err());
    }
}

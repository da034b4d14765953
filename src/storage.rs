//! Storage slots: the single named location a catalog snapshot lives in.
//!
//! The store is written against the [`StorageSlot`] trait so the same
//! catalog logic runs over a file on disk or an in-memory slot in tests.
//! Slots hold one opaque string; every mutation overwrites the whole value,
//! matching the full-snapshot persistence model. Two stores sharing a slot
//! get last-writer-wins semantics; there is no cross-process coordination.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors raised by a storage slot.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("unable to read storage slot {path}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("unable to write storage slot {path}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("storage slot rejected the write: {reason}")]
    Unavailable { reason: String },
}

/// A single named key-value location holding the serialized catalog.
pub trait StorageSlot {
    /// Current slot contents, or `None` when nothing was ever written.
    fn read(&self) -> Result<Option<String>, SlotError>;

    /// Replace the slot contents wholesale.
    fn write(&mut self, contents: &str) -> Result<(), SlotError>;
}

/// File-backed slot.
///
/// Writes go through a temp file in the target directory followed by an
/// atomic rename, so a crash mid-write never leaves a torn snapshot behind.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, SlotError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SlotError::Read {
                path: self.display_path(),
                source: err,
            }),
        }
    }

    fn write(&mut self, contents: &str) -> Result<(), SlotError> {
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|err| SlotError::Write {
            path: self.display_path(),
            source: err,
        })?;

        let mut staged = NamedTempFile::new_in(&parent).map_err(|err| SlotError::Write {
            path: self.display_path(),
            source: err,
        })?;
        staged
            .write_all(contents.as_bytes())
            .map_err(|err| SlotError::Write {
                path: self.display_path(),
                source: err,
            })?;
        staged.persist(&self.path).map_err(|err| SlotError::Write {
            path: self.display_path(),
            source: err.error,
        })?;
        Ok(())
    }
}

/// In-memory slot for tests and embedded callers.
///
/// `fail_writes` simulates a disabled or full backing store so the
/// persist-error path of the store can be exercised without touching disk.
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    contents: Option<String>,
    fail_writes: bool,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-populated with existing contents.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            fail_writes: false,
        }
    }

    /// Slot whose writes always fail, as if storage were disabled.
    pub fn failing() -> Self {
        Self {
            contents: None,
            fail_writes: true,
        }
    }

    /// Raw contents, for assertions on what was persisted.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, SlotError> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> Result<(), SlotError> {
        if self.fail_writes {
            return Err(SlotError::Unavailable {
                reason: "writes disabled".to_string(),
            });
        }
        self.contents = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_slot_reads_none_before_first_write() {
        let dir = TempDir::new().unwrap();
        let slot = FileSlot::new(dir.path().join("catalog.json"));
        assert!(slot.read().unwrap().is_none());
    }

    #[test]
    fn file_slot_round_trips_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut slot = FileSlot::new(dir.path().join("catalog.json"));
        slot.write("first").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("first"));
        slot.write("second").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn file_slot_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let mut slot = FileSlot::new(dir.path().join("nested/state/catalog.json"));
        slot.write("{}").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn memory_slot_failing_rejects_writes() {
        let mut slot = MemorySlot::failing();
        let err = slot.write("anything").unwrap_err();
        assert!(matches!(err, SlotError::Unavailable { .. }));
        assert!(slot.read().unwrap().is_none());
    }
}

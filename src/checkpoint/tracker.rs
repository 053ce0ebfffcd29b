//! Single-writer checkpoint handle for the host's processing loop

use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::offset::{read_offset, write_offset};
use crate::models::{RelayError, RelayResult};

/// Tracks the stream position and serializes every write to the offset file.
///
/// The resume offset is read once when the checkpoint is opened. After that,
/// `commit` advances the persisted position. Concurrent commits are
/// serialized, so the file is never written by two threads at once.
#[derive(Debug)]
pub struct Checkpoint {
    path: PathBuf,
    resume: u64,
    committed: Mutex<u64>,
}

impl Checkpoint {
    /// Open the checkpoint at `path`, reading the offset to resume from
    pub fn open<P: AsRef<Path>>(path: P) -> RelayResult<Self> {
        let path = path.as_ref().to_path_buf();
        let resume = read_offset(&path)?;
        info!("Resuming from offset {} ({})", resume, path.display());

        Ok(Self {
            path,
            resume,
            committed: Mutex::new(resume),
        })
    }

    /// Offset read at startup
    pub fn resume_offset(&self) -> u64 {
        self.resume
    }

    /// Last offset that was successfully persisted
    pub fn current(&self) -> u64 {
        *self.committed.lock()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a new offset after a unit of work has been processed.
    ///
    /// Going backwards is refused. A failed write is logged and returned;
    /// the in-memory position only moves once the write succeeded, and the
    /// caller may keep processing since a restart merely replays the
    /// unsaved range.
    pub fn commit(&self, offset: u64) -> RelayResult<()> {
        let mut committed = self.committed.lock();

        if offset < *committed {
            return Err(RelayError::OffsetRegression {
                committed: *committed,
                attempted: offset,
            });
        }

        match write_offset(&self.path, offset) {
            Ok(()) => {
                *committed = offset;
                Ok(())
            }
            Err(e) => {
                error!("couldn't save offset {}: {}", offset, e);
                Err(e)
            }
        }
    }
}

//! Staged copy/move awaiting a paste
//!
//! The clipboard holds at most one pending operation. Staging a new one or
//! cancelling replaces it. A paste takes a snapshot, runs the operation
//! outside the lock, and only clears the slot afterwards if nothing was
//! staged in the meantime.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// What the next paste will do
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "source", rename_all = "snake_case")]
pub enum PendingOperation {
    #[default]
    Idle,
    CopyStaged(PathBuf),
    MoveStaged(PathBuf),
}

impl PendingOperation {
    /// The staged source path, if any
    pub fn source(&self) -> Option<&Path> {
        match self {
            Self::Idle => None,
            Self::CopyStaged(path) | Self::MoveStaged(path) => Some(path),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Short label for status lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CopyStaged(_) => "copy",
            Self::MoveStaged(_) => "move",
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    operation: PendingOperation,
    generation: u64,
}

/// Single-slot holder for the pending operation
#[derive(Debug, Default)]
pub struct Clipboard {
    slot: Mutex<Slot>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `path` to be copied on the next paste
    pub fn start_copy(&self, path: impl Into<PathBuf>) {
        self.replace(PendingOperation::CopyStaged(path.into()));
    }

    /// Stage `path` to be moved on the next paste
    pub fn start_move(&self, path: impl Into<PathBuf>) {
        self.replace(PendingOperation::MoveStaged(path.into()));
    }

    /// Drop whatever is staged
    pub fn cancel(&self) {
        self.replace(PendingOperation::Idle);
    }

    /// The currently staged operation
    pub fn current(&self) -> PendingOperation {
        self.lock().operation.clone()
    }

    /// The staged operation together with a token identifying this staging
    pub fn snapshot(&self) -> (PendingOperation, u64) {
        let slot = self.lock();
        (slot.operation.clone(), slot.generation)
    }

    /// Return to idle after a successful paste of the `generation` snapshot
    ///
    /// Returns `false` and leaves the slot alone when a different operation
    /// was staged (or the slot cancelled) while the paste ran.
    pub fn complete(&self, generation: u64) -> bool {
        let mut slot = self.lock();
        if slot.generation != generation {
            return false;
        }
        slot.operation = PendingOperation::Idle;
        slot.generation += 1;
        true
    }

    fn replace(&self, operation: PendingOperation) {
        let mut slot = self.lock();
        tracing::debug!(state = operation.label(), "Clipboard updated");
        slot.operation = operation;
        slot.generation += 1;
    }

    // The slot is always left consistent, so a poisoned lock is still usable
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

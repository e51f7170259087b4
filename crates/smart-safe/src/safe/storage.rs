use core::cell::{Cell, OnceCell};

use crate::{SafeError, SafeOwners};

/// The state of one safe instance.
///
/// Storage is shared by reference while a call is in flight, so that the executor of an
/// authorized call may call back into the same instance. The owner configuration can be written
/// once; the nonce only moves forward, or back to a checkpoint when the call that advanced it is
/// discarded.
#[derive(Debug, Default)]
pub struct SafeStorage {
    owners: OnceCell<SafeOwners>,
    nonce: Cell<u64>,
}

/// A snapshot of the mutable part of [`SafeStorage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageCheckpoint {
    nonce: u64,
}

impl SafeStorage {
    /// Returns the owner configuration, if the safe is Active.
    pub fn owners(&self) -> Option<&SafeOwners> {
        self.owners.get()
    }

    /// Returns whether the safe is Active.
    pub fn is_initialized(&self) -> bool {
        self.owners.get().is_some()
    }

    /// Records the owner configuration, moving the safe to Active.
    pub fn initialize(&self, owners: SafeOwners) -> Result<(), SafeError> {
        self.owners.set(owners).map_err(|_| SafeError::AlreadyInitialized)
    }

    /// Returns the current transaction nonce.
    pub fn nonce(&self) -> u64 {
        self.nonce.get()
    }

    /// Advances the nonce by one and returns the nonce that was consumed.
    ///
    /// Returns `None`, leaving the nonce untouched, once the nonce cannot advance any further.
    pub fn increment_nonce(&self) -> Option<u64> {
        let nonce = self.nonce.get();
        self.nonce.set(nonce.checked_add(1)?);
        Some(nonce)
    }

    /// Takes a snapshot to revert to if the pending operation fails.
    pub fn checkpoint(&self) -> StorageCheckpoint {
        StorageCheckpoint { nonce: self.nonce.get() }
    }

    /// Discards every change made since `checkpoint` was taken.
    pub fn revert(&self, checkpoint: StorageCheckpoint) {
        self.nonce.set(checkpoint.nonce);
    }
}

#[cfg(test)]
impl SafeStorage {
    /// Creates Uninitialized storage whose nonce starts at `nonce`.
    pub(crate) fn with_nonce(nonce: u64) -> Self {
        Self { owners: OnceCell::new(), nonce: Cell::new(nonce) }
    }
}

// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admission gate for expensive extraction requests.
//!
//! A fixed number of permits; a caller that finds none left is rejected
//! immediately instead of queuing. Permits are released when the returned
//! [`GatePermit`] drops, on every exit path.

use std::sync::Arc;

use sairen_core::SairenError;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

#[derive(Debug, Clone)]
pub struct ExtractionGate {
    permits: Arc<Semaphore>,
    capacity: usize,
}

/// Proof of admission. Dropping it frees the slot.
#[derive(Debug)]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
}

impl ExtractionGate {
    /// A gate admitting up to `capacity` concurrent holders (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Takes a slot or fails with [`SairenError::Busy`].
    pub fn try_enter(&self) -> Result<GatePermit, SairenError> {
        Arc::clone(&self.permits)
            .try_acquire_owned()
            .map(|permit| GatePermit { _permit: permit })
            .map_err(|_| SairenError::Busy)
    }

    /// Number of slots currently held.
    pub fn in_flight(&self) -> usize {
        self.capacity - self.permits.available_permits()
    }
}

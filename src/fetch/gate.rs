// src/fetch/gate.rs
// =============================================================================
// Counting gate that bounds how many keys are being fetched at once.
//
// A permit is taken before a key's first attempt and dropped after its last
// one, backoff sleeps included. Tasks beyond the limit wait in acquire()
// until a permit comes back.
// =============================================================================

use tokio::sync::{AcquireError, Semaphore, SemaphorePermit};

pub struct Gate {
    permits: Semaphore,
    limit: usize,
}

impl Gate {
    pub fn new(limit: usize) -> Self {
        Gate {
            permits: Semaphore::new(limit),
            limit,
        }
    }

    /// Waits for a free slot. The slot is released when the permit drops.
    pub async fn enter(&self) -> Result<SemaphorePermit<'_>, AcquireError> {
        self.permits.acquire().await
    }

    pub fn in_flight(&self) -> usize {
        self.limit - self.permits.available_permits()
    }
}

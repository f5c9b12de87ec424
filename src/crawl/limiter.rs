// src/crawl/limiter.rs
// =============================================================================
// Bounds how many page fetches run at the same time.
//
// A counting permit pool on top of tokio's Semaphore. Permits are RAII
// guards: dropping one hands it back, so a fetch that fails, panics or is
// cancelled can never leak capacity. The semaphore is private and never
// closed, so waiting for a permit cannot fail.
// =============================================================================

use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    permits: Arc<Semaphore>,
    capacity: usize,
}

/// One unit of fetch capacity, returned to the pool on drop
#[derive(Debug)]
pub struct Permit {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyLimiter {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(capacity.get())),
            capacity: capacity.get(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently handed out
    pub fn in_use(&self) -> usize {
        self.capacity - self.permits.available_permits()
    }

    /// Waits until a permit is free
    pub async fn acquire(&self) -> Permit {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .expect("limiter semaphore is never closed");
        Permit { _permit: permit }
    }

    /// Runs `fut` while holding a permit
    pub async fn run<F: Future>(&self, fut: F) -> F::Output {
        let _permit = self.acquire().await;
        fut.await
    }
}

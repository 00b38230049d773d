//! The plate allocation engine.
//!
//! The engine owns the set of every plate ever issued and a reference to the
//! most recently issued one, and drives the generate → persist → record
//! protocol for both allocation modes. It is the authoritative exhaustion
//! boundary: the pure successor function wraps around silently, so capacity
//! is checked here and only here.

use std::collections::BTreeSet;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use platereg_plate::{random_plate, successor, Letter, PlateNumber};

use crate::store::{PlateStore, StoreError};

/// Total size of the plate space for a single region.
pub const PLATE_SPACE: usize = Letter::COUNT * Letter::COUNT * Letter::COUNT * 1000;

/// Errors from allocation operations.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// Every combination in the plate space has been issued.
    #[error("plate space exhausted: all {0} combinations issued")]
    SpaceExhausted(usize),

    /// The durable append (or the startup load) failed. The in-memory state
    /// is untouched, so the caller may safely retry.
    #[error("plate persistence failed: {0}")]
    Persistence(#[from] StoreError),
}

/// Concurrent, duplicate-free plate allocator.
///
/// Membership tests, inserts, and the last-issued swap are individually
/// linearizable; the allocate sequence as a whole is deliberately not one
/// atomic transaction. Two concurrent requests may generate from the same
/// stale last-issued snapshot and both succeed with different plates.
pub struct AllocationEngine {
    store: Mutex<PlateStore>,
    issued: RwLock<BTreeSet<PlateNumber>>,
    last_issued: ArcSwapOption<PlateNumber>,
    capacity: usize,
    default_region: String,
}

impl AllocationEngine {
    /// Create an engine over the full plate space, bulk-loading previously
    /// issued plates from the store.
    ///
    /// # Errors
    ///
    /// Fails with `AllocationError::Persistence` if the store cannot be read.
    /// There is no partial or lazy load.
    pub fn new(
        store: PlateStore,
        default_region: impl Into<String>,
    ) -> Result<Self, AllocationError> {
        Self::with_capacity(store, default_region, PLATE_SPACE)
    }

    /// Create an engine with a reduced capacity.
    ///
    /// Exhaustion behavior is only observable with a capacity far below
    /// [`PLATE_SPACE`], so tests construct engines through this.
    pub fn with_capacity(
        store: PlateStore,
        default_region: impl Into<String>,
        capacity: usize,
    ) -> Result<Self, AllocationError> {
        let records = store.load_all()?;
        let last = store.load_most_recent()?;

        let issued: BTreeSet<PlateNumber> = records.into_iter().map(|r| r.plate).collect();
        info!(issued = issued.len(), "Loaded issued plates from store");

        Ok(Self {
            store: Mutex::new(store),
            issued: RwLock::new(issued),
            last_issued: ArcSwapOption::from(last.map(|r| Arc::new(r.plate))),
            capacity,
            default_region: default_region.into(),
        })
    }

    /// Allocate a uniformly random free plate and return its canonical
    /// string.
    ///
    /// Candidates already issued are rejected and redrawn; the expected
    /// number of draws stays small while utilization is low.
    pub async fn allocate_random(&self) -> Result<String, AllocationError> {
        self.check_capacity().await?;

        loop {
            let candidate = random_plate(&self.default_region);
            if self.issued.read().await.contains(&candidate) {
                continue;
            }
            if let Some(issued) = self.try_commit(candidate).await? {
                return Ok(issued);
            }
            // Lost a race with a concurrent allocation, redraw
        }
    }

    /// Allocate the successor of the last issued plate and return its
    /// canonical string.
    ///
    /// Falls back to random allocation when nothing has been issued yet.
    pub async fn allocate_next(&self) -> Result<String, AllocationError> {
        self.check_capacity().await?;

        let Some(last) = self.last_issued.load_full() else {
            debug!("No plate issued yet, falling back to random allocation");
            return self.allocate_random().await;
        };

        let mut candidate = successor(&last);
        loop {
            // Free on the first try under normal operation; stepping past
            // issued plates guards against concurrent allocations and
            // pre-seeded data.
            while self.issued.read().await.contains(&candidate) {
                candidate = successor(&candidate);
            }
            if let Some(issued) = self.try_commit(candidate.clone()).await? {
                return Ok(issued);
            }
            candidate = successor(&candidate);
        }
    }

    /// Number of plates issued so far.
    pub async fn issued_count(&self) -> usize {
        self.issued.read().await.len()
    }

    /// The most recently issued plate, if any.
    pub fn last_issued(&self) -> Option<PlateNumber> {
        self.last_issued.load_full().map(|p| (*p).clone())
    }

    /// Check that the backing store is reachable.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.store.lock().await.health_check()
    }

    async fn check_capacity(&self) -> Result<(), AllocationError> {
        if self.issued.read().await.len() >= self.capacity {
            return Err(AllocationError::SpaceExhausted(self.capacity));
        }
        Ok(())
    }

    /// Persist a candidate and record it in memory.
    ///
    /// The issued set's write lock is held across the membership re-check,
    /// the durable append, and the insert, closing the window in which two
    /// tasks could agree on the same candidate. Returns `Ok(None)` when the
    /// candidate was issued by a concurrent allocation in the meantime; the
    /// caller regenerates. The durable append happens strictly before any
    /// in-memory mutation, so a failed append leaves the set and the
    /// last-issued reference untouched.
    async fn try_commit(&self, candidate: PlateNumber) -> Result<Option<String>, AllocationError> {
        let mut issued = self.issued.write().await;
        if issued.contains(&candidate) {
            return Ok(None);
        }

        self.store.lock().await.append(&candidate)?;

        issued.insert(candidate.clone());
        self.last_issued.store(Some(Arc::new(candidate.clone())));

        debug!(plate = %candidate, "Issued plate");

        Ok(Some(candidate.to_string()))
    }
}

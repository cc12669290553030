//! In-flight Reservation Module
//!
//! Per-fingerprint async locks so that at most one request computes the
//! answer for a given question at a time. A request reserves the fingerprint
//! before its lookup and holds the reservation until its `put` is done;
//! concurrent requests for the same question wait and then observe the hit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;

use crate::cache::Fingerprint;

type Slot = Arc<Semaphore>;
type SlotTable = Arc<Mutex<HashMap<Fingerprint, Slot>>>;

// == Inflight Locks ==
/// Table of per-fingerprint reservations.
#[derive(Debug, Clone, Default)]
pub struct InflightLocks {
    slots: SlotTable,
}

/// A request's interest in a slot, whether it holds it or is still waiting.
/// Dropping the last one removes the slot from the table.
#[derive(Debug)]
struct SlotRef {
    key: Fingerprint,
    slots: SlotTable,
    slot: Option<Slot>,
}

impl SlotRef {
    fn semaphore(&self) -> Option<&Semaphore> {
        self.slot.as_deref()
    }
}

impl Drop for SlotRef {
    fn drop(&mut self) {
        // Slot handles are only cloned and released under the table lock.
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        drop(self.slot.take());
        if let Some(current) = slots.get(&self.key) {
            if Arc::strong_count(current) == 1 {
                slots.remove(&self.key);
            }
        }
    }
}

/// Held while a request owns a fingerprint. Dropping it releases the
/// reservation and prunes the table slot once nobody else references it.
#[derive(Debug)]
pub struct InflightGuard {
    slot: SlotRef,
    held: bool,
}

impl InflightLocks {
    pub fn new() -> Self {
        Self::default()
    }

    // == Reserve ==
    /// Waits until no other request holds `key`, then reserves it.
    ///
    /// Cancelling the returned future while it waits leaves no trace in the
    /// table once the current holder is gone as well.
    pub async fn reserve(&self, key: &Fingerprint) -> InflightGuard {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            slots
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Semaphore::new(1)))
                .clone()
        };
        let slot = SlotRef {
            key: key.clone(),
            slots: Arc::clone(&self.slots),
            slot: Some(slot),
        };

        // Slot semaphores are never closed.
        let held = match slot.semaphore() {
            Some(semaphore) => semaphore.acquire().await.map(|permit| permit.forget()).is_ok(),
            None => false,
        };

        InflightGuard { slot, held }
    }

    /// Number of fingerprints currently reserved or awaited.
    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InflightGuard {
    pub fn key(&self) -> &Fingerprint {
        &self.slot.key
    }
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        // Hand the permit back before the slot reference is dropped.
        if let (true, Some(semaphore)) = (self.held, self.slot.semaphore()) {
            semaphore.add_permits(1);
        }
    }
}

//! Snapshot cache for the web layer.
//!
//! The coordinator publishes snapshots over a small channel; this task
//! drains them into a shared cell the HTTP handlers read on demand. The
//! web layer polls, so only the newest snapshot matters.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
use lamplink_control::{LampSnapshot, SnapshotReceiver};

static LATEST_SNAPSHOT: Mutex<CriticalSectionRawMutex, RefCell<LampSnapshot>> =
    Mutex::new(RefCell::new(LampSnapshot::unknown()));

/// The most recent lamp snapshot seen.
pub fn latest_snapshot() -> LampSnapshot {
    LATEST_SNAPSHOT.lock(|cell| cell.borrow().clone())
}

#[embassy_executor::task]
pub async fn snapshot_cache_task(receiver: SnapshotReceiver) {
    loop {
        let snapshot = receiver.receive().await;
        LATEST_SNAPSHOT.lock(|cell| {
            *cell.borrow_mut() = snapshot;
        });
    }
}

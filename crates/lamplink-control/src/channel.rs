use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::dto::{LampRequest, LampSnapshot};

/// Capacity of the inbound request queue.
pub const REQUEST_CHANNEL_SIZE: usize = 10;

/// Capacity of the outbound snapshot queue. The UI polls, so a small
/// backlog is enough; stale entries are superseded anyway.
pub const SNAPSHOT_CHANNEL_SIZE: usize = 2;

/// Type alias for the request channel
pub type RequestChannel = Channel<CriticalSectionRawMutex, LampRequest, REQUEST_CHANNEL_SIZE>;

/// Type alias for the request sender
pub type RequestSender =
    Sender<'static, CriticalSectionRawMutex, LampRequest, REQUEST_CHANNEL_SIZE>;

/// Type alias for the request receiver
pub type RequestReceiver =
    Receiver<'static, CriticalSectionRawMutex, LampRequest, REQUEST_CHANNEL_SIZE>;

/// Type alias for the snapshot channel
pub type SnapshotChannel = Channel<CriticalSectionRawMutex, LampSnapshot, SNAPSHOT_CHANNEL_SIZE>;

/// Type alias for the snapshot sender
pub type SnapshotSender =
    Sender<'static, CriticalSectionRawMutex, LampSnapshot, SNAPSHOT_CHANNEL_SIZE>;

/// Type alias for the snapshot receiver
pub type SnapshotReceiver =
    Receiver<'static, CriticalSectionRawMutex, LampSnapshot, SNAPSHOT_CHANNEL_SIZE>;

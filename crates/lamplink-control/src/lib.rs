#![no_std]

//! Lamp state coordination.
//!
//! Architecture layers:
//! - `entity` - the canonical [`LampState`] owned by the coordinator
//! - `dto` - requests flowing in and snapshots flowing out
//! - `ports` - traits the firmware implements (persistence, pairing
//!   indication, snapshot publication)
//! - `coordinator` - the [`LampCoordinator`] state machine bridging the
//!   serial line, the request queue and the UI layer
//! - `channel` - bounded channel aliases for the two queues
//!
//! The coordinator is hardware-free and synchronous; the firmware's link
//! task feeds it received bytes, drains the request queue into it and
//! transmits the frames it hands back.

pub mod channel;
pub mod coordinator;
pub mod dto;
pub mod entity;
pub mod ports;

pub use channel::{
    RequestChannel, RequestReceiver, RequestSender, SnapshotChannel, SnapshotReceiver,
    SnapshotSender, REQUEST_CHANNEL_SIZE, SNAPSHOT_CHANNEL_SIZE,
};
pub use coordinator::LampCoordinator;
pub use dto::{LampRequest, LampSnapshot, StoredSettings};
pub use entity::LampState;
pub use ports::{PairingIndicator, SettingsStore, SnapshotPublisher};

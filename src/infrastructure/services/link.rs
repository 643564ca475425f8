//! Channel plumbing around the lamp coordinator.
//!
//! Producers (buttons, web handlers) submit requests here; the
//! coordinator's snapshots flow back out. Both directions are bounded
//! and drop-on-full: a lost request is re-sampled by its producer, a
//! lost snapshot is superseded by the next one.

use lamplink_control::{
    LampRequest, LampSnapshot, PairingIndicator, RequestChannel, RequestReceiver,
    SnapshotChannel, SnapshotPublisher, SnapshotReceiver,
};

use crate::infrastructure::tasks::led::{set_blink_mode, BlinkMode};

static LAMP_REQUESTS: RequestChannel = RequestChannel::new();
static LAMP_SNAPSHOTS: SnapshotChannel = SnapshotChannel::new();

pub fn request_receiver() -> RequestReceiver {
    LAMP_REQUESTS.receiver()
}

pub fn snapshot_receiver() -> SnapshotReceiver {
    LAMP_SNAPSHOTS.receiver()
}

/// Best-effort submission into the coordinator's request queue.
pub fn submit_request(request: LampRequest) {
    let _ = LAMP_REQUESTS.try_send(request);
}

/// Publishes coordinator snapshots onto the UI channel.
pub struct ChannelSnapshotPublisher;

impl SnapshotPublisher for ChannelSnapshotPublisher {
    fn publish(&mut self, snapshot: LampSnapshot) {
        let _ = LAMP_SNAPSHOTS.try_send(snapshot);
    }
}

/// Maps pairing progress onto the status LED.
pub struct LedPairingIndicator;

impl PairingIndicator for LedPairingIndicator {
    fn pairing_started(&mut self) {
        set_blink_mode(BlinkMode::Learn);
    }

    fn pairing_completed(&mut self) {
        set_blink_mode(BlinkMode::Client);
    }
}

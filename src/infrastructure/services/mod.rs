mod link;
mod persistence;

pub use link::{
    request_receiver, snapshot_receiver, submit_request, ChannelSnapshotPublisher,
    LedPairingIndicator,
};
pub use persistence::{persistence_receiver, queue_settings_save, QueuedSettingsStore,
    SettingsReceiver,
};

use lamplink_protocol::LampId;

use crate::dto::LampSnapshot;

/// Power-loss-safe store for the pairing identity and last known levels.
///
/// Writes are best-effort; a failed write costs at most one reboot's worth
/// of state, never the running state.
pub trait SettingsStore {
    /// Persist the bound lamp identity, or clear it with `None`.
    fn store_identity(&mut self, identity: Option<LampId>) -> Result<(), ()>;

    /// Persist the last known intensity and color balance.
    fn store_levels(&mut self, intensity: u8, color_balance: u8) -> Result<(), ()>;
}

/// Pairing progress indication toward the status LED / UI layer.
pub trait PairingIndicator {
    /// The device is unpaired and waiting to learn an identity.
    fn pairing_started(&mut self);

    /// An identity has been learned and bound.
    fn pairing_completed(&mut self);
}

/// Best-effort sink for state snapshots toward the UI layer.
///
/// Implementations must not block; a dropped snapshot is superseded by
/// the next one.
pub trait SnapshotPublisher {
    fn publish(&mut self, snapshot: LampSnapshot);
}

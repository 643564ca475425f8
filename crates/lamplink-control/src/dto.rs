use heapless::String;
use lamplink_protocol::{Command, LampId, ID_HEX_LEN, LEVEL_MIN};

/// A user intent submitted to the coordinator's request queue.
///
/// Source-neutral: buttons submit the first three variants, the web layer
/// may submit any of them. One request is applied per coordinator tick,
/// strictly in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampRequest {
    /// Flip on/off; turning off stores the current levels for the next boot.
    Toggle,
    /// Step brightness up one level, turning the lamp on first if needed.
    IncreaseIntensity,
    /// Step brightness down one level, turning the lamp on first if needed.
    DecreaseIntensity,
    On,
    Off,
    /// Forget the bound lamp and re-enter pairing.
    Learn,
    /// Set the yellow-to-white balance; turns the lamp on if it was not
    /// already commanded on.
    SetHue(u8),
    /// Set the brightness; turns the lamp on if it was not already
    /// commanded on.
    SetIntensity(u8),
}

/// Immutable view of the lamp state handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LampSnapshot {
    /// Bound identity as lowercase hex; empty while unpaired.
    pub identity_hex: String<ID_HEX_LEN>,
    pub bound: bool,
    pub intensity: u8,
    pub color_balance: u8,
    pub command: Command,
}

impl LampSnapshot {
    /// Snapshot of a device that has not seen any state yet.
    pub const fn unknown() -> Self {
        Self {
            identity_hex: String::new(),
            bound: false,
            intensity: LEVEL_MIN,
            color_balance: LEVEL_MIN,
            command: Command::Unknown,
        }
    }
}

/// Values read back from the settings store at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredSettings {
    pub identity: Option<LampId>,
    pub intensity: u8,
    pub color_balance: u8,
}

impl StoredSettings {
    /// Settings of a device that has never been paired.
    pub const fn empty() -> Self {
        Self {
            identity: None,
            intensity: LEVEL_MIN,
            color_balance: LEVEL_MIN,
        }
    }
}

impl Default for StoredSettings {
    fn default() -> Self {
        Self::empty()
    }
}

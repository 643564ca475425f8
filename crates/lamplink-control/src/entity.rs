use lamplink_protocol::{Command, LampId, LEVEL_MIN};

/// Canonical state of the paired lamp.
///
/// Owned and mutated exclusively by the coordinator; everyone else only
/// ever sees snapshot copies.
#[derive(Debug, Clone)]
pub struct LampState {
    /// Identity bound during pairing; `None` until a lamp has been learned.
    pub identity: Option<LampId>,
    pub is_on: bool,
    /// Brightness level, `0x00..=0x17`.
    pub intensity: u8,
    /// Yellow-to-white level, `0x00..=0x17`.
    pub color_balance: u8,
    /// Last command applied to or observed for this lamp.
    pub last_command: Command,
}

impl LampState {
    pub const fn new() -> Self {
        Self {
            identity: None,
            is_on: false,
            intensity: LEVEL_MIN,
            color_balance: LEVEL_MIN,
            last_command: Command::Unknown,
        }
    }
}

impl Default for LampState {
    fn default() -> Self {
        Self::new()
    }
}

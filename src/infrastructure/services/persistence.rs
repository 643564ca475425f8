//! Write path for persisted settings.
//!
//! Writers never touch flash directly; they push the full settings
//! record onto a bounded channel and the persistence task debounces the
//! actual flash write.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use lamplink_control::SettingsStore;
use lamplink_protocol::LampId;

use crate::infrastructure::repositories::DeviceSettings;

const SETTINGS_CHANNEL_SIZE: usize = 4;

/// Type alias for the settings receiver
pub type SettingsReceiver =
    Receiver<'static, CriticalSectionRawMutex, DeviceSettings, SETTINGS_CHANNEL_SIZE>;

type SettingsChannel = Channel<CriticalSectionRawMutex, DeviceSettings, SETTINGS_CHANNEL_SIZE>;

static SETTINGS_CHANNEL_STATIC: SettingsChannel = Channel::new();

pub fn persistence_receiver() -> SettingsReceiver {
    SETTINGS_CHANNEL_STATIC.receiver()
}

/// Best-effort enqueue of a settings record for the persistence task.
pub fn queue_settings_save(settings: DeviceSettings) {
    let _ = SETTINGS_CHANNEL_STATIC.try_send(settings);
}

/// The coordinator's settings port, backed by the persistence channel.
///
/// Keeps its own copy of the full record so every queued save carries
/// the WiFi configuration along unchanged.
pub struct QueuedSettingsStore {
    settings: DeviceSettings,
}

impl QueuedSettingsStore {
    pub fn new(settings: DeviceSettings) -> Self {
        Self { settings }
    }
}

impl SettingsStore for QueuedSettingsStore {
    fn store_identity(&mut self, identity: Option<LampId>) -> Result<(), ()> {
        self.settings.lamp.identity = identity;
        queue_settings_save(self.settings.clone());
        Ok(())
    }

    fn store_levels(&mut self, intensity: u8, color_balance: u8) -> Result<(), ()> {
        self.settings.lamp.intensity = intensity;
        self.settings.lamp.color_balance = color_balance;
        queue_settings_save(self.settings.clone());
        Ok(())
    }
}

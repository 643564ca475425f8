//! Persisted device settings.
//!
//! One flash record holds everything the device must remember across
//! power loss: WiFi credentials, the paired lamp identity and the last
//! known levels. The record sits in its own partition behind a magic
//! header; a missing or torn record falls back to defaults (unprovisioned,
//! unpaired).

use core::str::FromStr;

use bytemuck::{Pod, Zeroable};
use embedded_storage::nor_flash::{NorFlash, ReadNorFlash};
use esp_storage::FlashStorage;
use heapless::String;
use lamplink_control::StoredSettings;
use lamplink_protocol::{LampId, ID_LEN};

use crate::config::WifiConfig;

const MAGIC_HEADER: u16 = 0x4C4C;
const MAGIC_HEADER_SIZE: usize = MAGIC_HEADER.to_le_bytes().len();

/// Flash erase granularity.
const BLOCK_SIZE: u32 = 4096;

#[derive(Debug)]
pub enum StorageError {
    DriverError,
    InvalidMagicHeader,
    InvalidData,
}

/// Runtime view of the persisted record.
#[derive(Debug, Clone, Default)]
pub struct DeviceSettings {
    pub wifi: WifiConfig,
    pub lamp: StoredSettings,
}

#[derive(Debug, Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct PersistentWifiConfig {
    ssid: [u8; 32],
    password: [u8; 64],
}

impl From<&WifiConfig> for PersistentWifiConfig {
    fn from(config: &WifiConfig) -> Self {
        Self {
            ssid: string_to_array(&config.ssid),
            password: string_to_array(&config.password),
        }
    }
}

impl From<&PersistentWifiConfig> for WifiConfig {
    fn from(config: &PersistentWifiConfig) -> Self {
        Self {
            ssid: parse_padded_string(&config.ssid),
            password: parse_padded_string(&config.password),
        }
    }
}

#[derive(Debug, Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct PersistentLampSettings {
    identity: [u8; ID_LEN],
    identity_set: u8,
    intensity: u8,
    color_balance: u8,
    _padding: [u8; 2],
}

impl From<&StoredSettings> for PersistentLampSettings {
    fn from(settings: &StoredSettings) -> Self {
        Self {
            identity: settings.identity.unwrap_or([0; ID_LEN]),
            identity_set: u8::from(settings.identity.is_some()),
            intensity: settings.intensity,
            color_balance: settings.color_balance,
            _padding: [0; 2],
        }
    }
}

impl From<&PersistentLampSettings> for StoredSettings {
    fn from(settings: &PersistentLampSettings) -> Self {
        let identity: Option<LampId> = if settings.identity_set != 0 {
            Some(settings.identity)
        } else {
            None
        };
        Self {
            identity,
            intensity: settings.intensity,
            color_balance: settings.color_balance,
        }
    }
}

#[derive(Debug, Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct PersistentDeviceSettings {
    wifi: PersistentWifiConfig,
    lamp: PersistentLampSettings,
}

const RECORD_SIZE: usize = MAGIC_HEADER_SIZE + size_of::<PersistentDeviceSettings>();
// Flash writes are word-granular; round the buffer up.
const RECORD_BUFFER_SIZE: usize = (RECORD_SIZE + 3) & !3;

impl From<&DeviceSettings> for PersistentDeviceSettings {
    fn from(settings: &DeviceSettings) -> Self {
        Self {
            wifi: (&settings.wifi).into(),
            lamp: (&settings.lamp).into(),
        }
    }
}

impl From<&PersistentDeviceSettings> for DeviceSettings {
    fn from(settings: &PersistentDeviceSettings) -> Self {
        Self {
            wifi: (&settings.wifi).into(),
            lamp: (&settings.lamp).into(),
        }
    }
}

/// Settings record access over the flash owned by the persistence task.
///
/// The raw pointer is a single-owner assumption: only the persistence
/// task (and the boot code before it is spawned) ever touches the flash.
pub struct SettingsStorage {
    flash: *mut FlashStorage<'static>,
    offset: u32,
}

// Safety: see above; the pointer is never accessed from two tasks.
unsafe impl Send for SettingsStorage {}
unsafe impl Sync for SettingsStorage {}

impl SettingsStorage {
    pub fn new(flash: *mut FlashStorage<'static>, offset: u32) -> Self {
        Self { flash, offset }
    }

    /// Load the settings record from flash.
    pub fn load(&mut self) -> Result<DeviceSettings, StorageError> {
        let mut buffer = [0u8; RECORD_BUFFER_SIZE];
        // Safety: single-owner, see struct docs.
        unsafe { &mut *self.flash }
            .read(self.offset, &mut buffer)
            .map_err(|_| StorageError::DriverError)?;

        let magic = u16::from_le_bytes([buffer[0], buffer[1]]);
        if magic != MAGIC_HEADER {
            return Err(StorageError::InvalidMagicHeader);
        }
        let record: &PersistentDeviceSettings =
            bytemuck::try_from_bytes(&buffer[MAGIC_HEADER_SIZE..RECORD_SIZE])
                .map_err(|_| StorageError::InvalidData)?;
        Ok(record.into())
    }

    /// Write the settings record, erasing the block first.
    pub fn save(&mut self, settings: &DeviceSettings) -> Result<(), StorageError> {
        let record = PersistentDeviceSettings::from(settings);
        let mut buffer = [0u8; RECORD_BUFFER_SIZE];
        buffer[..MAGIC_HEADER_SIZE].copy_from_slice(&MAGIC_HEADER.to_le_bytes());
        buffer[MAGIC_HEADER_SIZE..RECORD_SIZE].copy_from_slice(bytemuck::bytes_of(&record));

        // Safety: single-owner, see struct docs.
        let flash = unsafe { &mut *self.flash };
        flash
            .erase(self.offset, self.offset + BLOCK_SIZE)
            .map_err(|_| StorageError::DriverError)?;
        flash
            .write(self.offset, &buffer)
            .map_err(|_| StorageError::DriverError)
    }
}

fn string_to_array<const N: usize>(value: &String<N>) -> [u8; N] {
    let mut array = [0u8; N];
    array[..value.len()].copy_from_slice(value.as_bytes());
    array
}

fn parse_padded_string<const N: usize>(value: &[u8; N]) -> String<N> {
    let end = value.iter().position(|&b| b == 0).unwrap_or(N);
    core::str::from_utf8(&value[..end])
        .ok()
        .and_then(|s| String::from_str(s).ok())
        .unwrap_or_default()
}

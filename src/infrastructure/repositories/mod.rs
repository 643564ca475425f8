mod settings;

pub use settings::{DeviceSettings, SettingsStorage, StorageError};

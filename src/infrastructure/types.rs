use esp_hal::uart::Uart;
use esp_hal::Async;
use lamplink_control::LampCoordinator;

use crate::infrastructure::services::{
    ChannelSnapshotPublisher, LedPairingIndicator, QueuedSettingsStore,
};

/// Coordinator wired to the firmware's port implementations.
pub type DimmerCoordinator =
    LampCoordinator<QueuedSettingsStore, LedPairingIndicator, ChannelSnapshotPublisher>;

/// Async UART of the radio link.
pub type LinkUart = Uart<'static, Async>;

//! Debounced flash writer for device settings.
//!
//! Settings updates can arrive in bursts (pairing immediately followed
//! by level writes); only the last record within the settle window hits
//! the flash.

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};
use esp_println::println;

use crate::infrastructure::repositories::{DeviceSettings, SettingsStorage};
use crate::infrastructure::services::SettingsReceiver;

const PERSISTENCE_DELAY: Duration = Duration::from_millis(1000);

#[embassy_executor::task]
pub async fn persistence_task(mut storage: SettingsStorage, receiver: SettingsReceiver) {
    println!("persistence: starting settings persistence task");
    let mut pending: Option<DeviceSettings> = None;

    loop {
        match pending.take() {
            None => {
                pending = Some(receiver.receive().await);
            }
            Some(settings) => {
                let receive_fut = receiver.receive();
                let timer_fut = Timer::after(PERSISTENCE_DELAY);

                match select(receive_fut, timer_fut).await {
                    Either::First(newer) => {
                        pending = Some(newer);
                    }
                    Either::Second(()) => {
                        if storage.save(&settings).is_err() {
                            println!("persistence: error saving settings");
                        }
                    }
                }
            }
        }
    }
}

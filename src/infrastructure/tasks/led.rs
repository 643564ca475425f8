//! Status LED task.
//!
//! One GPIO LED signals the device mode through its blink pattern. Mode
//! changes arrive over a small bounded channel; senders never block.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Timer;
use esp_hal::gpio::Output;

const LED_MODE_CHANNEL_SIZE: usize = 5;

/// Blink pattern of the status LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkMode {
    /// LED off.
    Idle,
    /// Setup AP is running:  .. .. ..
    AccessPoint,
    /// Normal operation:  - - - -
    Client,
    /// Something is wrong:  . . . . .
    Error,
    /// Waiting to pair:  . - . -
    Learn,
}

static LED_MODES: Channel<CriticalSectionRawMutex, BlinkMode, LED_MODE_CHANNEL_SIZE> =
    Channel::new();

/// Best-effort switch of the LED pattern.
pub fn set_blink_mode(mode: BlinkMode) {
    let _ = LED_MODES.try_send(mode);
}

#[embassy_executor::task]
pub async fn led_task(mut pin: Output<'static>) {
    let mut mode = BlinkMode::Idle;

    loop {
        if let Ok(next) = LED_MODES.try_receive() {
            mode = next;
        }

        match mode {
            BlinkMode::Idle => {
                pin.set_low();
                Timer::after_millis(100).await;
            }
            BlinkMode::AccessPoint => {
                for _ in 0..2 {
                    pin.set_high();
                    Timer::after_millis(100).await;
                    pin.set_low();
                    Timer::after_millis(100).await;
                }
                Timer::after_millis(500).await;
            }
            BlinkMode::Client => {
                pin.set_high();
                Timer::after_millis(500).await;
                pin.set_low();
                Timer::after_millis(500).await;
            }
            BlinkMode::Error => {
                pin.set_high();
                Timer::after_millis(100).await;
                pin.set_low();
                Timer::after_millis(100).await;
            }
            BlinkMode::Learn => {
                pin.set_high();
                Timer::after_millis(100).await;
                pin.set_low();
                Timer::after_millis(100).await;

                pin.set_high();
                Timer::after_millis(500).await;
                pin.set_low();
                Timer::after_millis(500).await;
            }
        }
    }
}

//! Hardware buttons.
//!
//! Three buttons: toggle (boot button), brighter and dimmer. The task
//! polls them and submits requests into the coordinator queue; a lost
//! request is harmless because held buttons are re-sampled every poll.

use embassy_time::Timer;
use esp_hal::gpio::Input;
use esp_println::println;
use lamplink_control::LampRequest;

use crate::infrastructure::services::submit_request;

const POLL_INTERVAL_MS: u64 = 50;
const DEBOUNCE_MS: u64 = 20;

/// Level-polled button with debounce and click edge detection.
struct Button {
    input: Input<'static>,
    last_state: bool,
}

impl Button {
    fn new(input: Input<'static>) -> Self {
        Self {
            input,
            last_state: false,
        }
    }

    /// Debounced level check: low, and still low after the settle time.
    async fn is_pressed(&mut self) -> bool {
        if self.input.is_low() {
            Timer::after_millis(DEBOUNCE_MS).await;
            return self.input.is_low();
        }
        false
    }

    /// True once per press.
    async fn clicked(&mut self) -> bool {
        let pressed = self.is_pressed().await;
        if pressed && !self.last_state {
            self.last_state = true;
            return true;
        }
        if !pressed {
            self.last_state = false;
        }
        false
    }
}

#[embassy_executor::task]
pub async fn button_task(
    toggle: Input<'static>,
    brighter: Input<'static>,
    dimmer: Input<'static>,
) {
    println!("buttons: starting button task");

    let mut toggle = Button::new(toggle);
    let mut brighter = Button::new(brighter);
    let mut dimmer = Button::new(dimmer);

    loop {
        if toggle.clicked().await {
            submit_request(LampRequest::Toggle);
        } else {
            if brighter.is_pressed().await {
                submit_request(LampRequest::IncreaseIntensity);
            }
            if dimmer.is_pressed().await {
                submit_request(LampRequest::DecreaseIntensity);
            }
        }

        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}

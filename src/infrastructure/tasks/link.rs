//! Lamp link task - sole owner of the serial port and the coordinator.
//!
//! Each tick drains whatever the UART receiver has buffered into the
//! coordinator, applies at most one queued request and transmits the
//! resulting frame. The short end-of-tick sleep is the only suspension
//! point, so requests and received frames are picked up within a few
//! milliseconds without busy-waiting the core.

use embassy_time::Timer;
use esp_println::println;
use lamplink_control::RequestReceiver;

use crate::infrastructure::types::{DimmerCoordinator, LinkUart};

const RX_CHUNK_SIZE: usize = 64;

#[embassy_executor::task]
pub async fn link_task(
    mut uart: LinkUart,
    mut coordinator: DimmerCoordinator,
    requests: RequestReceiver,
) {
    println!("link: starting lamp link task");

    let mut rx_chunk = [0u8; RX_CHUNK_SIZE];
    loop {
        // Drain the receive buffer; the parser absorbs line noise, so
        // read errors only cost the bytes the driver dropped anyway.
        while let Ok(count) = uart.read_buffered(&mut rx_chunk) {
            if count == 0 {
                break;
            }
            for &byte in &rx_chunk[..count] {
                coordinator.on_byte(byte);
            }
        }

        if let Ok(request) = requests.try_receive() {
            if let Some(frame) = coordinator.on_request(request) {
                // A lost write self-heals: the next request retransmits
                // the full recomputed state.
                if uart.write_async(frame.as_bytes()).await.is_ok() {
                    let _ = uart.flush_async().await;
                }
            }
        }

        Timer::after_millis(1).await;
    }
}

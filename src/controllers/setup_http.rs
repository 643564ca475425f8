//! HTTP controller for the provisioning page served by the setup AP.

use embassy_time::{Duration, Timer};
use esp_println::println;
use heapless::String;
use lamplink_control::StoredSettings;
use serde::Deserialize;

use crate::config::WifiConfig;
use crate::core::net::http::{
    HttpConnection, HttpHandler, HttpMethod, HttpResult, ResponseHeaders,
};
use crate::infrastructure::repositories::DeviceSettings;
use crate::infrastructure::services::queue_settings_save;

use super::pages::SETUP_PAGE;

/// Margin for the debounced persistence task to hit the flash before the
/// device restarts into station mode.
const RESTART_DELAY: Duration = Duration::from_millis(3000);

/// `POST /setup` body.
#[derive(Debug, Deserialize)]
struct SetupChange {
    ssid: String<32>,
    password: String<64>,
}

/// Serves the provisioning page. Keeps the lamp settings read at boot so
/// a re-provisioned device does not lose its pairing.
#[derive(Debug)]
pub struct SetupHttpController {
    lamp: StoredSettings,
}

impl SetupHttpController {
    pub fn new(lamp: StoredSettings) -> Self {
        Self { lamp }
    }
}

impl HttpHandler for SetupHttpController {
    async fn handle_request(&self, conn: HttpConnection<'_>) -> HttpResult {
        let mut conn = conn;
        let (method, path) = conn.route();
        match (method, path.as_str()) {
            (HttpMethod::Get, "/") => conn.write_html(SETUP_PAGE).await,
            (HttpMethod::Post, "/setup") => self.handle_setup(&mut conn).await,
            _ => conn.write_headers(&ResponseHeaders::not_found()).await,
        }
    }
}

impl SetupHttpController {
    async fn handle_setup(&self, conn: &mut HttpConnection<'_>) -> HttpResult {
        let change = conn.read_json::<SetupChange>().await?;
        println!("setup: storing credentials for '{}'", change.ssid.as_str());

        queue_settings_save(DeviceSettings {
            wifi: WifiConfig {
                ssid: change.ssid,
                password: change.password,
            },
            lamp: self.lamp,
        });

        conn.write_headers(&ResponseHeaders::no_content()).await?;

        Timer::after(RESTART_DELAY).await;
        esp_hal::system::software_reset();
    }
}

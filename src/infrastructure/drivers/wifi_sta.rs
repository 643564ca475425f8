//! WiFi station mode.
//!
//! Connects to the provisioned network and keeps reconnecting if the
//! connection drops. DHCP with a fixed hostname; no static addressing.

use embassy_executor::Spawner;
use embassy_net::{DhcpConfig, Runner, Stack, StackResources};
use embassy_time::{Duration, Timer};
use esp_hal::peripherals::WIFI;
use esp_println::println;
use esp_radio::wifi::{
    AuthMethod, ClientConfig, Config, ModeConfig, WifiController, WifiDevice, WifiEvent,
    WifiStaState,
};
use heapless::String;
use static_cell::make_static;

use super::random::get_seed;
use crate::config::{STA_HOSTNAME, WifiConfig};
use crate::infrastructure::tasks::led::{set_blink_mode, BlinkMode};

const MAX_NETWORK_CONNECTIONS: usize = 6;

/// Start station mode and wait for full connectivity (link + address).
pub async fn start_wifi_sta(
    spawner: Spawner,
    wifi_device: WIFI<'static>,
    config: WifiConfig,
) -> Stack<'static> {
    let esp_radio_ctrl = &*make_static!(esp_radio::init().unwrap());
    let (controller, interfaces) =
        esp_radio::wifi::new(esp_radio_ctrl, wifi_device, Config::default()).unwrap();

    let mut dhcp_config = DhcpConfig::default();
    dhcp_config.hostname = Some(String::try_from(STA_HOSTNAME).unwrap_or_default());
    let net_config = embassy_net::Config::dhcpv4(dhcp_config);

    let network_resources = make_static!(StackResources::<MAX_NETWORK_CONNECTIONS>::new());
    let (stack, runner) =
        embassy_net::new(interfaces.sta, net_config, network_resources, get_seed());

    spawner.spawn(wifi_connection_task(controller, config)).ok();
    spawner.spawn(network_runner_task(runner)).ok();

    wait_for_connection(stack).await;
    stack
}

/// Background task keeping the station associated; reconnects on loss.
#[embassy_executor::task]
async fn wifi_connection_task(mut controller: WifiController<'static>, config: WifiConfig) {
    loop {
        // Wait until we're no longer connected
        if esp_radio::wifi::sta_state() == WifiStaState::Connected {
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            Timer::after(Duration::from_millis(2000)).await;
        }
        if !matches!(controller.is_started(), Ok(true)) {
            let client_config = if config.password.is_empty() {
                ClientConfig::default()
                    .with_ssid(config.ssid.as_str().into())
                    .with_auth_method(AuthMethod::None)
            } else {
                ClientConfig::default()
                    .with_ssid(config.ssid.as_str().into())
                    .with_password(config.password.as_str().into())
            };
            let mode_config = ModeConfig::Client(client_config);
            controller.set_config(&mode_config).unwrap();
            controller.start_async().await.unwrap();
        }

        println!("network: connecting to '{}'", config.ssid.as_str());
        if let Err(error) = controller.connect_async().await {
            println!("network: error connecting: {error:?}");
            set_blink_mode(BlinkMode::Error);
            Timer::after(Duration::from_millis(5000)).await;
        }
    }
}

/// Background task for running the network stack
#[embassy_executor::task]
async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}

/// Wait for the link to come up and DHCP to assign an address.
async fn wait_for_connection(stack: Stack<'_>) {
    loop {
        if stack.is_link_up() {
            break;
        }
        Timer::after(Duration::from_millis(100)).await;
    }

    loop {
        if let Some(config) = stack.config_v4() {
            println!("network: got address {}", config.address);
            break;
        }
        Timer::after(Duration::from_millis(100)).await;
    }
}

//! WiFi access-point mode for provisioning.
//!
//! Brings up an open AP with a static address (192.168.4.1/24) so a
//! phone can reach the setup page; the DHCP server task hands out the
//! client addresses.

use core::fmt::Write;

use embassy_executor::Spawner;
use embassy_net::{Ipv4Address, Ipv4Cidr, Runner, Stack, StackResources, StaticConfigV4};
use embassy_time::{Duration, Timer};
use esp_hal::peripherals::WIFI;
use esp_println::println;
use esp_radio::wifi::{
    AccessPointConfig, AuthMethod, Config, ModeConfig, WifiController, WifiDevice,
};
use static_cell::make_static;

use super::random::get_seed;
use crate::config::SETUP_AP_SSID_PREFIX;

const MAX_NETWORK_CONNECTIONS: usize = 6;

/// Address of the device inside its own AP network.
pub const AP_IP_ADDRESS: Ipv4Address = Ipv4Address::new(192, 168, 4, 1);
const AP_PREFIX_LEN: u8 = 24;

/// Start AP mode and wait for the link to come up.
pub async fn start_wifi_ap(spawner: Spawner, wifi_device: WIFI<'static>) -> Stack<'static> {
    let esp_radio_ctrl = &*make_static!(esp_radio::init().unwrap());
    let (controller, interfaces) =
        esp_radio::wifi::new(esp_radio_ctrl, wifi_device, Config::default()).unwrap();

    let static_config = StaticConfigV4 {
        address: Ipv4Cidr::new(AP_IP_ADDRESS, AP_PREFIX_LEN),
        gateway: Some(AP_IP_ADDRESS),
        dns_servers: heapless::Vec::default(),
    };
    let net_config = embassy_net::Config::ipv4_static(static_config);

    let network_resources = make_static!(StackResources::<MAX_NETWORK_CONNECTIONS>::new());
    let (stack, runner) =
        embassy_net::new(interfaces.ap, net_config, network_resources, get_seed());

    spawner.spawn(wifi_ap_task(controller)).ok();
    spawner.spawn(ap_network_runner_task(runner)).ok();

    loop {
        if stack.is_link_up() {
            break;
        }
        Timer::after(Duration::from_millis(100)).await;
    }
    stack
}

/// Background task keeping the open setup AP running.
#[embassy_executor::task]
async fn wifi_ap_task(mut controller: WifiController<'static>) {
    let ssid = format_ssid();
    println!("setup_ap: starting AP '{}'", ssid.as_str());

    let ap_config = AccessPointConfig::default()
        .with_ssid(ssid.as_str().into())
        .with_auth_method(AuthMethod::None);
    controller
        .set_config(&ModeConfig::AccessPoint(ap_config))
        .unwrap();
    controller.start_async().await.unwrap();

    println!("setup_ap: AP started");
    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}

/// Background task for running the network stack
#[embassy_executor::task]
async fn ap_network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}

/// SSID with a MAC-derived suffix so neighbouring devices stay apart.
fn format_ssid() -> heapless::String<32> {
    let mac = esp_hal::efuse::Efuse::mac_address();
    let suffix = u16::from_be_bytes([mac[4], mac[5]]);
    let mut ssid = heapless::String::new();
    let _ = write!(ssid, "{SETUP_AP_SSID_PREFIX}-{suffix:04X}");
    ssid
}

//! DHCP server task for the setup access point.

use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::{IpEndpoint, Ipv4Address, Stack};
use esp_println::println;

use crate::core::net::dhcp::{build_reply, parse_request, REPLY_BUFFER_SIZE};

const DHCP_SERVER_PORT: u16 = 67;
const DHCP_CLIENT_PORT: u16 = 68;

#[embassy_executor::task]
pub async fn dhcp_server_task(stack: Stack<'static>, server_ip: Ipv4Address) {
    let mut rx_meta = [PacketMetadata::EMPTY; 4];
    let mut rx_buffer = [0u8; 1024];
    let mut tx_meta = [PacketMetadata::EMPTY; 4];
    let mut tx_buffer = [0u8; 1024];

    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );
    if socket.bind(DHCP_SERVER_PORT).is_err() {
        println!("dhcp: failed to bind server port");
        return;
    }

    println!("dhcp: serving leases on port {DHCP_SERVER_PORT}");
    let mut packet = [0u8; 600];
    let mut reply = [0u8; REPLY_BUFFER_SIZE];
    let broadcast = IpEndpoint::new(Ipv4Address::BROADCAST.into(), DHCP_CLIENT_PORT);

    loop {
        let Ok((received, _meta)) = socket.recv_from(&mut packet).await else {
            continue;
        };
        let Some(request) = parse_request(&packet[..received]) else {
            continue;
        };
        if let Some(length) = build_reply(server_ip, &request, &mut reply) {
            let _ = socket.send_to(&reply[..length], broadcast).await;
        }
    }
}

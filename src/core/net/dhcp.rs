//! Minimal stateless DHCP responder for the setup access point.
//!
//! Hands out addresses derived from the client MAC so no lease table is
//! needed; good enough for the single phone that connects during
//! provisioning.

use embassy_net::Ipv4Address;

const OP_BOOTREQUEST: u8 = 1;
const OP_BOOTREPLY: u8 = 2;

const MSG_DISCOVER: u8 = 1;
const MSG_OFFER: u8 = 2;
const MSG_REQUEST: u8 = 3;
const MSG_ACK: u8 = 5;

const OPT_SUBNET_MASK: u8 = 1;
const OPT_ROUTER: u8 = 3;
const OPT_DNS: u8 = 6;
const OPT_LEASE_TIME: u8 = 51;
const OPT_MESSAGE_TYPE: u8 = 53;
const OPT_SERVER_ID: u8 = 54;
const OPT_END: u8 = 255;

const MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];

/// BOOTP header plus magic cookie.
const MIN_PACKET_SIZE: usize = 240;

/// Replies fit comfortably; options add ~40 bytes to the header.
pub const REPLY_BUFFER_SIZE: usize = 300;

const LEASE_TIME_SECS: u32 = 3600;
const SUBNET_MASK: Ipv4Address = Ipv4Address::new(255, 255, 255, 0);

/// The parts of a client request the responder cares about.
#[derive(Debug)]
pub struct DhcpRequest {
    xid: [u8; 4],
    client_mac: [u8; 6],
    message_type: u8,
}

/// Parse a BOOTREQUEST; returns `None` for anything else.
pub fn parse_request(packet: &[u8]) -> Option<DhcpRequest> {
    if packet.len() < MIN_PACKET_SIZE || packet[0] != OP_BOOTREQUEST {
        return None;
    }
    if packet[236..240] != MAGIC_COOKIE {
        return None;
    }

    let mut xid = [0u8; 4];
    xid.copy_from_slice(&packet[4..8]);
    let mut client_mac = [0u8; 6];
    client_mac.copy_from_slice(&packet[28..34]);

    let message_type = find_option(&packet[MIN_PACKET_SIZE..], OPT_MESSAGE_TYPE)
        .and_then(|data| data.first().copied())?;

    Some(DhcpRequest {
        xid,
        client_mac,
        message_type,
    })
}

/// Build the reply for a request into `buffer`, returning its length.
///
/// DISCOVER is answered with OFFER, REQUEST with ACK; other message
/// types get no reply.
pub fn build_reply(
    server_ip: Ipv4Address,
    request: &DhcpRequest,
    buffer: &mut [u8],
) -> Option<usize> {
    let reply_type = match request.message_type {
        MSG_DISCOVER => MSG_OFFER,
        MSG_REQUEST => MSG_ACK,
        _ => return None,
    };
    let client_ip = allocate_ip(server_ip, &request.client_mac);

    buffer[..REPLY_BUFFER_SIZE].fill(0);
    buffer[0] = OP_BOOTREPLY;
    buffer[1] = 1; // htype: Ethernet
    buffer[2] = 6; // hlen
    buffer[4..8].copy_from_slice(&request.xid);
    buffer[10..12].copy_from_slice(&[0x80, 0x00]); // broadcast flag
    buffer[16..20].copy_from_slice(&client_ip.octets());
    buffer[20..24].copy_from_slice(&server_ip.octets());
    buffer[28..34].copy_from_slice(&request.client_mac);
    buffer[236..240].copy_from_slice(&MAGIC_COOKIE);

    let mut at = MIN_PACKET_SIZE;
    at = put_option(buffer, at, OPT_MESSAGE_TYPE, &[reply_type]);
    at = put_option(buffer, at, OPT_SERVER_ID, &server_ip.octets());
    at = put_option(buffer, at, OPT_LEASE_TIME, &LEASE_TIME_SECS.to_be_bytes());
    at = put_option(buffer, at, OPT_SUBNET_MASK, &SUBNET_MASK.octets());
    at = put_option(buffer, at, OPT_ROUTER, &server_ip.octets());
    at = put_option(buffer, at, OPT_DNS, &server_ip.octets());
    buffer[at] = OPT_END;
    Some(at + 1)
}

/// Derive a stable host address from the client MAC, skipping the
/// server's own address.
fn allocate_ip(server_ip: Ipv4Address, mac: &[u8; 6]) -> Ipv4Address {
    let server = server_ip.octets();
    let host = (mac[5] % 49) + 2;
    Ipv4Address::new(server[0], server[1], server[2], host)
}

fn put_option(buffer: &mut [u8], at: usize, code: u8, data: &[u8]) -> usize {
    buffer[at] = code;
    buffer[at + 1] = data.len() as u8;
    buffer[at + 2..at + 2 + data.len()].copy_from_slice(data);
    at + 2 + data.len()
}

fn find_option(options: &[u8], wanted: u8) -> Option<&[u8]> {
    let mut at = 0;
    while at < options.len() {
        let code = options[at];
        if code == OPT_END {
            break;
        }
        if code == 0 {
            at += 1;
            continue;
        }
        if at + 1 >= options.len() {
            break;
        }
        let length = options[at + 1] as usize;
        if at + 2 + length > options.len() {
            break;
        }
        if code == wanted {
            return Some(&options[at + 2..at + 2 + length]);
        }
        at += 2 + length;
    }
    None
}

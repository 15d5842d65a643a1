//! ARP reply construction

use crate::packet::ArpPacket;
use arpwarden_core::{ethertypes, EthernetFrame, InterfaceBinding, MacAddr};
use std::net::Ipv4Addr;

/// Build the reply frame for a who-has request addressed to the local IP.
///
/// The reply carries the local binding in the sender fields and the
/// requester's pair in the target fields, wrapped in a frame addressed
/// from the local MAC to the requester's MAC.
pub fn reply_frame(
    local: InterfaceBinding,
    requester_ip: Ipv4Addr,
    requester_mac: MacAddr,
) -> Vec<u8> {
    let packet = ArpPacket::new_reply(local.mac, local.ip, requester_mac, requester_ip);
    let frame = EthernetFrame::new(requester_mac, local.mac, ethertypes::ARP, packet.serialize());
    frame.to_bytes()
}

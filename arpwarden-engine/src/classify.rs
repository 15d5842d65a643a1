//! Pure classification of inbound ARP messages
//!
//! The dispatch policy lives here, separate from the effect executors
//! (responder, host table, event sink), so it can be tested without any
//! I/O. Branches are evaluated in priority order and are exhaustive over
//! opcode and target match.

use crate::packet::{ArpOpcode, ArpPacket};
use arpwarden_core::MacAddr;
use std::net::Ipv4Addr;

/// An observed (IP, MAC) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressPair {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

/// What the engine should do with an inbound ARP message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Who-has request for the local IP: answer it
    ReplyToRequest {
        requester: AddressPair,
    },
    /// Is-at reply to the local IP: record the sender binding
    /// authoritatively (may overwrite)
    RecordReply {
        sender: AddressPair,
    },
    /// Third-party traffic: observe both endpoints, never overwrite
    Monitor {
        sender: AddressPair,
        target: AddressPair,
    },
    /// Opcode outside Request/Reply: report and ignore
    Unsupported {
        opcode: u16,
        sender_ip: Ipv4Addr,
    },
}

/// Classify an ARP message against the local IP
pub fn classify(packet: &ArpPacket, local_ip: Ipv4Addr) -> Action {
    let sender = AddressPair {
        ip: packet.sender_ip,
        mac: packet.sender_mac,
    };
    let target = AddressPair {
        ip: packet.target_ip,
        mac: packet.target_mac,
    };

    match packet.operation {
        ArpOpcode::Request if packet.target_ip == local_ip => {
            Action::ReplyToRequest { requester: sender }
        }
        ArpOpcode::Reply if packet.target_ip == local_ip => Action::RecordReply { sender },
        ArpOpcode::Request | ArpOpcode::Reply => Action::Monitor { sender, target },
        ArpOpcode::Other(opcode) => Action::Unsupported {
            opcode,
            sender_ip: packet.sender_ip,
        },
    }
}

//! Structured notifications emitted by the engine

use arpwarden_core::MacAddr;
use std::net::Ipv4Addr;
use tracing::{info, warn};

/// A notification about a table mutation or anomaly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArpEvent {
    /// A reply to the local IP introduced a previously unseen host
    HostDiscovered { ip: Ipv4Addr, mac: MacAddr },
    /// A reply to the local IP changed an existing binding.
    /// Potential spoofing or renumbering.
    BindingChanged {
        ip: Ipv4Addr,
        old_mac: MacAddr,
        new_mac: MacAddr,
    },
    /// Third-party traffic revealed a previously unseen IP
    MonitorNewHost { ip: Ipv4Addr, mac: MacAddr },
    /// Third-party traffic reported a different MAC for a known IP.
    /// The stored binding is left untouched.
    MonitorMacMismatch {
        ip: Ipv4Addr,
        known_mac: MacAddr,
        seen_mac: MacAddr,
    },
    /// Message carried an opcode outside Request/Reply
    UnsupportedOpcode { opcode: u16, sender_ip: Ipv4Addr },
    /// An ARP reply could not be transmitted
    SendFailed { recipient: Ipv4Addr, reason: String },
}

/// Sink for engine notifications
pub trait EventSink {
    fn emit(&mut self, event: ArpEvent);
}

/// Event sink that logs through `tracing`
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: ArpEvent) {
        match event {
            ArpEvent::HostDiscovered { ip, mac } => {
                info!(%ip, %mac, "new host discovered");
            }
            ArpEvent::BindingChanged {
                ip,
                old_mac,
                new_mac,
            } => {
                warn!(%ip, %old_mac, %new_mac, "host binding changed");
            }
            ArpEvent::MonitorNewHost { ip, mac } => {
                info!(%ip, %mac, "monitor discovered new host");
            }
            ArpEvent::MonitorMacMismatch {
                ip,
                known_mac,
                seen_mac,
            } => {
                warn!(%ip, %known_mac, %seen_mac, "monitor saw new MAC for known IP");
            }
            ArpEvent::UnsupportedOpcode { opcode, sender_ip } => {
                warn!(opcode, %sender_ip, "unsupported ARP type");
            }
            ArpEvent::SendFailed { recipient, reason } => {
                warn!(%recipient, %reason, "failed to send ARP reply");
            }
        }
    }
}

/// Event sink that records events in memory, for tests and tooling
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<ArpEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: ArpEvent) {
        self.events.push(event);
    }
}

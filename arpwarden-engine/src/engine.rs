//! The ARP engine: filter, classify, act
//!
//! One logical thread pulls frames from a [`FrameSource`] and processes
//! each to completion before the next is considered. The engine owns the
//! host table outright, so no locking discipline is needed around it.

use crate::classify::{classify, Action, AddressPair};
use crate::event::{ArpEvent, EventSink};
use crate::filter::ScopeFilter;
use crate::packet::ArpPacket;
use crate::responder;
use crate::table::{HostTable, UpsertOutcome};
use arpwarden_capture::FrameSource;
use arpwarden_core::{
    ethertypes, Error, EthernetFrame, Interface, InterfaceBinding, Packet, Result,
};
use pnet_datalink::DataLinkSender;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Raw-frame send primitive, abstracted so the engine can be driven
/// against a mock in tests
pub trait FrameSender {
    fn send_frame(&mut self, frame: &[u8]) -> Result<()>;
}

/// Frame sender over a persistent datalink channel
pub struct InterfaceSender {
    tx: Arc<Mutex<Box<dyn DataLinkSender>>>,
}

impl InterfaceSender {
    /// Create a sender bound to the given interface
    pub fn new(interface: &Interface) -> Result<Self> {
        Ok(Self {
            tx: interface.create_sender()?,
        })
    }
}

impl FrameSender for InterfaceSender {
    fn send_frame(&mut self, frame: &[u8]) -> Result<()> {
        let mut tx = self
            .tx
            .lock()
            .map_err(|_| Error::Interface("sender lock poisoned".to_string()))?;

        tx.send_to(frame, None)
            .ok_or_else(|| Error::Transmission("Failed to send frame".to_string()))?
            .map_err(|e| Error::Transmission(format!("Send error: {}", e)))?;

        Ok(())
    }
}

/// ARP monitoring/responding engine
pub struct ArpEngine<S: FrameSender, E: EventSink> {
    local: InterfaceBinding,
    filter: ScopeFilter,
    table: HostTable,
    sender: S,
    sink: E,
}

impl<S: FrameSender, E: EventSink> ArpEngine<S, E> {
    /// Create an engine with an empty host table
    pub fn new(local: InterfaceBinding, sender: S, sink: E) -> Self {
        Self {
            local,
            filter: ScopeFilter::All,
            table: HostTable::new(),
            sender,
            sink,
        }
    }

    /// Restrict the engine to frames admitted by the given filter
    pub fn with_filter(mut self, filter: ScopeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// The local binding this engine answers for
    pub fn local(&self) -> InterfaceBinding {
        self.local
    }

    /// Read access to the host table
    pub fn table(&self) -> &HostTable {
        &self.table
    }

    /// Read access to the frame sender
    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Read access to the event sink
    pub fn sink(&self) -> &E {
        &self.sink
    }

    /// Process one captured frame.
    ///
    /// All failure inside a frame is communicated through notifications;
    /// nothing here can take the capture loop down.
    pub fn handle_frame(&mut self, packet: &Packet) {
        let Some(frame) = EthernetFrame::from_bytes(packet.data()) else {
            debug!(len = packet.len(), "frame too short, skipping");
            return;
        };

        if frame.ethertype != ethertypes::ARP {
            return;
        }
        if !self.filter.admit(&frame) {
            return;
        }

        match ArpPacket::parse(&frame.payload) {
            Ok(arp) => self.handle_message(&arp),
            Err(e) => {
                debug!(%e, "unparseable ARP payload, skipping");
            }
        }
    }

    /// Dispatch one parsed ARP message
    pub fn handle_message(&mut self, packet: &ArpPacket) {
        if packet.is_gratuitous() {
            debug!(ip = %packet.sender_ip, "gratuitous ARP");
        }

        match classify(packet, self.local.ip) {
            Action::ReplyToRequest { requester } => self.send_reply(requester),
            Action::RecordReply { sender } => self.record_reply(sender),
            Action::Monitor { sender, target } => {
                self.monitor_pair(sender);
                self.monitor_pair(target);
            }
            Action::Unsupported { opcode, sender_ip } => {
                self.sink.emit(ArpEvent::UnsupportedOpcode { opcode, sender_ip });
            }
        }
    }

    /// Answer a who-has request for the local IP. No table mutation.
    fn send_reply(&mut self, requester: AddressPair) {
        let frame = responder::reply_frame(self.local, requester.ip, requester.mac);
        debug!(to = %requester.ip, "sending ARP reply");

        if let Err(e) = self.sender.send_frame(&frame) {
            self.sink.emit(ArpEvent::SendFailed {
                recipient: requester.ip,
                reason: e.to_string(),
            });
        }
    }

    /// Record the sender of a direct reply. Direct replies are
    /// authoritative and may overwrite an existing binding.
    fn record_reply(&mut self, sender: AddressPair) {
        match self.table.upsert(sender.ip, sender.mac) {
            UpsertOutcome::Inserted => {
                self.sink.emit(ArpEvent::HostDiscovered {
                    ip: sender.ip,
                    mac: sender.mac,
                });
            }
            UpsertOutcome::Updated(old_mac) => {
                self.sink.emit(ArpEvent::BindingChanged {
                    ip: sender.ip,
                    old_mac,
                    new_mac: sender.mac,
                });
            }
            UpsertOutcome::Unchanged => {}
        }
    }

    /// Observe a third-party pair. Overheard traffic is less trusted
    /// than direct replies: a conflicting MAC is reported but the stored
    /// binding is kept.
    fn monitor_pair(&mut self, pair: AddressPair) {
        match self.table.lookup(pair.ip) {
            None => {
                self.table.upsert(pair.ip, pair.mac);
                self.sink.emit(ArpEvent::MonitorNewHost {
                    ip: pair.ip,
                    mac: pair.mac,
                });
            }
            Some(known_mac) if known_mac != pair.mac => {
                self.sink.emit(ArpEvent::MonitorMacMismatch {
                    ip: pair.ip,
                    known_mac,
                    seen_mac: pair.mac,
                });
            }
            Some(_) => {}
        }
    }

    /// Drain a frame source until it is closed.
    ///
    /// Returns `Ok(())` on a clean close and an error only for hard
    /// capture failures.
    pub fn run(&mut self, source: &mut FrameSource) -> Result<()> {
        while let Some(frame) = source.next_frame()? {
            self.handle_frame(&frame);
        }
        Ok(())
    }
}

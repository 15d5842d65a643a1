//! ARP monitoring and responding engine
//!
//! Passively observes link-layer ARP traffic, maintains a table of
//! observed IP-to-MAC bindings, flags anomalies (binding changes,
//! conflicting MACs in overheard traffic) and answers who-has requests
//! for the local address.
//!
//! The dispatch policy, in priority order:
//! 1. Request targeting the local IP: send a reply, touch nothing.
//! 2. Reply targeting the local IP: upsert the sender binding,
//!    reporting discoveries and changes.
//! 3. Any other request or reply: observe sender and target pairs
//!    without overwriting existing bindings.
//! 4. Any other opcode: report it, change nothing.

pub mod classify;
pub mod engine;
pub mod event;
pub mod filter;
pub mod packet;
pub mod responder;
pub mod table;

pub use classify::{classify, Action, AddressPair};
pub use engine::{ArpEngine, FrameSender, InterfaceSender};
pub use event::{ArpEvent, EventSink, LogSink, RecordingSink};
pub use filter::{ScopeFilter, TEST_SCOPE_MAC};
pub use packet::{ArpOpcode, ArpPacket};
pub use table::{HostTable, UpsertOutcome};

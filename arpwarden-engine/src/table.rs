//! Host table: observed IP-to-MAC bindings
//!
//! Entries are never removed; the table grows for the lifetime of the
//! engine. That is a documented limitation of the design, not a leak to
//! patch around.

use arpwarden_core::MacAddr;
use std::collections::HashMap;
use std::net::Ipv4Addr;

/// Outcome of an upsert against the host table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// IP was not in the table; binding inserted
    Inserted,
    /// IP was bound to a different MAC; binding replaced
    Updated(MacAddr),
    /// IP was already bound to this MAC
    Unchanged,
}

/// Mapping from observed IP address to last-known hardware address.
///
/// Pure data structure, no I/O. Access is single-threaded; the engine
/// owns the table and nothing else touches it.
#[derive(Debug, Default)]
pub struct HostTable {
    entries: HashMap<Ipv4Addr, MacAddr>,
}

impl HostTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the last-known MAC for an IP
    pub fn lookup(&self, ip: Ipv4Addr) -> Option<MacAddr> {
        self.entries.get(&ip).copied()
    }

    /// Insert or update a binding
    pub fn upsert(&mut self, ip: Ipv4Addr, mac: MacAddr) -> UpsertOutcome {
        match self.entries.insert(ip, mac) {
            None => UpsertOutcome::Inserted,
            Some(old) if old != mac => UpsertOutcome::Updated(old),
            Some(_) => UpsertOutcome::Unchanged,
        }
    }

    /// Number of tracked hosts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all bindings
    pub fn iter(&self) -> impl Iterator<Item = (&Ipv4Addr, &MacAddr)> {
        self.entries.iter()
    }

    /// Snapshot as IP-string to MAC-string pairs, for inspection tooling
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|(ip, mac)| (ip.to_string(), mac.to_string()))
            .collect()
    }
}

//! Frame admission filter
//!
//! The restrictive MAC scope exists to pin a capture to a designated
//! test address for reproducible runs. It is a test aid, not a security
//! boundary; production captures admit everything.

use arpwarden_core::{EthernetFrame, MacAddr};

/// MAC address used to scope test traffic
pub const TEST_SCOPE_MAC: MacAddr = MacAddr([0x4b, 0x54, 0x55, 0x53, 0x45, 0x43]);

/// Predicate over captured frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeFilter {
    /// Admit every frame (production default)
    #[default]
    All,
    /// Admit only frames sent to or from this MAC
    Mac(MacAddr),
}

impl ScopeFilter {
    /// Scope to the well-known test MAC
    pub fn test_scope() -> Self {
        Self::Mac(TEST_SCOPE_MAC)
    }

    /// Decide whether a frame is in scope
    pub fn admit(&self, frame: &EthernetFrame) -> bool {
        match self {
            Self::All => true,
            Self::Mac(mac) => frame.source == *mac || frame.destination == *mac,
        }
    }
}

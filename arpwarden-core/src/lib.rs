//! Arpwarden Core Library
//!
//! Fundamental types, error handling and interface plumbing shared by
//! the arpwarden crates.

pub mod error;
pub mod frame;
pub mod interface;
pub mod packet;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use frame::EthernetFrame;
pub use interface::{Interface, InterfaceBinding};
pub use packet::Packet;
pub use types::{ethertypes, MacAddr};

//! Packet capture library for arpwarden
//!
//! A type-safe wrapper around pcap providing a cancellable pull-based
//! frame source, BPF filter builders and capture statistics.
//!
//! ## Example
//!
//! ```no_run
//! use arpwarden_capture::{filters, CaptureConfig, FrameSource};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = FrameSource::open("eth0", &CaptureConfig::default())?;
//! source.set_filter(&filters::arp_filter())?;
//!
//! let handle = source.handle();
//! while let Some(frame) = source.next_frame()? {
//!     println!("Got frame: {} bytes", frame.len());
//!     handle.close();
//! }
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod filters;
pub mod stats;

// Re-export main types
pub use capture::{CaptureConfig, CaptureHandle, FrameSource};
pub use stats::{CaptureStats, StatsAccumulator};

//! Packet capture wrapper around pcap
//!
//! Frames are pulled one at a time through [`FrameSource::next_frame`],
//! which blocks until a frame arrives or the source is closed through
//! its [`CaptureHandle`]. A closed source yields `Ok(None)` and stays
//! closed; callers must not assume the stream is infinite.

use arpwarden_core::{Error, Interface, Packet, Result};
use pcap::{Active, Capture, Device};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

use crate::stats::{CaptureStats, StatsAccumulator};

/// Default snapshot length (maximum bytes per frame)
const DEFAULT_SNAPLEN: i32 = 65535;

/// Default timeout for packet capture (milliseconds)
///
/// Also bounds how long a close request can go unnoticed while the
/// source is blocked waiting for traffic.
const DEFAULT_TIMEOUT_MS: i32 = 1000;

/// Configuration for packet capture
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Maximum bytes to capture per frame
    pub snaplen: i32,
    /// Timeout in milliseconds
    pub timeout_ms: i32,
    /// Enable promiscuous mode
    pub promiscuous: bool,
    /// Buffer size (0 = default)
    pub buffer_size: i32,
    /// Enable immediate mode (deliver frames immediately)
    pub immediate_mode: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            snaplen: DEFAULT_SNAPLEN,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            promiscuous: true,
            buffer_size: 0,
            immediate_mode: true,
        }
    }
}

/// Handle used to close a [`FrameSource`] from outside the pull loop
#[derive(Debug, Clone)]
pub struct CaptureHandle {
    closed: Arc<AtomicBool>,
}

impl CaptureHandle {
    /// Request the source to stop yielding frames
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Check whether the source has been closed
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Pull-based frame source over a live pcap capture
pub struct FrameSource {
    /// Interface name
    interface: String,
    /// Active pcap capture
    capture: Capture<Active>,
    /// Close flag shared with handles
    closed: Arc<AtomicBool>,
    /// Statistics accumulator
    stats: StatsAccumulator,
}

impl FrameSource {
    /// Open a frame source on the specified interface
    pub fn open(interface: &str, config: &CaptureConfig) -> Result<Self> {
        let info = Interface::by_name(interface)?;
        if !info.is_up {
            return Err(Error::Capture(format!(
                "Interface '{}' is not up",
                interface
            )));
        }

        debug!("Initializing pcap capture on {}", interface);

        let device = Device::from(interface);
        let mut inactive = Capture::from_device(device)
            .map_err(|e| Error::Capture(format!("Failed to create capture: {}", e)))?
            .promisc(config.promiscuous)
            .snaplen(config.snaplen)
            .timeout(config.timeout_ms)
            .immediate_mode(config.immediate_mode);

        if config.buffer_size > 0 {
            inactive = inactive.buffer_size(config.buffer_size);
        }

        let capture = inactive
            .open()
            .map_err(|e| Error::Capture(format!("Failed to open capture: {}", e)))?;

        info!("Capture opened on {}", interface);

        Ok(Self {
            interface: interface.to_string(),
            capture,
            closed: Arc::new(AtomicBool::new(false)),
            stats: StatsAccumulator::new(),
        })
    }

    /// Open a frame source with the default configuration
    pub fn open_default(interface: &str) -> Result<Self> {
        Self::open(interface, &CaptureConfig::default())
    }

    /// Set a BPF filter on the capture
    pub fn set_filter(&mut self, bpf: &str) -> Result<()> {
        self.capture
            .filter(bpf, true)
            .map_err(|e| Error::Capture(format!("Invalid BPF filter '{}': {}", bpf, e)))?;
        info!("BPF filter set: {}", bpf);
        Ok(())
    }

    /// Get a handle that can close this source
    pub fn handle(&self) -> CaptureHandle {
        CaptureHandle {
            closed: Arc::clone(&self.closed),
        }
    }

    /// Interface this source captures on
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Pull the next frame, blocking until one arrives.
    ///
    /// Returns `Ok(None)` once the source has been closed. Read timeouts
    /// are retried internally so callers only ever see frames, the end
    /// of the stream, or a hard capture failure.
    pub fn next_frame(&mut self) -> Result<Option<Packet>> {
        loop {
            if self.closed.load(Ordering::SeqCst) {
                debug!("Frame source on {} closed", self.interface);
                return Ok(None);
            }

            match self.capture.next_packet() {
                Ok(raw) => {
                    let data = raw.data.to_vec();
                    let len = data.len();
                    self.stats.record_frame(len);

                    return Ok(Some(Packet {
                        timestamp: SystemTime::now(),
                        interface: self.interface.clone(),
                        data,
                        len,
                    }));
                }
                Err(pcap::Error::TimeoutExpired) => continue,
                Err(e) => {
                    return Err(Error::Capture(format!("Capture read failed: {}", e)));
                }
            }
        }
    }

    /// Close the source directly
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Get current statistics
    pub fn stats(&self) -> CaptureStats {
        self.stats.snapshot()
    }
}

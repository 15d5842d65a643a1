//! Capture statistics

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Snapshot of capture statistics
#[derive(Debug, Clone, Default)]
pub struct CaptureStats {
    /// Number of frames pulled from the source
    pub frames_received: u64,
    /// Total bytes received
    pub bytes_received: u64,
    /// Capture duration
    pub duration: Duration,
    /// Frames per second
    pub frames_per_second: f64,
}

impl CaptureStats {
    /// Format statistics as a human-readable string
    pub fn format(&self) -> String {
        format!(
            "Received: {} frames ({} bytes) in {:.2}s ({:.2} fps)",
            self.frames_received,
            self.bytes_received,
            self.duration.as_secs_f64(),
            self.frames_per_second
        )
    }
}

/// Thread-safe statistics accumulator for a live capture
#[derive(Debug, Clone)]
pub struct StatsAccumulator {
    frames_received: Arc<AtomicU64>,
    bytes_received: Arc<AtomicU64>,
    start_time: Instant,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self {
            frames_received: Arc::new(AtomicU64::new(0)),
            bytes_received: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Record a received frame
    pub fn record_frame(&self, size: usize) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
        self.bytes_received
            .fetch_add(size as u64, Ordering::Relaxed);
    }

    /// Get current statistics snapshot
    pub fn snapshot(&self) -> CaptureStats {
        let frames_received = self.frames_received.load(Ordering::Relaxed);
        let bytes_received = self.bytes_received.load(Ordering::Relaxed);
        let duration = self.start_time.elapsed();

        let secs = duration.as_secs_f64();
        let frames_per_second = if secs > 0.0 {
            frames_received as f64 / secs
        } else {
            0.0
        };

        CaptureStats {
            frames_received,
            bytes_received,
            duration,
            frames_per_second,
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.frames_received.store(0, Ordering::Relaxed);
        self.bytes_received.store(0, Ordering::Relaxed);
    }

    /// Get frames received count
    pub fn frames_received(&self) -> u64 {
        self.frames_received.load(Ordering::Relaxed)
    }
}

impl Default for StatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_accumulator_basic() {
        let acc = StatsAccumulator::new();

        acc.record_frame(64);
        acc.record_frame(128);

        assert_eq!(acc.frames_received(), 2);

        let snapshot = acc.snapshot();
        assert_eq!(snapshot.frames_received, 2);
        assert_eq!(snapshot.bytes_received, 192);
    }

    #[test]
    fn test_accumulator_reset() {
        let acc = StatsAccumulator::new();
        acc.record_frame(100);
        acc.reset();
        assert_eq!(acc.frames_received(), 0);
    }

    #[test]
    fn test_accumulator_thread_safety() {
        let acc = StatsAccumulator::new();
        let acc_clone = acc.clone();

        let handle = thread::spawn(move || {
            for _ in 0..100 {
                acc_clone.record_frame(64);
            }
        });

        for _ in 0..100 {
            acc.record_frame(64);
        }

        handle.join().unwrap();
        assert_eq!(acc.frames_received(), 200);
    }

    #[test]
    fn test_stats_format() {
        let stats = CaptureStats {
            frames_received: 10,
            bytes_received: 640,
            duration: Duration::from_secs(2),
            frames_per_second: 5.0,
        };
        let formatted = stats.format();
        assert!(formatted.contains("10"));
        assert!(formatted.contains("640"));
    }
}

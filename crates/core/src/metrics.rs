//! Metrics for a single encode or decode session.
//!
//! Tracks where the bytes of a container went (header, model descriptor,
//! payload, checksum) and how densely symbols were packed.
//!
//! # Thread Safety
//!
//! `CodecMetrics` is plain data owned by one encoder or decoder; it is not
//! shared.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct CodecMetrics {
    // === Timing ===
    /// When the session started
    pub start_time: Instant,

    /// When the session ended (set on completion)
    pub end_time: Option<Instant>,

    // === Uncompressed side ===
    /// Raw bytes consumed by the encoder or produced by the decoder
    pub raw_bytes: u64,

    // === Container layout ===
    /// Fixed header bytes
    pub header_bytes: u64,

    /// Embedded model descriptor bytes (0 when the default model is used)
    pub model_bytes: u64,

    /// Bit-packed payload bytes, including the padded final byte
    pub payload_bytes: u64,

    /// Meaningful payload bits (padding excluded)
    pub payload_bits: u64,

    /// Checksum trailer bytes
    pub trailer_bytes: u64,
}

impl CodecMetrics {
    /// Start a session clock.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            raw_bytes: 0,
            header_bytes: 0,
            model_bytes: 0,
            payload_bytes: 0,
            payload_bits: 0,
            trailer_bytes: 0,
        }
    }

    /// Mark the session as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Session length, or time elapsed so far while still running.
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Total container size.
    pub fn container_bytes(&self) -> u64 {
        self.header_bytes + self.model_bytes + self.payload_bytes + self.trailer_bytes
    }

    /// Compute compression ratio (container / raw).
    ///
    /// Returns 0.0 if nothing was processed.
    pub fn compression_ratio(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.container_bytes() as f64 / self.raw_bytes as f64
        }
    }

    /// Average code length in bits.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.raw_bytes as f64
        }
    }

    /// Compute throughput in raw bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        match self.duration().as_secs_f64() {
            secs if secs > 0.0 => self.raw_bytes as f64 / secs,
            _ => 0.0,
        }
    }

    /// Print the byte accounting to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Codec Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("Raw:       {} bytes", self.raw_bytes);
        println!("Container: {} bytes", self.container_bytes());
        println!("  header:  {} bytes", self.header_bytes);
        println!("  model:   {} bytes", self.model_bytes);
        println!("  payload: {} bytes ({} bits)", self.payload_bytes, self.payload_bits);
        println!("  trailer: {} bytes", self.trailer_bytes);
        println!();

        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("Bits per symbol: {:.3}", self.bits_per_symbol());
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }

    /// `key=value` lines, one per figure.
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             raw_bytes={}\n\
             container_bytes={}\n\
             header_bytes={}\n\
             model_bytes={}\n\
             payload_bytes={}\n\
             payload_bits={}\n\
             trailer_bytes={}\n\
             compression_ratio={:.4}\n\
             bits_per_symbol={:.4}\n",
            self.duration().as_millis(),
            self.raw_bytes,
            self.container_bytes(),
            self.header_bytes,
            self.model_bytes,
            self.payload_bytes,
            self.payload_bits,
            self.trailer_bytes,
            self.compression_ratio(),
            self.bits_per_symbol(),
        )
    }
}

impl Default for CodecMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let metrics = CodecMetrics::new();
        assert!(metrics.end_time.is_none());
        assert!(metrics.duration().as_secs() < 5);
        assert_eq!(metrics.container_bytes(), 0);
    }

    #[test]
    fn test_compression_ratio() {
        let mut metrics = CodecMetrics::new();
        metrics.raw_bytes = 1000;
        metrics.header_bytes = 12;
        metrics.payload_bytes = 738;

        assert_eq!(metrics.compression_ratio(), 0.75);
    }

    #[test]
    fn test_bits_per_symbol() {
        let mut metrics = CodecMetrics::new();
        assert_eq!(metrics.bits_per_symbol(), 0.0);

        metrics.raw_bytes = 4;
        metrics.payload_bits = 10;
        assert_eq!(metrics.bits_per_symbol(), 2.5);
    }

    #[test]
    fn test_export_text() {
        let mut metrics = CodecMetrics::new();
        metrics.raw_bytes = 1000;
        metrics.header_bytes = 12;
        metrics.model_bytes = 256;
        metrics.complete();

        let text = metrics.export_text();
        assert!(text.contains("raw_bytes=1000"));
        assert!(text.contains("container_bytes=268"));
        assert!(text.contains("model_bytes=256"));
    }
}

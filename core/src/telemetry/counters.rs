//! telemetry/counters.rs
//! Mutable counters used during one encode/decode call.
//!
//! Summary: Collects chunk counts and byte counts while streaming a volume.
//! Converted into an immutable TelemetrySnapshot at the end of the call.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub chunks: u64,
    pub bytes_header: u64,
    pub bytes_volume: u64,
    pub bytes_compressed: u64,
}

impl TelemetryCounters {
    /// Record the fingerprint header.
    pub fn add_header(&mut self, header_len: usize) {
        self.bytes_header += header_len as u64;
    }

    /// Record one compressed chunk.
    ///
    /// - `volume_len`: flag volume bytes fed to the engine
    /// - `compressed_len`: compressed bytes written for that chunk
    pub fn add_compress_chunk(&mut self, volume_len: usize, compressed_len: usize) {
        self.chunks += 1;
        self.bytes_volume += volume_len as u64;
        self.bytes_compressed += compressed_len as u64;
    }

    /// Record one chunk of compressed input read during decode.
    pub fn add_decompress_input(&mut self, compressed_len: usize) {
        self.chunks += 1;
        self.bytes_compressed += compressed_len as u64;
    }

    /// Record flag volume bytes restored by a decode.
    pub fn add_volume_output(&mut self, volume_len: usize) {
        self.bytes_volume += volume_len as u64;
    }

    /// Header plus body bytes on disk.
    pub fn artifact_bytes(&self) -> u64 {
        self.bytes_header + self.bytes_compressed
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.chunks += other.chunks;
        self.bytes_header += other.bytes_header;
        self.bytes_volume += other.bytes_volume;
        self.bytes_compressed += other.bytes_compressed;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

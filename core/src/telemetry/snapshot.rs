//! src/telemetry/snapshot.rs
//!
//! Immutable summary of one encode or decode call.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub chunks: u64,
    pub bytes_header: u64,
    pub bytes_volume: u64,
    pub bytes_compressed: u64,
    /// compressed / volume; 0.0 for an empty volume.
    pub compression_ratio: f64,
    pub throughput_volume_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let compression_ratio = if counters.bytes_volume > 0 {
            counters.bytes_compressed as f64 / counters.bytes_volume as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_volume as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            chunks: counters.chunks,
            bytes_header: counters.bytes_header,
            bytes_volume: counters.bytes_volume,
            bytes_compressed: counters.bytes_compressed,
            compression_ratio,
            throughput_volume_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Internal consistency: stage times fit inside the elapsed wall time.
    pub fn sanity_check(&self) -> bool {
        self.total_stage_time() <= self.elapsed && self.compression_ratio >= 0.0
    }

    /// Header plus compressed body bytes.
    pub fn artifact_bytes(&self) -> u64 {
        self.bytes_header + self.bytes_compressed
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

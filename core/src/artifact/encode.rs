use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::compression::compress_volume;
use crate::headers::{write_fingerprint, Fingerprint};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::{CacheError, CacheResult, OpenMode};

/// Write `volume` to `path` under `fp`, truncating any existing file.
///
/// On error the file is left truncated or malformed; callers must not
/// treat it as usable.
pub fn try_encode<P: AsRef<Path>>(
    path: P,
    fp: &Fingerprint,
    volume: &[u8],
) -> CacheResult<TelemetrySnapshot> {
    let path = path.as_ref();
    let mut timer = TelemetryTimer::new();
    let mut counters = TelemetryCounters::default();

    let file = timer
        .time(Stage::Open, || {
            OpenOptions::new().write(true).create(true).truncate(true).open(path)
        })
        .map_err(|source| CacheError::Open { path: path.to_path_buf(), mode: OpenMode::Write, source })?;
    let mut out = BufWriter::new(file);

    let header_len = timer.time(Stage::Header, || write_fingerprint(&mut out, fp))?;
    counters.add_header(header_len);

    timer.time(Stage::Compress, || compress_volume(volume, &mut out, &mut counters))?;

    // BufWriter swallows errors on drop; surface them here.
    timer.time(Stage::Flush, || out.flush())?;

    timer.finish();
    Ok(TelemetrySnapshot::from(&counters, &timer))
}

/// Boolean-outcome save. Diagnostics go to the log.
pub fn encode<P: AsRef<Path>>(path: P, fp: &Fingerprint, volume: &[u8]) -> bool {
    let path = path.as_ref();
    match try_encode(path, fp, volume) {
        Ok(snapshot) => {
            debug!(
                path = %path.display(),
                volume_bytes = snapshot.bytes_volume,
                artifact_bytes = snapshot.artifact_bytes(),
                ratio = snapshot.compression_ratio,
                "stored voxelized mesh"
            );
            true
        }
        Err(e) => {
            warn!(path = %path.display(), phase = ?e.phase(), "{}", e);
            false
        }
    }
}

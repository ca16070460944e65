use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, warn};

use crate::compression::decompress_volume;
use crate::headers::{validate_fingerprint, Fingerprint};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::{CacheError, CacheResult, OpenMode};

/// Load the artifact at `path` into `volume` if its header matches `fp`.
///
/// `volume.len()` is the expected voxel count. The buffer is untouched when
/// the file is missing or the header does not match, and zeroed when the
/// body fails after streaming started.
pub fn try_decode<P: AsRef<Path>>(
    path: P,
    fp: &Fingerprint,
    volume: &mut [u8],
) -> CacheResult<TelemetrySnapshot> {
    let path = path.as_ref();
    let mut timer = TelemetryTimer::new();
    let mut counters = TelemetryCounters::default();

    let file = timer
        .time(Stage::Open, || File::open(path))
        .map_err(|source| CacheError::Open { path: path.to_path_buf(), mode: OpenMode::Read, source })?;
    let mut src = BufReader::new(file);

    timer.time(Stage::Validate, || validate_fingerprint(&mut src, fp))?;
    counters.add_header(fp.encoded_len());

    timer.time(Stage::Decompress, || decompress_volume(&mut src, volume, &mut counters))?;

    timer.finish();
    Ok(TelemetrySnapshot::from(&counters, &timer))
}

/// Boolean-outcome load. A missing file or stale header is an ordinary miss.
pub fn decode<P: AsRef<Path>>(path: P, fp: &Fingerprint, volume: &mut [u8]) -> bool {
    let path = path.as_ref();
    match try_decode(path, fp, volume) {
        Ok(snapshot) => {
            debug!(
                path = %path.display(),
                volume_bytes = snapshot.bytes_volume,
                chunks = snapshot.chunks,
                "loaded voxelized mesh"
            );
            true
        }
        Err(e) if e.is_cache_miss() || e.is_stale() => {
            debug!(path = %path.display(), "{}", e);
            false
        }
        Err(e) => {
            warn!(path = %path.display(), phase = ?e.phase(), "{}", e);
            false
        }
    }
}

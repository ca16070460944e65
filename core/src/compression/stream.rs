//! compression/stream.rs
//! Chunked compress/decompress of a flag volume with bounded buffers.
//!
//! - Input and output move through CHUNK_SIZE buffers; memory does not grow with the volume.
//! - Chunks are processed strictly in order; the engine carries state across them.
//! - On any body failure the destination volume is zeroed before returning.
//! - Decoding succeeds only when the volume is full and the zlib stream has ended.
use std::io::{self, Read, Write};

use crate::compression::codecs::{DeflateEngine, InflateEngine};
use crate::compression::constants::{CHUNK_SIZE, COMPRESSION_LEVEL};
use crate::compression::types::{CompressionError, Compressor, Decompressor, EngineOp, EngineStatus};
use crate::telemetry::TelemetryCounters;

/// Fill `buf` from `r` until it is full or the source is exhausted.
/// Returns the number of bytes read; fewer than `buf.len()` means EOF.
pub fn read_chunk<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Compress `volume` into `out` using the given engine.
///
/// - The final chunk is flagged as end of input so the engine flushes everything.
/// - After every engine call the drained output is written immediately.
/// - An empty volume still produces a complete (empty) zlib stream.
///
/// Returns the number of compressed bytes written.
pub fn compress_stream<C: Compressor, W: Write>(
    engine: &mut C,
    volume: &[u8],
    out: &mut W,
    counters: &mut TelemetryCounters,
) -> Result<u64, CompressionError> {
    let mut out_buf = vec![0u8; CHUNK_SIZE];
    let mut written = 0u64;
    let mut start = 0usize;

    loop {
        let take = (volume.len() - start).min(CHUNK_SIZE);
        let finish = start + take == volume.len();
        let mut input = &volume[start..start + take];
        let mut chunk_out = 0usize;

        loop {
            let step = engine.compress_step(input, &mut out_buf, finish)?;
            if step.status == EngineStatus::Stalled {
                // Nothing pending for this chunk.
                if !finish && input.is_empty() {
                    break;
                }
                return Err(CompressionError::NoProgress { op: EngineOp::Deflate });
            }

            out.write_all(&out_buf[..step.produced])?;
            chunk_out += step.produced;
            input = &input[step.consumed..];

            if step.status == EngineStatus::StreamEnd {
                break;
            }
            // Output buffer not filled: the engine has nothing more to give for this chunk.
            if !finish && input.is_empty() && step.produced < out_buf.len() {
                break;
            }
        }

        counters.add_compress_chunk(take, chunk_out);
        written += chunk_out as u64;
        start += take;
        if finish {
            break;
        }
    }

    Ok(written)
}

/// Decompress from `src` into `volume` until exactly `volume.len()` bytes are produced
/// and the engine has seen the end of the compressed stream.
///
/// Zeroes `volume` on every failure.
pub fn decompress_stream<D: Decompressor, R: Read>(
    engine: &mut D,
    src: &mut R,
    volume: &mut [u8],
    counters: &mut TelemetryCounters,
) -> Result<(), CompressionError> {
    let res = fill_volume(engine, src, volume, counters);
    if res.is_err() {
        volume.fill(0);
    }
    res
}

fn fill_volume<D: Decompressor, R: Read>(
    engine: &mut D,
    src: &mut R,
    volume: &mut [u8],
    counters: &mut TelemetryCounters,
) -> Result<(), CompressionError> {
    let expected = volume.len();
    let mut remaining = expected;
    let mut in_buf = vec![0u8; CHUNK_SIZE];
    // Unconsumed input is in_buf[pos..len].
    let mut pos = 0usize;
    let mut len = 0usize;
    let mut exhausted = false;
    let mut ended = false;

    while remaining > 0 && !ended {
        if pos == len {
            if exhausted {
                break;
            }
            let n = read_chunk(src, &mut in_buf)?;
            exhausted = n < in_buf.len();
            pos = 0;
            len = n;
            if n == 0 {
                continue;
            }
            counters.add_decompress_input(n);
        }

        let offset = expected - remaining;
        let step = engine.decompress_step(&in_buf[pos..len], &mut volume[offset..])?;
        if step.status == EngineStatus::Stalled {
            return Err(CompressionError::NoProgress { op: EngineOp::Inflate });
        }
        if step.produced > remaining {
            return Err(CompressionError::BufferOverflow { produced: step.produced, remaining });
        }

        remaining -= step.produced;
        pos += step.consumed;
        ended = step.status == EngineStatus::StreamEnd;
    }

    if remaining > 0 {
        return Err(CompressionError::StreamEndedEarly { remaining, expected });
    }

    // Volume is full; the stream trailer must still be present and must not
    // carry any further data.
    let mut spill = [0u8; 1];
    while !ended {
        let step = engine.decompress_step(&in_buf[pos..len], &mut spill)?;
        if step.produced > 0 {
            return Err(CompressionError::BufferOverflow { produced: step.produced, remaining: 0 });
        }
        pos += step.consumed;

        match step.status {
            EngineStatus::StreamEnd => ended = true,
            EngineStatus::Progress => {}
            EngineStatus::Stalled => {
                if pos < len {
                    return Err(CompressionError::NoProgress { op: EngineOp::Inflate });
                }
                if exhausted {
                    return Err(CompressionError::MissingStreamEnd { expected });
                }
                let n = read_chunk(src, &mut in_buf)?;
                exhausted = n < in_buf.len();
                pos = 0;
                len = n;
                if n > 0 {
                    counters.add_decompress_input(n);
                }
            }
        }
    }

    counters.add_volume_output(expected);
    Ok(())
}

/// Compress a whole volume with the standard zlib engine and level.
pub fn compress_volume<W: Write>(
    volume: &[u8],
    out: &mut W,
    counters: &mut TelemetryCounters,
) -> Result<u64, CompressionError> {
    let mut engine = DeflateEngine::new(COMPRESSION_LEVEL);
    compress_stream(&mut engine, volume, out, counters)
}

/// Decompress into a whole volume with the standard zlib engine.
pub fn decompress_volume<R: Read>(
    src: &mut R,
    volume: &mut [u8],
    counters: &mut TelemetryCounters,
) -> Result<(), CompressionError> {
    let mut engine = InflateEngine::new();
    decompress_stream(&mut engine, src, volume, counters)
}

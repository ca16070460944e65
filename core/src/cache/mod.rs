//! cache/mod.rs
//! Directory-backed front end over the artifact codec.
//!
//! Artifacts are named from the device name and a BLAKE3 digest of the
//! encoded fingerprint, so each fingerprint maps to one file. The codec's
//! header check still decides validity; the name only spreads fingerprints
//! across files. No locking: one writer per fingerprint at a time.

pub mod config;

pub use config::*;

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::artifact::{decode, encode};
use crate::headers::{encode_fingerprint, Fingerprint};
use crate::types::CacheResult;

/// Longest device-name prefix kept in a file name.
const NAME_STEM_MAX: usize = 32;
/// Hex digits of the fingerprint digest kept in a file name.
const DIGEST_HEX_LEN: usize = 16;

/// How `load_or_compute` filled the caller's volume.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Loaded from a matching artifact.
    Hit,
    /// Recomputed and stored for next time.
    Computed,
    /// Recomputed, but the store failed.
    ComputedUnstored,
}

#[derive(Debug, Clone)]
pub struct VoxelCache {
    config: CacheConfig,
}

impl VoxelCache {
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// File this fingerprint's artifact lives in.
    pub fn artifact_path(&self, fp: &Fingerprint) -> CacheResult<PathBuf> {
        let header = encode_fingerprint(fp)?;
        let digest = blake3::hash(&header);
        let hex = hex::encode(digest.as_bytes());
        let name = format!(
            "{}-{}.{}",
            sanitize_stem(&fp.device_name),
            &hex[..DIGEST_HEX_LEN],
            self.config.extension
        );
        Ok(self.config.directory.join(name))
    }

    /// Encode `volume` for `fp`. A failed store removes its partial file
    /// when `remove_failed_writes` is set.
    pub fn store(&self, fp: &Fingerprint, volume: &[u8]) -> bool {
        let path = match self.artifact_path(fp) {
            Ok(p) => p,
            Err(e) => {
                warn!(fingerprint = %fp, "{}", e);
                return false;
            }
        };
        if let Err(e) = fs::create_dir_all(&self.config.directory) {
            warn!(dir = %self.config.directory.display(), "could not create cache directory: {}", e);
            return false;
        }

        if encode(&path, fp, volume) {
            return true;
        }
        if self.config.remove_failed_writes {
            match fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "removed partial artifact"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), "could not remove partial artifact: {}", e),
            }
        }
        false
    }

    /// Decode the artifact for `fp` into `volume`.
    pub fn load(&self, fp: &Fingerprint, volume: &mut [u8]) -> bool {
        match self.artifact_path(fp) {
            Ok(path) => decode(&path, fp, volume),
            Err(e) => {
                debug!(fingerprint = %fp, "{}", e);
                false
            }
        }
    }

    /// Load on hit; otherwise run `compute` over `volume` and store the result.
    pub fn load_or_compute<F>(&self, fp: &Fingerprint, volume: &mut [u8], compute: F) -> CacheOutcome
    where
        F: FnOnce(&mut [u8]),
    {
        if self.load(fp, volume) {
            return CacheOutcome::Hit;
        }
        compute(volume);
        if self.store(fp, volume) {
            CacheOutcome::Computed
        } else {
            CacheOutcome::ComputedUnstored
        }
    }

    /// Delete the artifact for `fp`. Returns whether a file was removed.
    pub fn evict(&self, fp: &Fingerprint) -> CacheResult<bool> {
        let path = self.artifact_path(fp)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn sanitize_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .take(NAME_STEM_MAX)
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "device".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(sanitize_stem("NVIDIA GeForce/RTX 4090"), "NVIDIA_GeForce_RTX_4090");
        assert_eq!(sanitize_stem(""), "device");
    }

    #[test]
    fn sanitize_truncates_long_names() {
        let long = "x".repeat(100);
        assert_eq!(sanitize_stem(&long).len(), NAME_STEM_MAX);
    }
}

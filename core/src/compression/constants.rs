/// Bytes moved through the engine per pipeline iteration.
/// Peak working memory of the pipeline is O(CHUNK_SIZE), independent of the volume.
pub const CHUNK_SIZE: usize = 16 * 1024;

/// zlib effort level used for every artifact (1 = fastest, 9 = smallest).
pub const COMPRESSION_LEVEL: u32 = 6;

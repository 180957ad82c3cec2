//! Deterministic seeded byte stream.
//!
//! Expands a seed into a SHA-256 hash chain held in a fixed-size buffer.
//! This is NOT a CSPRNG: every byte is a pure function of the seed and
//! the number of bytes read before it. Existing identities depend on the
//! exact chaining and recycling behaviour, so neither may change.

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::{DetKeyError, Result};

/// Default buffer capacity in bytes.
pub const DEFAULT_CAPACITY: usize = 8192;

/// Size of one hash-chain block (a SHA-256 digest).
pub const BLOCK_SIZE: usize = 32;

/// A replayable byte stream derived from a seed.
///
/// The buffer starts as `SHA-256(seed)` followed by blocks where each block
/// is the SHA-256 of the block before it. Once the cursor reaches the end,
/// the SHA-256 of the whole buffer overwrites the first block and reading
/// restarts at offset zero; the rest of the buffer is left as it was.
pub struct SeedStream {
    buffer: Vec<u8>,
    offset: usize,
}

impl SeedStream {
    /// Create a stream with the default 8192-byte buffer.
    pub fn new(seed: &[u8]) -> Self {
        Self::build(seed, DEFAULT_CAPACITY)
    }

    /// Create a stream with a custom buffer capacity.
    ///
    /// The capacity must be a non-zero multiple of [`BLOCK_SIZE`].
    pub fn with_capacity(seed: &[u8], capacity: usize) -> Result<Self> {
        if capacity < BLOCK_SIZE || capacity % BLOCK_SIZE != 0 {
            return Err(DetKeyError::SeedExpansion(format!(
                "capacity must be a non-zero multiple of {BLOCK_SIZE} bytes, got {capacity}"
            )));
        }
        Ok(Self::build(seed, capacity))
    }

    fn build(seed: &[u8], capacity: usize) -> Self {
        let mut buffer = vec![0u8; capacity];
        buffer[..BLOCK_SIZE].copy_from_slice(&Sha256::digest(seed));

        // Each block hashes its predecessor, so this must run in order.
        for i in (BLOCK_SIZE..capacity).step_by(BLOCK_SIZE) {
            let block = Sha256::digest(&buffer[i - BLOCK_SIZE..i]);
            buffer[i..i + BLOCK_SIZE].copy_from_slice(&block);
        }

        Self { buffer, offset: 0 }
    }

    /// Buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Current read cursor within the buffer.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Fill `out` completely, recycling the buffer as often as needed.
    pub fn fill(&mut self, out: &mut [u8]) {
        let mut written = 0;
        while written < out.len() {
            if self.offset >= self.buffer.len() {
                self.recycle();
            }
            let n = (out.len() - written).min(self.buffer.len() - self.offset);
            out[written..written + n].copy_from_slice(&self.buffer[self.offset..self.offset + n]);
            self.offset += n;
            written += n;
        }
    }

    /// Read exactly `n` bytes.
    pub fn read(&mut self, n: usize) -> Vec<u8> {
        let mut out = vec![0u8; n];
        self.fill(&mut out);
        out
    }

    /// Read a fixed-size array of bytes.
    pub fn read_array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        self.fill(&mut out);
        out
    }

    fn recycle(&mut self) {
        let digest = Sha256::digest(&self.buffer);
        self.buffer[..BLOCK_SIZE].copy_from_slice(&digest);
        self.offset = 0;
    }
}

impl Drop for SeedStream {
    fn drop(&mut self) {
        self.buffer.zeroize();
    }
}

impl std::fmt::Debug for SeedStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedStream")
            .field("capacity", &self.buffer.len())
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

//! Scripted random sources for unit tests.

use rand_core::{impls, CryptoRng, Error, RngCore};

/// Hands out a fixed sequence of 32-byte chunks, repeating the last one
/// once the script runs out.
pub(crate) struct ScriptedRng {
    chunks: Vec<[u8; 32]>,
    next: usize,
}

impl ScriptedRng {
    pub(crate) fn new(chunks: Vec<[u8; 32]>) -> Self {
        assert!(!chunks.is_empty(), "script needs at least one chunk");
        Self { chunks, next: 0 }
    }

    /// Number of chunks handed out so far.
    pub(crate) fn draws(&self) -> usize {
        self.next
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let chunk = self.chunks[self.next.min(self.chunks.len() - 1)];
        self.next += 1;
        for (i, byte) in dest.iter_mut().enumerate() {
            *byte = chunk[i % chunk.len()];
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for ScriptedRng {}

/// A random source that is always out of entropy.
pub(crate) struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("FailingRng only supports try_fill_bytes");
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), Error> {
        Err(Error::new("entropy pool unavailable"))
    }
}

impl CryptoRng for FailingRng {}

/// Big-endian 32-byte encoding of `2^200 + 0x2a`, the nonce behind the
/// fixed signature vector used across the test suite.
pub(crate) fn fixed_nonce_bytes() -> [u8; 32] {
    let mut k = [0u8; 32];
    k[6] = 0x01;
    k[31] = 0x2a;
    k
}

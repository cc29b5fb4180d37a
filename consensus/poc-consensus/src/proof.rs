//! The proof-of-capacity verification primitive. Quality extraction from a raw proof blob is
//! plotter/storage-format specific and lives outside this crate; the validator only needs a
//! quality integer back.

use poc_types::{header::Pid, Bytes, H256, U256};

/// Extracts a quality integer from a capacity proof. Pure and deterministic: the same inputs
/// always yield the same quality or the same error.
pub trait ProofVerifier {
    type Error;

    /// `VerifiedQuality(proof, pid, challenge, slot, number, k)`.
    ///
    /// # Errors
    /// Returns `Err` if the proof is malformed or `k` is out of the implementation's supported
    /// range.
    fn verified_quality(
        &self,
        proof: &Bytes,
        pid: Pid,
        challenge: H256,
        slot: u64,
        number: u64,
        k: u8,
    ) -> Result<U256, Self::Error>;
}

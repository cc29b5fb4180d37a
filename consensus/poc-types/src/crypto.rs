//! Hash and signature primitives consumed by the header validator and the canonical-hash
//! helpers. Kept behind a trait, as in the upstream client libraries, so a caller can swap in a
//! hardware-backed or audited implementation without touching the consensus rules themselves.

use crate::hash::{Address, H256};

/// Keccak-256 / SHA-256 hashing and SECP256k1 ECDSA recovery.
pub trait Crypto {
    type Error;

    fn keccak256_to(data: impl AsRef<[u8]>, output: &mut [u8; 32]);

    fn keccak256(data: impl AsRef<[u8]>) -> H256 {
        let mut hash = [0u8; 32];
        Self::keccak256_to(data, &mut hash);
        hash.into()
    }

    fn sha256(data: impl AsRef<[u8]>) -> [u8; 32];

    /// Verify and recover a SECP256k1 ECDSA signature.
    ///
    /// - `signature` is the 65-byte `r ‖ s ‖ v` signature.
    /// - `message_hash` is the hash of the signed message.
    ///
    /// # Errors
    /// Returns `Err` if the signature is malformed or does not recover.
    fn secp256k1_ecdsa_recover(
        signature: &[u8; 65],
        message_hash: H256,
    ) -> Result<Address, Self::Error>;
}

/// Default [`Crypto`] implementation: Keccak-256 via `sha3`, SHA-256 via `sha2`, SECP256k1
/// recovery via `libsecp256k1`.
pub struct DefaultCrypto;

impl Crypto for DefaultCrypto {
    type Error = libsecp256k1::Error;

    fn keccak256_to(data: impl AsRef<[u8]>, output: &mut [u8; 32]) {
        use sha3::Digest;
        let mut hasher = sha3::Keccak256::new();
        hasher.update(data);
        hasher.finalize_into(output.into());
    }

    fn sha256(data: impl AsRef<[u8]>) -> [u8; 32] {
        use sha2::Digest;
        sha2::Sha256::digest(data).into()
    }

    fn secp256k1_ecdsa_recover(
        signature: &[u8; 65],
        message_hash: H256,
    ) -> Result<Address, Self::Error> {
        let rid = libsecp256k1::RecoveryId::parse(signature[64])?;
        let sig = libsecp256k1::Signature::parse_overflowing_slice(&signature[0..64])?;
        let msg = libsecp256k1::Message::parse(message_hash.as_fixed_bytes());
        let pubkey = libsecp256k1::recover(&msg, &sig, &rid)?;
        // uncompress and drop the leading tag byte, then hash like go-ethereum's PubkeyToAddress.
        let uncompressed = pubkey.serialize();
        let hash = Self::keccak256(&uncompressed[1..]);
        Ok(Address::from_slice(&hash.as_bytes()[12..32]))
    }
}

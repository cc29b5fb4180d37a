//! Challenge chaining. The challenge a block's proof must answer is derived deterministically
//! from its parent — no state beyond the parent header is consulted.

use poc_types::{constants::CHALLENGE_INTERVAL, Crypto, Header, H256};

/// `CalcNextChallenge(parent)`: the challenge the next block's proof must answer.
///
/// For the first [`CHALLENGE_INTERVAL`] blocks the chain bootstraps off the parent hash alone;
/// from then on the full input binds the parent's pid, proof, hash, parent-hash, number and k.
#[must_use]
pub fn calc_next_challenge<C: Crypto>(parent: &Header, parent_hash: H256) -> H256 {
    if parent.number < CHALLENGE_INTERVAL {
        return H256::from(C::sha256(parent_hash.as_bytes()));
    }

    let mut buf = Vec::with_capacity(32 + parent.proof.len() + 32 + 32 + 8 + 1);
    buf.extend_from_slice(parent.pid.as_bytes());
    buf.extend_from_slice(parent.proof.as_ref());
    buf.extend_from_slice(parent_hash.as_bytes());
    buf.extend_from_slice(parent.parent_hash.as_bytes());
    buf.extend_from_slice(&parent.number.to_be_bytes());
    buf.push(parent.k);
    H256::from(C::sha256(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use poc_types::{header::Pid, Bytes, DefaultCrypto};

    fn header_at(number: u64) -> Header {
        Header {
            parent_hash: H256::repeat_byte(0x01),
            ommers_hash: H256::zero(),
            beneficiary: Default::default(),
            state_root: H256::zero(),
            transactions_root: H256::zero(),
            receipts_root: H256::zero(),
            logs_bloom: Default::default(),
            difficulty: Default::default(),
            number,
            gas_limit: 0,
            gas_used: 0,
            timestamp: 0,
            extra_data: Bytes::new(),
            mix_hash: H256::zero(),
            nonce: Default::default(),
            base_fee_per_gas: None,
            pid: Pid::repeat_byte(0x02),
            k: 10,
            challenge: H256::zero(),
            proof: Bytes::from_static(b"proof"),
            signed: poc_types::Signature([0u8; 65]),
            net_capacity: 0,
        }
    }

    #[test]
    fn bootstraps_below_challenge_interval() {
        let parent = header_at(5);
        let parent_hash = H256::repeat_byte(0xAB);
        let expected = H256::from(DefaultCrypto::sha256(parent_hash.as_bytes()));
        assert_eq!(calc_next_challenge::<DefaultCrypto>(&parent, parent_hash), expected);
    }

    #[test]
    fn uses_full_formula_at_and_above_challenge_interval() {
        let parent = header_at(10);
        let parent_hash = H256::repeat_byte(0xAB);
        let bootstrap = H256::from(DefaultCrypto::sha256(parent_hash.as_bytes()));
        assert_ne!(calc_next_challenge::<DefaultCrypto>(&parent, parent_hash), bootstrap);
    }

    #[test]
    fn is_a_pure_function_of_parent() {
        let parent = header_at(12);
        let parent_hash = H256::repeat_byte(0xCD);
        let a = calc_next_challenge::<DefaultCrypto>(&parent, parent_hash);
        let b = calc_next_challenge::<DefaultCrypto>(&parent, parent_hash);
        assert_eq!(a, b);
    }
}

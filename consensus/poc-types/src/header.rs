#[cfg(feature = "serde")]
use crate::serde_utils::uint_to_hex;
use crate::{
    bytes::Bytes,
    crypto::Crypto,
    hash::{Address, Bloom, H256, H64, U256},
};

/// 65-byte recoverable ECDSA signature (`r ‖ s ‖ v`) binding a header to its plotter.
///
/// Serialized manually (see `serde_utils`) rather than derived, since `[u8; 65]` has no blanket
/// `serde` impl and we want a `0x`-hex string on the wire like every other header field.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; 65]);

impl Default for Signature {
    fn default() -> Self {
        Self([0u8; 65])
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature(0x{})", const_hex::encode(self.0))
    }
}

impl rlp::Encodable for Signature {
    fn rlp_append(&self, s: &mut rlp::RlpStream) {
        s.encoder().encode_value(&self.0);
    }
}

impl rlp::Decodable for Signature {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        rlp.decoder().decode_value(|bytes| {
            if bytes.len() != 65 {
                return Err(rlp::DecoderError::RlpInvalidLength);
            }
            let mut out = [0u8; 65];
            out.copy_from_slice(bytes);
            Ok(Self(out))
        })
    }
}

/// 32-byte plotter identifier committed to by a capacity proof.
pub type Pid = H256;

/// A candidate block header under proof-of-capacity consensus.
///
/// Carries the base account-model fields (shared with the surrounding wire format) plus the
/// fields the PoC engine adds: `pid`, `k`, `challenge`, `proof`, `signed`, `net_capacity`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Header {
    /// The Keccak 256-bit hash of the parent block's header, in its entirety.
    pub parent_hash: H256,
    /// The Keccak 256-bit hash of the ommers list portion of this block.
    #[cfg_attr(feature = "serde", serde(rename = "sha3Uncles"))]
    pub ommers_hash: H256,
    /// Coinbase: the address credited with this block's reward.
    #[cfg_attr(feature = "serde", serde(rename = "miner", alias = "beneficiary"))]
    pub beneficiary: Address,
    /// Root of the state trie after all transactions and finalization effects are applied.
    pub state_root: H256,
    /// Root of the trie populated with this block's transactions.
    pub transactions_root: H256,
    /// Root of the trie populated with this block's receipts.
    pub receipts_root: H256,
    /// Bloom filter over logger addresses and log topics from this block's receipts.
    pub logs_bloom: Bloom,
    /// PoC difficulty: the minimum quality a proof must exceed to seal this block.
    pub difficulty: U256,
    #[cfg_attr(feature = "serde", serde(with = "uint_to_hex"))]
    pub number: u64,
    #[cfg_attr(feature = "serde", serde(with = "uint_to_hex"))]
    pub gas_limit: u64,
    #[cfg_attr(feature = "serde", serde(with = "uint_to_hex"))]
    pub gas_used: u64,
    #[cfg_attr(feature = "serde", serde(with = "uint_to_hex"))]
    pub timestamp: u64,
    /// At most [`crate::constants::MAX_EXTRA_DATA_SIZE`] bytes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub extra_data: Bytes,
    /// Unused by the PoC engine; kept on the wire for base-format compatibility.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mix_hash: H256,
    /// Unused by the PoC engine; kept on the wire for base-format compatibility.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nonce: H64,
    /// EIP-1559 base fee, present at and after the London activation height.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none", with = "uint_to_hex")
    )]
    pub base_fee_per_gas: Option<u64>,
    /// Plotter identifier the sealing proof is bound to.
    pub pid: Pid,
    /// PoC space parameter for this block's proof; governs proof size class.
    pub k: u8,
    /// Challenge this block's proof answers. See [`crate::CalcNextChallenge`].
    pub challenge: H256,
    /// The capacity proof blob itself; opaque to the header validator.
    #[cfg_attr(feature = "serde", serde(default))]
    pub proof: Bytes,
    /// Recoverable signature over [`Header::signing_input`], binding the header to the plotter.
    pub signed: Signature,
    /// Declared network capacity (GB) as of this block, consumed by the pledge-amount schedule.
    #[cfg_attr(feature = "serde", serde(with = "uint_to_hex"))]
    pub net_capacity: u64,
}

impl Header {
    /// RLP-encodes the fields that feed the canonical block hash: every consensus field,
    /// including the PoC additions. Used as the `parent.hash` input to challenge chaining.
    fn rlp_append_full(&self, s: &mut rlp::RlpStream) {
        let field_count = 21 + usize::from(self.base_fee_per_gas.is_some());
        s.begin_list(field_count);
        s.append(&self.parent_hash);
        s.append(&self.ommers_hash);
        s.append(&self.beneficiary);
        s.append(&self.state_root);
        s.append(&self.transactions_root);
        s.append(&self.receipts_root);
        s.append(&self.logs_bloom);
        s.append(&self.difficulty);
        s.append(&self.number);
        s.append(&self.gas_limit);
        s.append(&self.gas_used);
        s.append(&self.timestamp);
        s.append(&self.extra_data);
        s.append(&self.mix_hash);
        s.append(&self.nonce);
        if let Some(base_fee) = self.base_fee_per_gas {
            s.append(&base_fee);
        }
        s.append(&self.pid);
        s.append(&self.k);
        s.append(&self.challenge);
        s.append(&self.proof);
        s.append(&self.signed);
        s.append(&self.net_capacity);
    }

    /// RLP-encodes the subset of fields defined as the seal hash input: the base-format fields
    /// a miner commits to before sealing, excluding every PoC field and the mutable
    /// `{time, difficulty, nonce, mix_hash}` quartet.
    fn rlp_append_seal(&self, s: &mut rlp::RlpStream) {
        let field_count = 11 + usize::from(self.base_fee_per_gas.is_some());
        s.begin_list(field_count);
        s.append(&self.parent_hash);
        s.append(&self.ommers_hash);
        s.append(&self.beneficiary);
        s.append(&self.state_root);
        s.append(&self.transactions_root);
        s.append(&self.receipts_root);
        s.append(&self.logs_bloom);
        s.append(&self.number);
        s.append(&self.gas_limit);
        s.append(&self.gas_used);
        s.append(&self.extra_data);
        if let Some(base_fee) = self.base_fee_per_gas {
            s.append(&base_fee);
        }
    }

    /// The canonical block hash: Keccak-256 of the full RLP encoding.
    ///
    /// This is the `parent.hash` consumed by [`crate::CalcNextChallenge`], not the seal hash.
    #[must_use]
    pub fn compute_hash<C: Crypto>(&self) -> H256 {
        let mut stream = rlp::RlpStream::new();
        self.rlp_append_full(&mut stream);
        C::keccak256(stream.out())
    }

    /// The seal hash: Keccak-256 of the RLP-restricted field subset a miner signs over,
    /// excluding the PoC-specific and seal-only fields.
    #[must_use]
    pub fn seal_hash<C: Crypto>(&self) -> H256 {
        let mut stream = rlp::RlpStream::new();
        self.rlp_append_seal(&mut stream);
        C::keccak256(stream.out())
    }

    /// The message a sealer signs: `SHA256(root ‖ pid ‖ proof ‖ coinbase)`.
    #[must_use]
    pub fn signing_input<C: Crypto>(&self) -> [u8; 32] {
        let mut buf = Vec::with_capacity(32 + 32 + self.proof.len() + 20);
        buf.extend_from_slice(self.state_root.as_bytes());
        buf.extend_from_slice(self.pid.as_bytes());
        buf.extend_from_slice(self.proof.as_ref());
        buf.extend_from_slice(self.beneficiary.as_bytes());
        C::sha256(buf)
    }

    /// The PoC time-quantum this header was sealed in.
    #[must_use]
    pub fn slot(&self, poc_slot_seconds: u64) -> u64 {
        self.timestamp / poc_slot_seconds
    }
}

impl rlp::Encodable for Header {
    fn rlp_append(&self, s: &mut rlp::RlpStream) {
        self.rlp_append_full(s);
    }
}

impl rlp::Decodable for Header {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        let mut iter = rlp.iter();
        let mut next = || iter.next().ok_or(rlp::DecoderError::RlpIncorrectListLen);

        let parent_hash = next()?.as_val()?;
        let ommers_hash = next()?.as_val()?;
        let beneficiary = next()?.as_val()?;
        let state_root = next()?.as_val()?;
        let transactions_root = next()?.as_val()?;
        let receipts_root = next()?.as_val()?;
        let logs_bloom = next()?.as_val()?;
        let difficulty = next()?.as_val()?;
        let number = next()?.as_val()?;
        let gas_limit = next()?.as_val()?;
        let gas_used = next()?.as_val()?;
        let timestamp = next()?.as_val()?;
        let extra_data = next()?.as_val()?;
        let mix_hash = next()?.as_val()?;
        let nonce = next()?.as_val()?;

        let remaining = rlp.item_count()? - 15;
        let base_fee_per_gas = if remaining == 7 { Some(next()?.as_val()?) } else { None };

        let pid = next()?.as_val()?;
        let k = next()?.as_val()?;
        let challenge = next()?.as_val()?;
        let proof = next()?.as_val()?;
        let signed = next()?.as_val()?;
        let net_capacity = next()?.as_val()?;

        Ok(Self {
            parent_hash,
            ommers_hash,
            beneficiary,
            state_root,
            transactions_root,
            receipts_root,
            logs_bloom,
            difficulty,
            number,
            gas_limit,
            gas_used,
            timestamp,
            extra_data,
            mix_hash,
            nonce,
            base_fee_per_gas,
            pid,
            k,
            challenge,
            proof,
            signed,
            net_capacity,
        })
    }
}

/// A header with its canonical hash memoized alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct SealedHeader {
    header: Header,
    hash: H256,
}

impl SealedHeader {
    #[must_use]
    pub fn new<C: Crypto>(header: Header) -> Self {
        let hash = header.compute_hash::<C>();
        Self { header, hash }
    }

    #[must_use]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub const fn hash(&self) -> H256 {
        self.hash
    }

    #[must_use]
    pub fn into_parts(self) -> (Header, H256) {
        (self.header, self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::DefaultCrypto;

    fn sample_header() -> Header {
        Header {
            parent_hash: H256::zero(),
            ommers_hash: H256::zero(),
            beneficiary: Address::zero(),
            state_root: H256::zero(),
            transactions_root: H256::zero(),
            receipts_root: H256::zero(),
            logs_bloom: Bloom::zero(),
            difficulty: U256::from(1_048_575u64),
            number: 11,
            gas_limit: 8_000_000,
            gas_used: 0,
            timestamp: 1_700_000_000,
            extra_data: Bytes::new(),
            mix_hash: H256::zero(),
            nonce: H64::default(),
            base_fee_per_gas: None,
            pid: Pid::repeat_byte(0x42),
            k: 28,
            challenge: H256::repeat_byte(0x11),
            proof: Bytes::from_static(b"proof-blob"),
            signed: Signature([7u8; 65]),
            net_capacity: 10_000,
        }
    }

    #[test]
    fn seal_hash_ignores_poc_fields() {
        let base = sample_header();
        let mut mutated = base.clone();
        mutated.pid = Pid::repeat_byte(0xAA);
        mutated.k = 1;
        mutated.challenge = H256::repeat_byte(0xBB);
        mutated.proof = Bytes::from_static(b"different-proof");
        mutated.signed = Signature([9u8; 65]);
        mutated.difficulty = U256::from(2_000_000u64);
        mutated.timestamp += 100;
        mutated.nonce = H64([1, 2, 3, 4, 5, 6, 7, 8]);
        mutated.net_capacity += 1;

        assert_eq!(base.seal_hash::<DefaultCrypto>(), mutated.seal_hash::<DefaultCrypto>());
    }

    #[test]
    fn full_hash_changes_with_poc_fields() {
        let base = sample_header();
        let mut mutated = base.clone();
        mutated.k = base.k.wrapping_add(1);
        assert_ne!(base.compute_hash::<DefaultCrypto>(), mutated.compute_hash::<DefaultCrypto>());
    }

    #[test]
    fn rlp_round_trips() {
        let header = sample_header();
        let encoded = rlp::encode(&header);
        let decoded: Header = rlp::decode(&encoded).unwrap();
        assert_eq!(header, decoded);
    }

    #[test]
    fn slot_divides_by_poc_slot() {
        let header = sample_header();
        assert_eq!(header.slot(3), header.timestamp / 3);
    }
}

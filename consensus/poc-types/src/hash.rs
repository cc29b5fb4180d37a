//! Fixed-size primitive types shared by the header, account and wire model.

pub use ethbloom::{Bloom, Input as BloomInput};
pub use primitive_types::{H160 as Address, H256, H512, U256};

/// 8-byte scalar used to RLP-encode the legacy PoW `nonce` field, kept on the wire for
/// base-format compatibility even though the PoC engine never searches it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct H64(pub [u8; 8]);

impl rlp::Encodable for H64 {
    fn rlp_append(&self, s: &mut rlp::RlpStream) {
        let leading_zeros = self.0.iter().take_while(|&&b| b == 0).count();
        s.encoder().encode_value(&self.0[leading_zeros..]);
    }
}

impl rlp::Decodable for H64 {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        rlp.decoder().decode_value(|bytes| {
            if bytes.len() > 8 {
                return Err(rlp::DecoderError::RlpIsTooBig);
            }
            let mut out = [0u8; 8];
            out[8 - bytes.len()..].copy_from_slice(bytes);
            Ok(Self(out))
        })
    }
}

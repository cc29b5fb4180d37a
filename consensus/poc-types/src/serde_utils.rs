//! `serde` helpers for the hexadecimal-string encodings used by the wire format.

/// Serialize/deserialize a `u64` as a `0x`-prefixed hexadecimal string.
pub mod uint_to_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    /// never fails
    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{value:x}"))
    }

    /// # Errors
    /// returns an error if the string is not a valid `0x`-prefixed hexadecimal number
    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.strip_prefix("0x").unwrap_or(&raw);
        u64::from_str_radix(trimmed, 16).map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for crate::header::Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("0x{}", const_hex::encode(self.0)))
    }
}

impl<'de> serde::Deserialize<'de> for crate::header::Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.strip_prefix("0x").unwrap_or(&raw);
        let bytes = const_hex::decode(trimmed).map_err(serde::de::Error::custom)?;
        let array: [u8; 65] =
            bytes.try_into().map_err(|_| serde::de::Error::custom("expected 65 signature bytes"))?;
        Ok(Self(array))
    }
}

use alloy_rlp::Encodable;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::error::TxError;

/// Byte width of an account address.
pub const ADDRESS_LEN: usize = 20;
/// Byte width of a Keccak-256 hash.
pub const HASH_LEN: usize = 32;
/// Byte width of a recoverable ECDSA signature (r[32] + s[32] + v[1]).
pub const SIGNATURE_LEN: usize = 65;

/// The all-zero address sentinel denoting the chain's native asset.
pub const NATIVE_TOKEN: Address = Address([0u8; ADDRESS_LEN]);

/// Keccak-256 of arbitrary bytes.
pub fn keccak256(data: impl AsRef<[u8]>) -> Hash {
    let digest = Keccak256::digest(data.as_ref());
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&digest);
    Hash(out)
}

fn strip_hex_prefix(s: &str) -> Result<&str, TxError> {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| TxError::InvalidHex("missing 0x prefix".into()))
}

fn decode_fixed_hex<const N: usize>(field: &'static str, s: &str) -> Result<[u8; N], TxError> {
    let hex_str = strip_hex_prefix(s)?;
    if hex_str.len() != N * 2 {
        return Err(TxError::InvalidHex(format!(
            "{field}: expected {} hex characters, got {}",
            N * 2,
            hex_str.len()
        )));
    }
    let bytes = hex::decode(hex_str).map_err(|e| TxError::InvalidHex(format!("{field}: {e}")))?;
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// A 20-byte account address.
///
/// The canonical string form is lowercase, 0x-prefixed hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, TxError> {
        let bytes: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| TxError::InvalidLength {
            field: "address",
            expected: ADDRESS_LEN,
            got: bytes.len(),
        })?;
        Ok(Self(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, TxError> {
        decode_fixed_hex::<ADDRESS_LEN>("address", s).map(Self)
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Whether this is the native-asset sentinel.
    pub fn is_native(&self) -> bool {
        *self == NATIVE_TOKEN
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Address {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Encodable for Address {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}

/// A 32-byte Keccak-256 hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash([u8; HASH_LEN]);

impl Hash {
    pub const fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, TxError> {
        let bytes: [u8; HASH_LEN] = bytes.try_into().map_err(|_| TxError::InvalidLength {
            field: "hash",
            expected: HASH_LEN,
            got: bytes.len(),
        })?;
        Ok(Self(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, TxError> {
        decode_fixed_hex::<HASH_LEN>("hash", s).map(Self)
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub const fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }
}

impl std::fmt::Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Hash {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Encodable for Hash {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}

/// A 65-byte recoverable ECDSA signature laid out as r[32] + s[32] + v[1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    pub const fn new(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_rsv(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes[..32].copy_from_slice(&r);
        bytes[32..64].copy_from_slice(&s);
        bytes[64] = v;
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, TxError> {
        let bytes: [u8; SIGNATURE_LEN] = bytes.try_into().map_err(|_| TxError::InvalidLength {
            field: "signature",
            expected: SIGNATURE_LEN,
            got: bytes.len(),
        })?;
        Ok(Self(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, TxError> {
        decode_fixed_hex::<SIGNATURE_LEN>("signature", s).map(Self)
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub fn r(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.0[..32]);
        out
    }

    pub fn s(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.0[32..64]);
        out
    }

    pub const fn v(&self) -> u8 {
        self.0[64]
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Signature {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Encodable for Signature {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}

macro_rules! impl_hex_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(de::Error::custom)
            }
        }
    };
}

impl_hex_serde!(Address);
impl_hex_serde!(Hash);
impl_hex_serde!(Signature);

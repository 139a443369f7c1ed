//! Optional-as-list helpers over the base RLP codec.
//!
//! GoldenEra encodes an optional field as a single-element list: a present
//! value `v` is the list `[v]`, an absent value is the empty list `0xc0`.
//! Absent and zero stay distinct on the wire: `nonce = 0` is `[0xc1, 0x80]`
//! while `nonce = absent` is `[0xc0]`.

use alloy_rlp::{length_of_length, BufMut, Decodable, Encodable, Header, EMPTY_LIST_CODE};

use crate::error::TxError;
use crate::primitives::{Address, Hash, Signature};

/// Already-encoded RLP inserted verbatim.
pub(crate) struct RawRlp<'a>(pub &'a [u8]);

impl Encodable for RawRlp<'_> {
    fn encode(&self, out: &mut dyn BufMut) {
        out.put_slice(self.0);
    }

    fn length(&self) -> usize {
        self.0.len()
    }
}

/// Encodes `Some(v)` as the single-element list `[v]`, `None` as `0xc0`.
pub(crate) fn encode_opt<T: Encodable + ?Sized>(value: Option<&T>, out: &mut dyn BufMut) {
    match value {
        Some(v) => {
            Header { list: true, payload_length: v.length() }.encode(out);
            v.encode(out);
        }
        None => out.put_u8(EMPTY_LIST_CODE),
    }
}

pub(crate) fn opt_length<T: Encodable + ?Sized>(value: Option<&T>) -> usize {
    match value {
        Some(v) => {
            let payload_length = v.length();
            length_of_length(payload_length) + payload_length
        }
        None => 1,
    }
}

/// Decodes a byte string, rejecting lists.
fn decode_byte_string<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8], TxError> {
    let header = Header::decode(buf)?;
    if header.list {
        return Err(alloy_rlp::Error::UnexpectedList.into());
    }
    let (data, rest) = buf.split_at(header.payload_length);
    *buf = rest;
    Ok(data)
}

/// Decodes an optional wrapper list, returning the raw bytes of its payload
/// or `None` for the empty list.
fn decode_opt_payload<'a>(buf: &mut &'a [u8]) -> Result<Option<&'a [u8]>, TxError> {
    let header = Header::decode(buf)?;
    if !header.list {
        return Err(alloy_rlp::Error::UnexpectedString.into());
    }
    if header.payload_length == 0 {
        return Ok(None);
    }
    let (payload, rest) = buf.split_at(header.payload_length);
    *buf = rest;
    Ok(Some(payload))
}

fn decode_opt_with<'a, T>(
    buf: &mut &'a [u8],
    decode: impl FnOnce(&mut &'a [u8]) -> Result<T, TxError>,
) -> Result<Option<T>, TxError> {
    let Some(payload) = decode_opt_payload(buf)? else {
        return Ok(None);
    };
    let mut inner = payload;
    let value = decode(&mut inner)?;
    if !inner.is_empty() {
        return Err(alloy_rlp::Error::Custom("optional wrapper must hold exactly one element").into());
    }
    Ok(Some(value))
}

pub(crate) fn decode_address(buf: &mut &[u8]) -> Result<Address, TxError> {
    let bytes = decode_byte_string(buf)?;
    Address::from_slice(bytes)
}

pub(crate) fn decode_hash(buf: &mut &[u8]) -> Result<Hash, TxError> {
    let bytes = decode_byte_string(buf)?;
    Hash::from_slice(bytes)
}

pub(crate) fn decode_signature(buf: &mut &[u8]) -> Result<Signature, TxError> {
    let bytes = decode_byte_string(buf)?;
    Signature::from_slice(bytes)
}

pub(crate) fn decode_string(buf: &mut &[u8], field: &'static str) -> Result<String, TxError> {
    let bytes = decode_byte_string(buf)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| TxError::InvalidUtf8(field))
}

pub(crate) fn decode_bool(buf: &mut &[u8]) -> Result<bool, TxError> {
    match u8::decode(buf)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(alloy_rlp::Error::Custom("boolean scalar must be 0 or 1").into()),
    }
}

pub(crate) fn decode_opt_u64(buf: &mut &[u8]) -> Result<Option<u64>, TxError> {
    decode_opt_with(buf, |b| u64::decode(b).map_err(TxError::from))
}

pub(crate) fn decode_opt_u256(buf: &mut &[u8]) -> Result<Option<alloy_primitives::U256>, TxError> {
    decode_opt_with(buf, |b| alloy_primitives::U256::decode(b).map_err(TxError::from))
}

pub(crate) fn decode_opt_bytes(buf: &mut &[u8]) -> Result<Option<Vec<u8>>, TxError> {
    decode_opt_with(buf, |b| decode_byte_string(b).map(<[u8]>::to_vec))
}

pub(crate) fn decode_opt_string(
    buf: &mut &[u8],
    field: &'static str,
) -> Result<Option<String>, TxError> {
    decode_opt_with(buf, |b| decode_string(b, field))
}

pub(crate) fn decode_opt_address(buf: &mut &[u8]) -> Result<Option<Address>, TxError> {
    decode_opt_with(buf, decode_address)
}

pub(crate) fn decode_opt_hash(buf: &mut &[u8]) -> Result<Option<Hash>, TxError> {
    decode_opt_with(buf, decode_hash)
}

/// Decodes an optional wrapper holding one already-encoded list, returning
/// the inner element's raw bytes without interpreting them.
pub(crate) fn decode_opt_raw<'a>(buf: &mut &'a [u8]) -> Result<Option<&'a [u8]>, TxError> {
    let Some(payload) = decode_opt_payload(buf)? else {
        return Ok(None);
    };
    let mut peek = payload;
    let inner = Header::decode(&mut peek)?;
    if !inner.list {
        return Err(alloy_rlp::Error::UnexpectedString.into());
    }
    if inner.payload_length != peek.len() {
        return Err(alloy_rlp::Error::Custom("optional wrapper must hold exactly one element").into());
    }
    Ok(Some(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    fn encode_opt_to_vec<T: Encodable + ?Sized>(value: Option<&T>) -> Vec<u8> {
        let mut out = Vec::new();
        encode_opt(value, &mut out);
        out
    }

    #[test]
    fn absent_encodes_as_empty_list() {
        assert_eq!(encode_opt_to_vec::<u64>(None), vec![0xc0]);
        assert_eq!(opt_length::<u64>(None), 1);
    }

    #[test]
    fn present_zero_is_distinct_from_absent() {
        // nonce = 0 is the one-element list holding the empty scalar.
        assert_eq!(encode_opt_to_vec(Some(&0u64)), vec![0xc1, 0x80]);
        assert_eq!(decode_opt_u64(&mut &[0xc1, 0x80][..]).unwrap(), Some(0));
        assert_eq!(decode_opt_u64(&mut &[0xc0][..]).unwrap(), None);
    }

    #[test]
    fn small_scalar_encodes_as_itself() {
        assert_eq!(encode_opt_to_vec(Some(&1u64)), vec![0xc1, 0x01]);
        assert_eq!(encode_opt_to_vec(Some(&0x7fu64)), vec![0xc1, 0x7f]);
    }

    #[test]
    fn scalar_0x80_gains_length_prefix() {
        assert_eq!(encode_opt_to_vec(Some(&0x80u64)), vec![0xc2, 0x81, 0x80]);
        assert_eq!(decode_opt_u64(&mut &[0xc2, 0x81, 0x80][..]).unwrap(), Some(0x80));
    }

    #[test]
    fn u256_scalar_strips_leading_zeros() {
        let value = U256::from(0x0102u64);
        assert_eq!(encode_opt_to_vec(Some(&value)), vec![0xc3, 0x82, 0x01, 0x02]);
    }

    #[test]
    fn address_wraps_as_single_element_list() {
        let addr = Address::new([0xde; 20]);
        let encoded = encode_opt_to_vec(Some(&addr));
        // List of 21 payload bytes: 0x94 string prefix + 20 address bytes.
        assert_eq!(encoded.len(), 22);
        assert_eq!(encoded[0], 0xc0 + 21);
        assert_eq!(encoded[1], 0x94);
        assert_eq!(&encoded[2..], &[0xde; 20]);
        assert_eq!(opt_length(Some(&addr)), 22);

        let decoded = decode_opt_address(&mut &encoded[..]).unwrap();
        assert_eq!(decoded, Some(addr));
    }

    #[test]
    fn hash_wraps_as_single_element_list() {
        let hash = Hash::new([0xab; 32]);
        let encoded = encode_opt_to_vec(Some(&hash));
        assert_eq!(encoded.len(), 35);
        assert_eq!(encoded[0], 0xc0 + 33);
        assert_eq!(encoded[1], 0xa0);
        assert_eq!(decode_opt_hash(&mut &encoded[..]).unwrap(), Some(hash));
    }

    #[test]
    fn bytes_wrap_round_trip() {
        let message = b"Hello GoldenEra!".as_slice();
        let encoded = encode_opt_to_vec(Some(message));
        let decoded = decode_opt_bytes(&mut &encoded[..]).unwrap();
        assert_eq!(decoded.as_deref(), Some(message));
    }

    #[test]
    fn empty_bytes_present_is_not_absent() {
        let empty: &[u8] = &[];
        let encoded = encode_opt_to_vec(Some(empty));
        assert_eq!(encoded, vec![0xc1, 0x80]);
        assert_eq!(decode_opt_bytes(&mut &encoded[..]).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn wrapper_with_two_elements_rejected() {
        // [0x01, 0x02] is a two-element list; the wrapper allows exactly one.
        let bytes = [0xc2, 0x01, 0x02];
        assert!(decode_opt_u64(&mut &bytes[..]).is_err());
    }

    #[test]
    fn string_where_wrapper_expected_rejected() {
        let bytes = [0x81, 0x80];
        let result = decode_opt_u64(&mut &bytes[..]);
        assert!(matches!(
            result,
            Err(TxError::Rlp(alloy_rlp::Error::UnexpectedString))
        ));
    }

    #[test]
    fn truncated_wrapper_rejected() {
        // Wrapper claims 33 payload bytes but only 1 follows.
        let bytes = [0xe1, 0xa0];
        let result = decode_opt_hash(&mut &bytes[..]);
        assert!(matches!(result, Err(TxError::Rlp(alloy_rlp::Error::InputTooShort))));
    }

    #[test]
    fn wrapped_address_wrong_width_rejected() {
        // 19-byte string inside the wrapper.
        let mut bytes = vec![0xc0 + 20, 0x93];
        bytes.extend_from_slice(&[0u8; 19]);
        let result = decode_opt_address(&mut &bytes[..]);
        assert!(matches!(
            result,
            Err(TxError::InvalidLength { field: "address", expected: 20, got: 19 })
        ));
    }

    #[test]
    fn non_canonical_scalar_rejected() {
        // Leading zero byte in the wrapped scalar.
        let bytes = [0xc3, 0x82, 0x00, 0x01];
        assert!(decode_opt_u64(&mut &bytes[..]).is_err());
    }

    #[test]
    fn raw_rlp_passes_through_verbatim() {
        let inner = vec![0xc2, 0x09, 0x01];
        let encoded = encode_opt_to_vec(Some(&RawRlp(&inner)));
        assert_eq!(encoded, vec![0xc4, 0xc2, 0x09, 0x01]);

        let decoded = decode_opt_raw(&mut &encoded[..]).unwrap();
        assert_eq!(decoded, Some(inner.as_slice()));
    }

    #[test]
    fn raw_wrapper_rejects_string_inner() {
        // Wrapper holds a byte string where a list is required.
        let bytes = [0xc2, 0x81, 0xff];
        assert!(matches!(
            decode_opt_raw(&mut &bytes[..]),
            Err(TxError::Rlp(alloy_rlp::Error::UnexpectedString))
        ));
    }

    #[test]
    fn bool_scalars() {
        let mut out = Vec::new();
        1u8.encode(&mut out);
        assert_eq!(out, vec![0x01]);
        assert!(decode_bool(&mut &[0x01][..]).unwrap());
        assert!(!decode_bool(&mut &[0x80][..]).unwrap());
        assert!(decode_bool(&mut &[0x02][..]).is_err());
    }

    #[test]
    fn decode_string_rejects_invalid_utf8() {
        let bytes = [0x82, 0xff, 0xfe];
        let result = decode_string(&mut &bytes[..], "alias");
        assert!(matches!(result, Err(TxError::InvalidUtf8("alias"))));
    }
}

//! secp256k1 signing and sender recovery.
//!
//! Signatures are deterministic (RFC 6979), low-S normalized, and carry
//! `v = recovery_id + 27`. Recovery accepts only `v` of 27 or 28; raw
//! recovery ids are out of contract.

use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use zeroize::Zeroize;

use crate::error::TxError;
use crate::primitives::{keccak256, Address, Hash, Signature, SIGNATURE_LEN};

/// Signs a 32-byte message hash, returning the 65-byte r‖s‖v signature.
pub fn sign_hash(private_key: &[u8; 32], message_hash: &Hash) -> Result<Signature, TxError> {
    let mut key_bytes = *private_key;
    let signing_key = SigningKey::from_bytes((&key_bytes).into())
        .map_err(|e| TxError::InvalidPrivateKey(e.to_string()))?;
    key_bytes.zeroize();

    let (signature, recovery_id): (EcdsaSignature, RecoveryId) = signing_key
        .sign_prehash(message_hash.as_bytes())
        .map_err(|e| TxError::SigningError(e.to_string()))?;

    // Low-S normalization flips the recovery parity.
    let (signature, recovery_id) = match signature.normalize_s() {
        Some(normalized) => {
            let flipped = RecoveryId::from_byte(recovery_id.to_byte() ^ 1)
                .ok_or_else(|| TxError::SigningError("recovery id out of range".into()))?;
            (normalized, flipped)
        }
        None => (signature, recovery_id),
    };

    let mut sig = [0u8; SIGNATURE_LEN];
    sig[..32].copy_from_slice(&signature.r().to_bytes());
    sig[32..64].copy_from_slice(&signature.s().to_bytes());
    sig[64] = recovery_id.to_byte() + 27;
    Ok(Signature::new(sig))
}

/// Structural validation shared by recovery: v in {27, 28}, r and s in
/// range, s low-S normalized.
fn parse_signature(signature: &Signature) -> Result<(EcdsaSignature, RecoveryId), TxError> {
    let v = signature.v();
    if v != 27 && v != 28 {
        return Err(TxError::InvalidSignature(format!("v must be 27 or 28, got {v}")));
    }
    let parsed = EcdsaSignature::from_slice(&signature.as_bytes()[..64])
        .map_err(|e| TxError::InvalidSignature(e.to_string()))?;
    if parsed.normalize_s().is_some() {
        return Err(TxError::InvalidSignature("s is not low-S normalized".into()));
    }
    let recovery_id = RecoveryId::from_byte(v - 27)
        .ok_or_else(|| TxError::InvalidSignature("recovery id out of range".into()))?;
    Ok((parsed, recovery_id))
}

/// Recovers the signer's address from a message hash and signature.
pub fn recover_address(message_hash: &Hash, signature: &Signature) -> Result<Address, TxError> {
    let (sig, recovery_id) = parse_signature(signature)?;
    let verifying_key =
        VerifyingKey::recover_from_prehash(message_hash.as_bytes(), &sig, recovery_id)
            .map_err(|e| TxError::InvalidSignature(e.to_string()))?;
    address_from_verifying_key(&verifying_key)
}

/// Whether the signature over `message_hash` was produced by `expected`.
pub fn validate_signature(message_hash: &Hash, signature: &Signature, expected: &Address) -> bool {
    matches!(recover_address(message_hash, signature), Ok(address) if address == *expected)
}

/// Derives the address from a 65-byte uncompressed public key: the low 20
/// bytes of the Keccak-256 of the key without its 0x04 tag.
pub fn address_from_public_key(uncompressed_pubkey: &[u8; 65]) -> Result<Address, TxError> {
    if uncompressed_pubkey[0] != 0x04 {
        return Err(TxError::InvalidPublicKey(
            "uncompressed key must start with 0x04".into(),
        ));
    }
    let digest = keccak256(&uncompressed_pubkey[1..]);
    Address::from_slice(&digest.as_bytes()[12..])
}

/// Derives the address controlled by a private key.
pub fn address_from_private_key(private_key: &[u8; 32]) -> Result<Address, TxError> {
    let mut key_bytes = *private_key;
    let signing_key = SigningKey::from_bytes((&key_bytes).into())
        .map_err(|e| TxError::InvalidPrivateKey(e.to_string()))?;
    key_bytes.zeroize();
    address_from_verifying_key(signing_key.verifying_key())
}

fn address_from_verifying_key(verifying_key: &VerifyingKey) -> Result<Address, TxError> {
    let point = verifying_key.to_encoded_point(false);
    let bytes: &[u8] = point.as_bytes();
    let uncompressed: [u8; 65] = bytes
        .try_into()
        .map_err(|_| TxError::InvalidPublicKey("unexpected uncompressed key length".into()))?;
    address_from_public_key(&uncompressed)
}

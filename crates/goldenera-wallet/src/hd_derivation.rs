use bip32::{DerivationPath, XPrv};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use zeroize::Zeroize;

use crate::error::WalletError;

/// BIP-44 path used for GoldenEra accounts: m/44'/60'/0'/0/{index}.
pub fn derivation_path(index: u32) -> String {
    format!("m/44'/60'/0'/0/{index}")
}

/// A secp256k1 key derived from a seed. The private key is zeroized when
/// the struct is dropped.
pub struct DerivedKey {
    pub private_key: [u8; 32],
    pub public_key_compressed: [u8; 33],
    pub public_key_uncompressed: [u8; 65],
    pub derivation_path: String,
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

/// Derives the account key at the given index from a BIP-39 seed.
pub fn derive_key(seed: &[u8], index: u32) -> Result<DerivedKey, WalletError> {
    let path_str = derivation_path(index);

    let path: DerivationPath = path_str
        .parse()
        .map_err(|e: bip32::Error| WalletError::DerivationFailed(e.to_string()))?;

    let xprv = XPrv::derive_from_path(seed, &path)
        .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;

    let private_key: [u8; 32] = xprv.to_bytes().into();
    let signing_key = SigningKey::from_bytes(&private_key.into())
        .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;

    let verifying_key = signing_key.verifying_key();
    let public_key_compressed: [u8; 33] = verifying_key
        .to_sec1_bytes()
        .as_ref()
        .try_into()
        .map_err(|_| WalletError::DerivationFailed("invalid compressed public key".into()))?;

    let public_key_uncompressed: [u8; 65] = verifying_key
        .to_encoded_point(false)
        .as_bytes()
        .try_into()
        .map_err(|_| WalletError::DerivationFailed("invalid uncompressed public key".into()))?;

    Ok(DerivedKey {
        private_key,
        public_key_compressed,
        public_key_uncompressed,
        derivation_path: path_str,
    })
}

use zeroize::Zeroize;

use goldenera_tx::signing;
use goldenera_tx::Address;

use crate::error::WalletError;
use crate::hd_derivation::{derive_key, DerivedKey};
use crate::mnemonic::mnemonic_to_seed;

/// A GoldenEra account: a derived private key bound to its address and
/// derivation path. The key is zeroized on drop.
pub struct Account {
    private_key: [u8; 32],
    address: Address,
    derivation_path: String,
}

impl Account {
    /// Derives the account at `index` from a BIP-39 mnemonic.
    pub fn from_mnemonic(phrase: &str, passphrase: &str, index: u32) -> Result<Self, WalletError> {
        let mut seed = mnemonic_to_seed(phrase, passphrase)?;
        let key = derive_key(&seed, index);
        seed.zeroize();
        Self::from_derived(key?)
    }

    /// Wraps a raw private key, deriving its address.
    pub fn from_private_key(private_key: [u8; 32]) -> Result<Self, WalletError> {
        let address = signing::address_from_private_key(&private_key)
            .map_err(|e| WalletError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self {
            private_key,
            address,
            derivation_path: String::new(),
        })
    }

    fn from_derived(key: DerivedKey) -> Result<Self, WalletError> {
        let address = signing::address_from_public_key(&key.public_key_uncompressed)?;
        Ok(Self {
            private_key: key.private_key,
            address,
            derivation_path: key.derivation_path.clone(),
        })
    }

    pub const fn address(&self) -> Address {
        self.address
    }

    /// Empty for accounts built from a raw private key.
    pub fn derivation_path(&self) -> &str {
        &self.derivation_path
    }

    pub const fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }
}

impl Drop for Account {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

impl From<goldenera_tx::TxError> for WalletError {
    fn from(e: goldenera_tx::TxError) -> Self {
        WalletError::TransactionFailed(e.to_string())
    }
}

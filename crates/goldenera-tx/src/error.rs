use thiserror::Error;

/// GoldenEra transaction library errors.
#[derive(Debug, Error)]
pub enum TxError {
    // Builder errors, all raised before signing.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("transaction build error: {0}")]
    Build(String),

    // Codec framing errors.
    #[error("rlp error: {0}")]
    Rlp(#[from] alloy_rlp::Error),

    #[error("{field} must be exactly {expected} bytes, got {got}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("invalid utf-8 in {0}")]
    InvalidUtf8(&'static str),

    // Codec semantic errors.
    #[error("unknown transaction version: {0}")]
    UnknownVersion(u64),

    #[error("unknown network code: {0}")]
    UnknownNetwork(u64),

    #[error("unknown transaction type code: {0}")]
    UnknownTxType(u64),

    #[error("unknown payload type code: {0}")]
    UnknownPayloadType(u64),

    #[error("unknown vote code: {0}")]
    UnknownVoteType(u64),

    // Crypto errors.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("signing error: {0}")]
    SigningError(String),

    // String form errors.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_field() {
        let err = TxError::MissingField("recipient");
        assert_eq!(err.to_string(), "missing required field: recipient");
    }

    #[test]
    fn display_invalid_length() {
        let err = TxError::InvalidLength {
            field: "address",
            expected: 20,
            got: 19,
        };
        assert_eq!(err.to_string(), "address must be exactly 20 bytes, got 19");
    }

    #[test]
    fn display_unknown_payload_type() {
        let err = TxError::UnknownPayloadType(42);
        assert_eq!(err.to_string(), "unknown payload type code: 42");
    }

    #[test]
    fn rlp_error_converts() {
        let err: TxError = alloy_rlp::Error::InputTooShort.into();
        assert!(matches!(err, TxError::Rlp(_)));
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> = Box::new(TxError::UnknownVersion(7));
        assert!(err.to_string().contains('7'));
    }
}

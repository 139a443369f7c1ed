//! Validating transaction builder.
//!
//! The builder is the only mutable intermediate; `sign` validates the
//! per-type field rules, signs, and returns an immutable
//! [`SignedTransaction`] with its derived fields frozen.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::U256;

use crate::codes::{Network, TxType, TxVersion};
use crate::error::TxError;
use crate::payload::Payload;
use crate::primitives::{Address, Hash, NATIVE_TOKEN};
use crate::signing;
use crate::transaction::{SignedTransaction, Transaction};

#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    network: Network,
    tx_type: TxType,
    timestamp: Option<u64>,
    nonce: Option<u64>,
    recipient: Option<Address>,
    token_address: Option<Address>,
    amount: Option<U256>,
    fee: U256,
    message: Option<Vec<u8>>,
    payload: Option<Payload>,
    reference_hash: Option<Hash>,
}

impl TransactionBuilder {
    pub fn new(network: Network, tx_type: TxType) -> Self {
        Self {
            network,
            tx_type,
            timestamp: None,
            nonce: None,
            recipient: None,
            token_address: None,
            amount: None,
            fee: U256::ZERO,
            message: None,
            payload: None,
            reference_hash: None,
        }
    }

    /// Milliseconds since the Unix epoch; defaults to the current time.
    pub fn timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp = Some(timestamp_ms);
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn recipient(mut self, recipient: Address) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn token_address(mut self, token_address: Address) -> Self {
        self.token_address = Some(token_address);
        self
    }

    /// Amount in wei.
    pub fn amount(mut self, amount: U256) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Fee in wei; defaults to zero.
    pub fn fee(mut self, fee: U256) -> Self {
        self.fee = fee;
        self
    }

    pub fn message(mut self, message: Vec<u8>) -> Self {
        self.message = Some(message);
        self
    }

    pub fn message_text(self, message: &str) -> Self {
        self.message(message.as_bytes().to_vec())
    }

    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn reference_hash(mut self, reference_hash: Hash) -> Self {
        self.reference_hash = Some(reference_hash);
        self
    }

    fn validate(&self) -> Result<(), TxError> {
        match self.tx_type {
            TxType::Transfer => {
                if self.recipient.is_none() {
                    return Err(TxError::MissingField("recipient"));
                }
                if self.payload.is_some() {
                    return Err(TxError::Build("payload not allowed for TRANSFER".into()));
                }
                if self.reference_hash.is_some() {
                    return Err(TxError::Build(
                        "reference hash not allowed for TRANSFER".into(),
                    ));
                }
            }
            TxType::BipCreate => {
                if self.payload.is_none() {
                    return Err(TxError::MissingField("payload"));
                }
                if self.amount.is_some() {
                    return Err(TxError::Build("amount not allowed for BIP_CREATE".into()));
                }
                if self.recipient.is_some() {
                    return Err(TxError::Build("recipient not allowed for BIP_CREATE".into()));
                }
                if self.reference_hash.is_some() {
                    return Err(TxError::Build(
                        "reference hash not allowed for BIP_CREATE".into(),
                    ));
                }
            }
            TxType::BipVote => {
                match self.payload {
                    None => return Err(TxError::MissingField("payload")),
                    Some(Payload::Vote { .. }) => {}
                    Some(_) => {
                        return Err(TxError::Build("BIP_VOTE requires a vote payload".into()))
                    }
                }
                if self.reference_hash.is_none() {
                    return Err(TxError::MissingField("reference_hash"));
                }
                if self.amount.is_some() {
                    return Err(TxError::Build("amount not allowed for BIP_VOTE".into()));
                }
            }
        }
        Ok(())
    }

    /// Validates the per-type rules and produces the unsigned transaction.
    pub fn build(self) -> Result<Transaction, TxError> {
        self.validate()?;

        let token_address = match self.tx_type {
            TxType::Transfer => self.token_address.or(Some(NATIVE_TOKEN)),
            _ => self.token_address,
        };

        Ok(Transaction {
            version: TxVersion::V1,
            timestamp: self.timestamp.unwrap_or_else(now_millis),
            tx_type: self.tx_type,
            network: self.network,
            nonce: self.nonce,
            recipient: self.recipient,
            token_address,
            amount: self.amount,
            fee: self.fee,
            message: self.message,
            payload: self.payload,
            reference_hash: self.reference_hash,
            signature: None,
        })
    }

    /// Terminal operation: validate, sign, and seal the transaction.
    pub fn sign(self, private_key: &[u8; 32]) -> Result<SignedTransaction, TxError> {
        let mut transaction = self.build()?;
        let signing_hash = transaction.signing_hash()?;
        transaction.signature = Some(signing::sign_hash(private_key, &signing_hash)?);
        SignedTransaction::new(transaction)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

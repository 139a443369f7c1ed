//! Typed transactions and the canonical V1 wire encoding.
//!
//! The outer RLP list order is fixed:
//!
//! `[version, timestamp, type, network, nonce?, recipient?, tokenAddress?,
//!   amount?, fee, message?, payload?, referenceHash?, signature]`
//!
//! where `?` marks optional-as-list wrapped fields, `fee` is a mandatory
//! unwrapped scalar, the payload wrapper holds the already-encoded payload
//! list, and the signature (when present) is appended as a bare 65-byte
//! string.

use alloy_primitives::U256;
use alloy_rlp::{length_of_length, Decodable, Encodable, Header};
use serde::{Deserialize, Serialize};

use crate::codes::{Network, TxType, TxVersion};
use crate::error::TxError;
use crate::payload::Payload;
use crate::primitives::{keccak256, Address, Hash, Signature};
use crate::rlp::{self, RawRlp};
use crate::signing;

/// A GoldenEra transaction. The signature is absent on the unsigned form
/// and present once signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: TxVersion,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub tx_type: TxType,
    pub network: Network,
    pub nonce: Option<u64>,
    pub recipient: Option<Address>,
    pub token_address: Option<Address>,
    /// Amount in wei.
    pub amount: Option<U256>,
    /// Fee in wei; mandatory, zero allowed.
    pub fee: U256,
    pub message: Option<Vec<u8>>,
    pub payload: Option<Payload>,
    pub reference_hash: Option<Hash>,
    pub signature: Option<Signature>,
}

impl Transaction {
    fn fields_length(&self, payload_raw: Option<&[u8]>, include_signature: bool) -> usize {
        let raw = payload_raw.map(RawRlp);
        let mut len = self.version.code().length()
            + self.timestamp.length()
            + self.tx_type.code().length()
            + self.network.code().length()
            + rlp::opt_length(self.nonce.as_ref())
            + rlp::opt_length(self.recipient.as_ref())
            + rlp::opt_length(self.token_address.as_ref())
            + rlp::opt_length(self.amount.as_ref())
            + self.fee.length()
            + rlp::opt_length(self.message.as_deref())
            + rlp::opt_length(raw.as_ref())
            + rlp::opt_length(self.reference_hash.as_ref());
        if include_signature {
            // Present by the time this is called.
            len += self.signature.map_or(0, |sig| sig.length());
        }
        len
    }

    fn encode_fields(&self, payload_raw: Option<&[u8]>, include_signature: bool, out: &mut Vec<u8>) {
        let raw = payload_raw.map(RawRlp);
        self.version.code().encode(out);
        self.timestamp.encode(out);
        self.tx_type.code().encode(out);
        self.network.code().encode(out);
        rlp::encode_opt(self.nonce.as_ref(), out);
        rlp::encode_opt(self.recipient.as_ref(), out);
        rlp::encode_opt(self.token_address.as_ref(), out);
        rlp::encode_opt(self.amount.as_ref(), out);
        self.fee.encode(out);
        rlp::encode_opt(self.message.as_deref(), out);
        rlp::encode_opt(raw.as_ref(), out);
        rlp::encode_opt(self.reference_hash.as_ref(), out);
        if include_signature {
            if let Some(signature) = &self.signature {
                signature.encode(out);
            }
        }
    }

    /// Encodes the transaction. With `include_signature` the transaction
    /// must already carry one.
    pub fn encode(&self, include_signature: bool) -> Result<Vec<u8>, TxError> {
        if include_signature && self.signature.is_none() {
            return Err(TxError::InvalidSignature("transaction is not signed".into()));
        }
        let payload_raw = self.payload.as_ref().map(Payload::encode);
        let payload_length = self.fields_length(payload_raw.as_deref(), include_signature);
        let mut out = Vec::with_capacity(length_of_length(payload_length) + payload_length);
        Header { list: true, payload_length }.encode(&mut out);
        self.encode_fields(payload_raw.as_deref(), include_signature, &mut out);
        Ok(out)
    }

    /// Keccak-256 of the unsigned encoding; the message actually signed.
    pub fn signing_hash(&self) -> Result<Hash, TxError> {
        Ok(keccak256(self.encode(false)?))
    }

    /// Decodes a transaction, signed or unsigned. Version dispatch happens
    /// before any other field is read.
    pub fn decode(mut buf: &[u8]) -> Result<Self, TxError> {
        let buf = &mut buf;
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(alloy_rlp::Error::UnexpectedString.into());
        }
        if header.payload_length != buf.len() {
            return Err(alloy_rlp::Error::UnexpectedLength.into());
        }

        let version = TxVersion::from_code(u64::decode(buf)?)?;
        let timestamp = u64::decode(buf)?;
        let tx_type = TxType::from_code(u64::decode(buf)?)?;
        let network = Network::from_code(u64::decode(buf)?)?;
        let nonce = rlp::decode_opt_u64(buf)?;
        let recipient = rlp::decode_opt_address(buf)?;
        let token_address = rlp::decode_opt_address(buf)?;
        let amount = rlp::decode_opt_u256(buf)?;
        let fee = U256::decode(buf)?;
        let message = rlp::decode_opt_bytes(buf)?;
        let payload = match rlp::decode_opt_raw(buf)? {
            Some(raw) => Some(Payload::decode(raw)?),
            None => None,
        };
        let reference_hash = rlp::decode_opt_hash(buf)?;
        let signature = if buf.is_empty() {
            None
        } else {
            Some(rlp::decode_signature(buf)?)
        };
        if !buf.is_empty() {
            return Err(alloy_rlp::Error::UnexpectedLength.into());
        }

        Ok(Self {
            version,
            timestamp,
            tx_type,
            network,
            nonce,
            recipient,
            token_address,
            amount,
            fee,
            message,
            payload,
            reference_hash,
            signature,
        })
    }
}

/// A signed transaction with its derived fields computed once and frozen:
/// the recovered sender, the canonical hash, and the encoded size.
///
/// Only [`SignedTransaction::new`] and [`SignedTransaction::decode`]
/// construct this type, so the derived fields always match the encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedTransaction {
    transaction: Transaction,
    sender: Address,
    hash: Hash,
    size: u32,
}

impl SignedTransaction {
    /// Seals a signed [`Transaction`], recovering the sender and computing
    /// the canonical hash and size.
    pub fn new(transaction: Transaction) -> Result<Self, TxError> {
        let signature = transaction
            .signature
            .ok_or_else(|| TxError::InvalidSignature("transaction is not signed".into()))?;
        let signing_hash = transaction.signing_hash()?;
        let sender = signing::recover_address(&signing_hash, &signature)?;
        let encoded = transaction.encode(true)?;
        let hash = keccak256(&encoded);
        let size = encoded.len() as u32;
        Ok(Self { transaction, sender, hash, size })
    }

    /// Decodes a signed transaction from its canonical bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, TxError> {
        Self::new(Transaction::decode(bytes)?)
    }

    pub fn encode(&self) -> Result<Vec<u8>, TxError> {
        self.transaction.encode(true)
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Address recovered from the signature over the signing hash.
    pub const fn sender(&self) -> Address {
        self.sender
    }

    /// Keccak-256 of the canonical encoding, the transaction's identity.
    pub const fn hash(&self) -> Hash {
        self.hash
    }

    /// Byte length of the canonical encoding.
    pub const fn size(&self) -> u32 {
        self.size
    }

    pub fn signature(&self) -> Signature {
        // Guaranteed present by construction.
        self.transaction.signature.expect("signed transaction carries a signature")
    }

    pub fn signing_hash(&self) -> Result<Hash, TxError> {
        self.transaction.signing_hash()
    }
}

//! GoldenEra transaction construction, signing, and serialization.
//!
//! This crate provides:
//! - Fixed-width primitives (addresses, hashes, signatures) with lowercase
//!   0x hex string forms
//! - The GoldenEra RLP wire codec, including the optional-as-list wrapping
//!   convention
//! - Typed transactions and BIP payloads with the canonical V1 encoding
//! - secp256k1 signing with low-S normalization and sender recovery
//! - A validating transaction builder
//! - Decimal amount ⇄ wei conversion helpers
//!
//! Encoding is byte-exact: identical inputs always produce identical
//! signing hashes, canonical hashes, signatures, and wire bytes.

pub mod amount;
pub mod builder;
pub mod codes;
pub mod error;
pub mod payload;
pub mod primitives;
mod rlp;
pub mod signing;
pub mod transaction;

pub use alloy_primitives::U256;
pub use builder::TransactionBuilder;
pub use codes::{Network, PayloadType, TxType, TxVersion, VoteType};
pub use error::TxError;
pub use payload::{NetworkParams, Payload, TokenCreate, TokenUpdate};
pub use primitives::{keccak256, Address, Hash, Signature, NATIVE_TOKEN};
pub use transaction::{SignedTransaction, Transaction};

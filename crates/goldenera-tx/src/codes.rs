use serde::{Deserialize, Serialize};

use crate::error::TxError;

/// Target network. The code is part of the signed bytes, so a transaction
/// signed for one network is invalid on the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub const fn code(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Testnet => 2,
        }
    }

    pub fn from_code(code: u64) -> Result<Self, TxError> {
        match code {
            1 => Ok(Network::Mainnet),
            2 => Ok(Network::Testnet),
            other => Err(TxError::UnknownNetwork(other)),
        }
    }

    pub fn is_testnet(&self) -> bool {
        matches!(self, Network::Testnet)
    }
}

/// Transaction wire-format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxVersion {
    V1,
}

impl TxVersion {
    pub const fn code(&self) -> u64 {
        match self {
            TxVersion::V1 => 1,
        }
    }

    pub fn from_code(code: u64) -> Result<Self, TxError> {
        match code {
            1 => Ok(TxVersion::V1),
            other => Err(TxError::UnknownVersion(other)),
        }
    }
}

/// Transaction kind, governing which fields are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxType {
    Transfer,
    BipCreate,
    BipVote,
}

impl TxType {
    pub const fn code(&self) -> u64 {
        match self {
            TxType::Transfer => 1,
            TxType::BipCreate => 2,
            TxType::BipVote => 3,
        }
    }

    pub fn from_code(code: u64) -> Result<Self, TxError> {
        match code {
            1 => Ok(TxType::Transfer),
            2 => Ok(TxType::BipCreate),
            3 => Ok(TxType::BipVote),
            other => Err(TxError::UnknownTxType(other)),
        }
    }
}

/// BIP payload kind. Codes are stable across transaction versions.
///
/// Validator add/remove codes are reserved upstream and have no payload
/// arms here; they decode as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayloadType {
    AddressAliasAdd,
    AddressAliasRemove,
    AuthorityAdd,
    AuthorityRemove,
    NetworkParamsSet,
    TokenBurn,
    TokenCreate,
    TokenMint,
    TokenUpdate,
    Vote,
}

impl PayloadType {
    pub const fn code(&self) -> u64 {
        match self {
            PayloadType::AddressAliasAdd => 0,
            PayloadType::AddressAliasRemove => 1,
            PayloadType::AuthorityAdd => 2,
            PayloadType::AuthorityRemove => 3,
            PayloadType::NetworkParamsSet => 4,
            PayloadType::TokenBurn => 5,
            PayloadType::TokenCreate => 6,
            PayloadType::TokenMint => 7,
            PayloadType::TokenUpdate => 8,
            PayloadType::Vote => 9,
        }
    }

    pub fn from_code(code: u64) -> Result<Self, TxError> {
        match code {
            0 => Ok(PayloadType::AddressAliasAdd),
            1 => Ok(PayloadType::AddressAliasRemove),
            2 => Ok(PayloadType::AuthorityAdd),
            3 => Ok(PayloadType::AuthorityRemove),
            4 => Ok(PayloadType::NetworkParamsSet),
            5 => Ok(PayloadType::TokenBurn),
            6 => Ok(PayloadType::TokenCreate),
            7 => Ok(PayloadType::TokenMint),
            8 => Ok(PayloadType::TokenUpdate),
            9 => Ok(PayloadType::Vote),
            other => Err(TxError::UnknownPayloadType(other)),
        }
    }
}

/// Vote cast by a BIP_VOTE transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteType {
    Disapproval,
    Approval,
}

impl VoteType {
    pub const fn code(&self) -> u64 {
        match self {
            VoteType::Disapproval => 0,
            VoteType::Approval => 1,
        }
    }

    pub fn from_code(code: u64) -> Result<Self, TxError> {
        match code {
            0 => Ok(VoteType::Disapproval),
            1 => Ok(VoteType::Approval),
            other => Err(TxError::UnknownVoteType(other)),
        }
    }
}

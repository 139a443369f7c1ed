//! BIP payload variants and their canonical encoding.
//!
//! A payload encodes as a single RLP list whose first element is the
//! payload-type code, followed by the variant's fields in normative order.
//! Strings are UTF-8 bytes, booleans the scalar 0/1, optional fields use
//! the optional-as-list wrapping.

use alloy_primitives::U256;
use alloy_rlp::{length_of_length, BufMut, Decodable, Encodable, Header};
use serde::{Deserialize, Serialize};

use crate::codes::{PayloadType, VoteType};
use crate::error::TxError;
use crate::primitives::Address;
use crate::rlp;

/// Parameters adjustable through a NETWORK_PARAMS_SET proposal. Every field
/// is optional on the wire; omitted parameters are left unchanged by the
/// network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkParams {
    pub block_reward: Option<U256>,
    pub block_reward_pool_address: Option<Address>,
    pub target_mining_time_ms: Option<u64>,
    pub asert_half_life_blocks: Option<u64>,
    pub min_difficulty: Option<U256>,
    pub min_tx_base_fee: Option<U256>,
    pub min_tx_byte_fee: Option<U256>,
}

/// Fields of a TOKEN_CREATE proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCreate {
    pub name: String,
    pub smallest_unit_name: String,
    pub number_of_decimals: u8,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
    /// Absent means unlimited supply.
    pub max_supply: Option<U256>,
    pub user_burnable: bool,
}

/// Fields of a TOKEN_UPDATE proposal; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUpdate {
    pub token_address: Address,
    pub name: Option<String>,
    pub smallest_unit_name: Option<String>,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
}

/// A BIP payload, tagged on the wire by its [`PayloadType`] code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    AddressAliasAdd { alias: String, address: Address },
    AddressAliasRemove { alias: String },
    AuthorityAdd { authority_address: Address },
    AuthorityRemove { authority_address: Address },
    NetworkParamsSet(NetworkParams),
    TokenBurn { token_address: Address, sender: Address, amount: U256 },
    TokenCreate(TokenCreate),
    TokenMint { token_address: Address, recipient: Address, amount: U256 },
    TokenUpdate(TokenUpdate),
    Vote { vote_type: VoteType },
}

impl Payload {
    pub fn payload_type(&self) -> PayloadType {
        match self {
            Payload::AddressAliasAdd { .. } => PayloadType::AddressAliasAdd,
            Payload::AddressAliasRemove { .. } => PayloadType::AddressAliasRemove,
            Payload::AuthorityAdd { .. } => PayloadType::AuthorityAdd,
            Payload::AuthorityRemove { .. } => PayloadType::AuthorityRemove,
            Payload::NetworkParamsSet(_) => PayloadType::NetworkParamsSet,
            Payload::TokenBurn { .. } => PayloadType::TokenBurn,
            Payload::TokenCreate(_) => PayloadType::TokenCreate,
            Payload::TokenMint { .. } => PayloadType::TokenMint,
            Payload::TokenUpdate(_) => PayloadType::TokenUpdate,
            Payload::Vote { .. } => PayloadType::Vote,
        }
    }

    fn fields_length(&self) -> usize {
        let code_len = self.payload_type().code().length();
        code_len
            + match self {
                Payload::AddressAliasAdd { alias, address } => {
                    alias.as_bytes().length() + address.length()
                }
                Payload::AddressAliasRemove { alias } => alias.as_bytes().length(),
                Payload::AuthorityAdd { authority_address }
                | Payload::AuthorityRemove { authority_address } => authority_address.length(),
                Payload::NetworkParamsSet(params) => {
                    rlp::opt_length(params.block_reward.as_ref())
                        + rlp::opt_length(params.block_reward_pool_address.as_ref())
                        + rlp::opt_length(params.target_mining_time_ms.as_ref())
                        + rlp::opt_length(params.asert_half_life_blocks.as_ref())
                        + rlp::opt_length(params.min_difficulty.as_ref())
                        + rlp::opt_length(params.min_tx_base_fee.as_ref())
                        + rlp::opt_length(params.min_tx_byte_fee.as_ref())
                }
                Payload::TokenBurn { token_address, sender, amount } => {
                    token_address.length() + sender.length() + amount.length()
                }
                Payload::TokenCreate(token) => {
                    token.name.as_bytes().length()
                        + token.smallest_unit_name.as_bytes().length()
                        + token.number_of_decimals.length()
                        + rlp::opt_length(token.website_url.as_ref().map(String::as_bytes))
                        + rlp::opt_length(token.logo_url.as_ref().map(String::as_bytes))
                        + rlp::opt_length(token.max_supply.as_ref())
                        + (token.user_burnable as u8).length()
                }
                Payload::TokenMint { token_address, recipient, amount } => {
                    token_address.length() + recipient.length() + amount.length()
                }
                Payload::TokenUpdate(update) => {
                    update.token_address.length()
                        + rlp::opt_length(update.name.as_ref().map(String::as_bytes))
                        + rlp::opt_length(update.smallest_unit_name.as_ref().map(String::as_bytes))
                        + rlp::opt_length(update.website_url.as_ref().map(String::as_bytes))
                        + rlp::opt_length(update.logo_url.as_ref().map(String::as_bytes))
                }
                Payload::Vote { vote_type } => vote_type.code().length(),
            }
    }

    fn encode_fields(&self, out: &mut dyn BufMut) {
        self.payload_type().code().encode(out);
        match self {
            Payload::AddressAliasAdd { alias, address } => {
                // Alias deliberately precedes the address.
                alias.as_bytes().encode(out);
                address.encode(out);
            }
            Payload::AddressAliasRemove { alias } => alias.as_bytes().encode(out),
            Payload::AuthorityAdd { authority_address }
            | Payload::AuthorityRemove { authority_address } => authority_address.encode(out),
            Payload::NetworkParamsSet(params) => {
                rlp::encode_opt(params.block_reward.as_ref(), out);
                rlp::encode_opt(params.block_reward_pool_address.as_ref(), out);
                rlp::encode_opt(params.target_mining_time_ms.as_ref(), out);
                rlp::encode_opt(params.asert_half_life_blocks.as_ref(), out);
                rlp::encode_opt(params.min_difficulty.as_ref(), out);
                rlp::encode_opt(params.min_tx_base_fee.as_ref(), out);
                rlp::encode_opt(params.min_tx_byte_fee.as_ref(), out);
            }
            Payload::TokenBurn { token_address, sender, amount } => {
                token_address.encode(out);
                sender.encode(out);
                amount.encode(out);
            }
            Payload::TokenCreate(token) => {
                token.name.as_bytes().encode(out);
                token.smallest_unit_name.as_bytes().encode(out);
                token.number_of_decimals.encode(out);
                rlp::encode_opt(token.website_url.as_ref().map(String::as_bytes), out);
                rlp::encode_opt(token.logo_url.as_ref().map(String::as_bytes), out);
                rlp::encode_opt(token.max_supply.as_ref(), out);
                (token.user_burnable as u8).encode(out);
            }
            Payload::TokenMint { token_address, recipient, amount } => {
                token_address.encode(out);
                recipient.encode(out);
                amount.encode(out);
            }
            Payload::TokenUpdate(update) => {
                update.token_address.encode(out);
                rlp::encode_opt(update.name.as_ref().map(String::as_bytes), out);
                rlp::encode_opt(update.smallest_unit_name.as_ref().map(String::as_bytes), out);
                rlp::encode_opt(update.website_url.as_ref().map(String::as_bytes), out);
                rlp::encode_opt(update.logo_url.as_ref().map(String::as_bytes), out);
            }
            Payload::Vote { vote_type } => vote_type.code().encode(out),
        }
    }

    /// Encodes the payload as its canonical RLP list.
    pub fn encode(&self) -> Vec<u8> {
        let payload_length = self.fields_length();
        let mut out = Vec::with_capacity(length_of_length(payload_length) + payload_length);
        Header { list: true, payload_length }.encode(&mut out);
        self.encode_fields(&mut out);
        out
    }

    /// Decodes a payload from the bytes of one complete RLP list.
    pub fn decode(mut buf: &[u8]) -> Result<Self, TxError> {
        let buf = &mut buf;
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(alloy_rlp::Error::UnexpectedString.into());
        }
        if header.payload_length != buf.len() {
            return Err(alloy_rlp::Error::UnexpectedLength.into());
        }

        let code = u64::decode(buf)?;
        let payload = match PayloadType::from_code(code)? {
            PayloadType::AddressAliasAdd => Payload::AddressAliasAdd {
                alias: rlp::decode_string(buf, "alias")?,
                address: rlp::decode_address(buf)?,
            },
            PayloadType::AddressAliasRemove => Payload::AddressAliasRemove {
                alias: rlp::decode_string(buf, "alias")?,
            },
            PayloadType::AuthorityAdd => Payload::AuthorityAdd {
                authority_address: rlp::decode_address(buf)?,
            },
            PayloadType::AuthorityRemove => Payload::AuthorityRemove {
                authority_address: rlp::decode_address(buf)?,
            },
            PayloadType::NetworkParamsSet => Payload::NetworkParamsSet(NetworkParams {
                block_reward: rlp::decode_opt_u256(buf)?,
                block_reward_pool_address: rlp::decode_opt_address(buf)?,
                target_mining_time_ms: rlp::decode_opt_u64(buf)?,
                asert_half_life_blocks: rlp::decode_opt_u64(buf)?,
                min_difficulty: rlp::decode_opt_u256(buf)?,
                min_tx_base_fee: rlp::decode_opt_u256(buf)?,
                min_tx_byte_fee: rlp::decode_opt_u256(buf)?,
            }),
            PayloadType::TokenBurn => Payload::TokenBurn {
                token_address: rlp::decode_address(buf)?,
                sender: rlp::decode_address(buf)?,
                amount: U256::decode(buf)?,
            },
            PayloadType::TokenCreate => Payload::TokenCreate(TokenCreate {
                name: rlp::decode_string(buf, "name")?,
                smallest_unit_name: rlp::decode_string(buf, "smallest_unit_name")?,
                number_of_decimals: u8::decode(buf)?,
                website_url: rlp::decode_opt_string(buf, "website_url")?,
                logo_url: rlp::decode_opt_string(buf, "logo_url")?,
                max_supply: rlp::decode_opt_u256(buf)?,
                user_burnable: rlp::decode_bool(buf)?,
            }),
            PayloadType::TokenMint => Payload::TokenMint {
                token_address: rlp::decode_address(buf)?,
                recipient: rlp::decode_address(buf)?,
                amount: U256::decode(buf)?,
            },
            PayloadType::TokenUpdate => Payload::TokenUpdate(TokenUpdate {
                token_address: rlp::decode_address(buf)?,
                name: rlp::decode_opt_string(buf, "name")?,
                smallest_unit_name: rlp::decode_opt_string(buf, "smallest_unit_name")?,
                website_url: rlp::decode_opt_string(buf, "website_url")?,
                logo_url: rlp::decode_opt_string(buf, "logo_url")?,
            }),
            PayloadType::Vote => Payload::Vote {
                vote_type: VoteType::from_code(u64::decode(buf)?)?,
            },
        };

        if !buf.is_empty() {
            return Err(alloy_rlp::Error::UnexpectedLength.into());
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(payload: Payload) -> Payload {
        Payload::decode(&payload.encode()).unwrap()
    }

    #[test]
    fn vote_approval_golden_bytes() {
        let payload = Payload::Vote { vote_type: VoteType::Approval };
        assert_eq!(payload.encode(), vec![0xc2, 0x09, 0x01]);
        assert_eq!(round_trip(payload.clone()), payload);
    }

    #[test]
    fn vote_disapproval_golden_bytes() {
        let payload = Payload::Vote { vote_type: VoteType::Disapproval };
        // Vote code 0 is the empty scalar.
        assert_eq!(payload.encode(), vec![0xc2, 0x09, 0x80]);
        assert_eq!(round_trip(payload.clone()), payload);
    }

    #[test]
    fn authority_add_golden_bytes() {
        let payload = Payload::AuthorityAdd { authority_address: Address::new([0xaa; 20]) };
        let encoded = payload.encode();
        assert_eq!(encoded[0], 0xc0 + 22);
        assert_eq!(encoded[1], 0x02);
        assert_eq!(encoded[2], 0x94);
        assert_eq!(&encoded[3..], &[0xaa; 20]);
        assert_eq!(round_trip(payload.clone()), payload);
    }

    #[test]
    fn alias_add_emits_alias_before_address() {
        let payload = Payload::AddressAliasAdd {
            alias: "goldie".into(),
            address: Address::new([0x11; 20]),
        };
        let encoded = payload.encode();
        // [code, "goldie", address]: the alias string comes first.
        assert_eq!(encoded[1], 0x80); // code 0
        assert_eq!(encoded[2], 0x80 + 6);
        assert_eq!(&encoded[3..9], b"goldie");
        assert_eq!(encoded[9], 0x94);
        assert_eq!(round_trip(payload.clone()), payload);
    }

    #[test]
    fn alias_remove_round_trip() {
        let payload = Payload::AddressAliasRemove { alias: "goldie".into() };
        assert_eq!(round_trip(payload.clone()), payload);
    }

    #[test]
    fn token_mint_round_trip() {
        let payload = Payload::TokenMint {
            token_address: Address::new([0x33; 20]),
            recipient: Address::new([0x44; 20]),
            amount: U256::from(1_000_000u64) * U256::from(100_000_000u64),
        };
        assert_eq!(round_trip(payload.clone()), payload);
    }

    #[test]
    fn token_burn_round_trip() {
        let payload = Payload::TokenBurn {
            token_address: Address::new([0x55; 20]),
            sender: Address::new([0x66; 20]),
            amount: U256::from(42u64),
        };
        assert_eq!(round_trip(payload.clone()), payload);
    }

    #[test]
    fn token_create_round_trip() {
        let payload = Payload::TokenCreate(TokenCreate {
            name: "TestToken".into(),
            smallest_unit_name: "TT".into(),
            number_of_decimals: 9,
            website_url: Some("https://token.example".into()),
            logo_url: None,
            max_supply: Some(U256::from(10u64).pow(U256::from(17u64))),
            user_burnable: true,
        });
        assert_eq!(round_trip(payload.clone()), payload);
    }

    #[test]
    fn token_update_absent_fields_round_trip() {
        let payload = Payload::TokenUpdate(TokenUpdate {
            token_address: Address::new([0x77; 20]),
            name: Some("Renamed".into()),
            smallest_unit_name: None,
            website_url: None,
            logo_url: Some("https://logo.example/t.png".into()),
        });
        assert_eq!(round_trip(payload.clone()), payload);
    }

    #[test]
    fn network_params_all_absent_golden_bytes() {
        let payload = Payload::NetworkParamsSet(NetworkParams::default());
        // [4, [], [], [], [], [], [], []]
        assert_eq!(
            payload.encode(),
            vec![0xc8, 0x04, 0xc0, 0xc0, 0xc0, 0xc0, 0xc0, 0xc0, 0xc0]
        );
        assert_eq!(round_trip(payload.clone()), payload);
    }

    #[test]
    fn network_params_sparse_round_trip() {
        let payload = Payload::NetworkParamsSet(NetworkParams {
            block_reward: Some(U256::from(5_000_000_000u64)),
            min_tx_base_fee: Some(U256::from(10_000u64)),
            min_tx_byte_fee: Some(U256::from(1_000u64)),
            ..Default::default()
        });
        let decoded = round_trip(payload.clone());
        assert_eq!(decoded, payload);

        let Payload::NetworkParamsSet(params) = decoded else { unreachable!() };
        assert_eq!(params.block_reward_pool_address, None);
        assert_eq!(params.target_mining_time_ms, None);
        assert_eq!(params.asert_half_life_blocks, None);
        assert_eq!(params.min_difficulty, None);
    }

    #[test]
    fn unknown_payload_code_rejected() {
        // [10] — a reserved validator code with no handler.
        let bytes = [0xc1, 0x0a];
        assert!(matches!(
            Payload::decode(&bytes),
            Err(TxError::UnknownPayloadType(10))
        ));
    }

    #[test]
    fn trailing_garbage_rejected() {
        let mut bytes = Payload::Vote { vote_type: VoteType::Approval }.encode();
        bytes.push(0x00);
        assert!(Payload::decode(&bytes).is_err());
    }

    #[test]
    fn extra_field_inside_list_rejected() {
        // [9, 1, 1] — vote payload with a stray element.
        let bytes = [0xc3, 0x09, 0x01, 0x01];
        assert!(Payload::decode(&bytes).is_err());
    }

    #[test]
    fn string_where_list_expected_rejected() {
        let bytes = [0x82, 0x09, 0x01];
        assert!(matches!(
            Payload::decode(&bytes),
            Err(TxError::Rlp(alloy_rlp::Error::UnexpectedString))
        ));
    }
}

//! GoldenEra wallet-side key management.
//!
//! This crate provides:
//! - BIP-39 mnemonic generation, validation, and seed derivation
//! - BIP-32/44 hierarchical derivation along m/44'/60'/0'/0/{index}
//! - [`Account`]: a derived key bound to its GoldenEra address
//!
//! Transaction construction and signing live in `goldenera-tx`; an account's
//! private key plugs straight into its builder.

pub mod account;
pub mod error;
pub mod hd_derivation;
pub mod mnemonic;

pub use account::Account;
pub use error::WalletError;

//! Decimal string ⇄ wei conversion.
//!
//! Pure caller convenience; the wire format carries raw wei scalars and is
//! decimals-agnostic.

use alloy_primitives::U256;

use crate::error::TxError;

/// Wei per native token. The native token has 8 decimals; this constant is
/// the single source of truth.
pub const WEI_PER_TOKEN: u64 = 100_000_000;

/// Decimals of the native token.
pub const NATIVE_DECIMALS: u8 = 8;

/// Largest supported token precision.
pub const MAX_DECIMALS: u8 = 18;

/// Parses a decimal native-token amount ("1.5") into wei.
pub fn tokens_to_wei(amount: &str) -> Result<U256, TxError> {
    parse_amount(amount, NATIVE_DECIMALS)
}

/// Formats a wei amount of the native token as a decimal string.
pub fn wei_to_tokens(wei: U256) -> String {
    format_amount(wei, NATIVE_DECIMALS)
}

/// Parses a decimal amount with the given number of token decimals.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, TxError> {
    if decimals > MAX_DECIMALS {
        return Err(TxError::InvalidAmount(format!(
            "decimals must be at most {MAX_DECIMALS}, got {decimals}"
        )));
    }

    let amount = amount.trim();
    let (int_part, frac_part) = match amount.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (amount, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(TxError::InvalidAmount("empty amount".into()));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(TxError::InvalidAmount(format!("not a decimal number: {amount:?}")));
    }
    if frac_part.len() > decimals as usize {
        return Err(TxError::InvalidAmount(format!(
            "at most {decimals} decimal places supported, got {}",
            frac_part.len()
        )));
    }

    let scale = U256::from(10u64).pow(U256::from(decimals));
    let int_value = if int_part.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(int_part, 10)
            .map_err(|e| TxError::InvalidAmount(e.to_string()))?
    };
    let frac_value = if frac_part.is_empty() {
        U256::ZERO
    } else {
        // Right-pad to the full precision: "5" with 8 decimals is 50_000_000.
        let padded = format!("{frac_part:0<width$}", width = decimals as usize);
        U256::from_str_radix(&padded, 10).map_err(|e| TxError::InvalidAmount(e.to_string()))?
    };

    int_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(|| TxError::InvalidAmount(format!("amount overflows 256 bits: {amount}")))
}

/// Formats a wei amount as a decimal string, trimming trailing zeros.
pub fn format_amount(wei: U256, decimals: u8) -> String {
    if decimals == 0 {
        return wei.to_string();
    }
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let int_part = wei / scale;
    let frac_part = wei % scale;
    if frac_part.is_zero() {
        return int_part.to_string();
    }
    let frac_digits = frac_part.to_string();
    let frac_str = format!("{frac_digits:0>width$}", width = decimals as usize);
    format!("{int_part}.{}", frac_str.trim_end_matches('0'))
}

// citrate/core/transactions/src/quantity.rs

//! Hex quantity and data strings as used in JSON-RPC payloads.

use ethereum_types::{H160, H256, U256};

use crate::error::{Result, TransactionError};

fn require_hex_digits(field: &str, value: &str, digits: &str) -> Result<()> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TransactionError::malformed(
            field,
            format!("`{}` contains non-hex characters", value),
        ));
    }
    Ok(())
}

/// Decode a `0x`-prefixed hex quantity. Leading zeros are rejected, except
/// for `0x0` itself.
pub fn decode_quantity(field: &str, value: &str) -> Result<U256> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| TransactionError::malformed(field, format!("`{}` is not 0x-prefixed", value)))?;

    if digits.is_empty() {
        return Err(TransactionError::malformed(field, "empty quantity"));
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(TransactionError::malformed(
            field,
            format!("`{}` has leading zeros", value),
        ));
    }
    if digits.len() > 64 {
        return Err(TransactionError::malformed(field, "quantity exceeds 256 bits"));
    }
    require_hex_digits(field, value, digits)?;

    U256::from_str_radix(digits, 16)
        .map_err(|_| TransactionError::malformed(field, format!("`{}` is not a hex quantity", value)))
}

pub fn decode_quantity_u64(field: &str, value: &str) -> Result<u64> {
    let quantity = decode_quantity(field, value)?;
    if quantity > U256::from(u64::MAX) {
        return Err(TransactionError::malformed(field, "quantity exceeds 64 bits"));
    }
    Ok(quantity.low_u64())
}

/// Decode a 256-bit scalar such as a signature component. Unlike
/// [`decode_quantity`], zero padding is accepted.
pub fn decode_scalar(field: &str, value: &str) -> Result<U256> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| TransactionError::malformed(field, format!("`{}` is not 0x-prefixed", value)))?;
    if digits.is_empty() || digits.len() > 64 {
        return Err(TransactionError::malformed(field, "expected 1 to 64 hex digits"));
    }
    require_hex_digits(field, value, digits)?;
    U256::from_str_radix(digits, 16)
        .map_err(|_| TransactionError::malformed(field, format!("`{}` is not hex", value)))
}

pub fn encode_quantity(value: U256) -> String {
    format!("0x{:x}", value)
}

/// Decode `0x`-prefixed hex data of any length.
pub fn decode_data(field: &str, value: &str) -> Result<Vec<u8>> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| TransactionError::malformed(field, format!("`{}` is not 0x-prefixed", value)))?;
    hex::decode(digits).map_err(|e| TransactionError::malformed(field, e.to_string()))
}

pub fn encode_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn decode_address(field: &str, value: &str) -> Result<H160> {
    let bytes = decode_data(field, value)?;
    if bytes.len() != 20 {
        return Err(TransactionError::malformed(
            field,
            format!("address must be 20 bytes, got {}", bytes.len()),
        ));
    }
    Ok(H160::from_slice(&bytes))
}

pub fn decode_hash(field: &str, value: &str) -> Result<H256> {
    let bytes = decode_data(field, value)?;
    if bytes.len() != 32 {
        return Err(TransactionError::malformed(
            field,
            format!("expected 32 bytes, got {}", bytes.len()),
        ));
    }
    Ok(H256::from_slice(&bytes))
}

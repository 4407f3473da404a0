// citrate/core/transactions/src/rpc.rs

use serde::{Deserialize, Serialize};

use crate::authorization::AuthorizationTuple;
use crate::error::{Result, TransactionError};
use crate::quantity::{
    decode_address, decode_quantity_u64, decode_scalar, encode_data, encode_quantity,
};

/// Authorization as it appears in JSON-RPC payloads: every field a hex string.
///
/// Built once and never mutated; whether a chain id is present is fixed at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chain_id: Option<String>,
    nonce: String,
    address: String,
    y_parity: String,
    r: String,
    s: String,
}

impl AuthorizationObject {
    pub fn new(
        chain_id: Option<String>,
        nonce: String,
        address: String,
        y_parity: String,
        r: String,
        s: String,
    ) -> Self {
        Self {
            chain_id,
            nonce,
            address,
            y_parity,
            r,
            s,
        }
    }

    pub fn from_tuple(tuple: &AuthorizationTuple) -> Self {
        Self {
            chain_id: Some(encode_quantity(tuple.chain_id().into())),
            nonce: encode_quantity(tuple.nonce().into()),
            address: encode_data(tuple.address().as_bytes()),
            y_parity: encode_quantity(tuple.y_parity().into()),
            r: encode_quantity(tuple.r()),
            s: encode_quantity(tuple.s()),
        }
    }

    pub fn has_chain_id(&self) -> bool {
        self.chain_id.is_some()
    }

    /// Decoded chain id. An absent field is an error, never zero and never
    /// derived from `yParity`.
    pub fn chain_id(&self) -> Result<u64> {
        match &self.chain_id {
            Some(chain_id) => decode_quantity_u64("chainId", chain_id),
            None => Err(TransactionError::malformed(
                "chainId",
                "authorization carries no chain id",
            )),
        }
    }

    pub fn nonce(&self) -> Result<u64> {
        decode_quantity_u64("nonce", &self.nonce)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn y_parity(&self) -> &str {
        &self.y_parity
    }

    pub fn r(&self) -> &str {
        &self.r
    }

    pub fn s(&self) -> &str {
        &self.s
    }

    pub fn to_tuple(&self) -> Result<AuthorizationTuple> {
        let y_parity = decode_quantity_u64("yParity", &self.y_parity)?;
        if y_parity > 1 {
            return Err(TransactionError::InvalidSignatureEncoding(format!(
                "authorization yParity must be 0 or 1, got {}",
                y_parity
            )));
        }

        AuthorizationTuple::new(
            self.chain_id()?,
            decode_address("address", &self.address)?,
            self.nonce()?,
            y_parity as u8,
            decode_scalar("r", &self.r)?,
            decode_scalar("s", &self.s)?,
        )
    }
}

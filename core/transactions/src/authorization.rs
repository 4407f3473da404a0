// citrate/core/transactions/src/authorization.rs

//! EIP-7702 authorizations: "this account delegates its code to `address`".
//!
//! Each authorization carries its own signature over
//! `MAGIC || rlp([chain_id, address, nonce])`, independent of the signature of
//! the transaction that carries it.

use ethereum_types::{H256, U256};
use tracing::debug;

use crate::crypto::{keccak256, recover_address, Signer};
use crate::envelope::Address;
use crate::error::{Result, TransactionError};
use crate::rlp_item::RlpItem;

/// Domain separator prepended to the authorization signing preimage.
pub const AUTHORIZATION_MAGIC: u8 = 0x05;

/// Unsigned authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Authorization {
    pub chain_id: u64,
    pub address: Address,
    pub nonce: u64,
}

impl Authorization {
    pub fn new(chain_id: u64, address: Address, nonce: u64) -> Self {
        Self {
            chain_id,
            address,
            nonce,
        }
    }

    fn fields(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::from(self.chain_id),
            RlpItem::bytes(self.address.as_bytes()),
            RlpItem::from(self.nonce),
        ]
    }

    pub fn signing_preimage(&self) -> Vec<u8> {
        let mut preimage = vec![AUTHORIZATION_MAGIC];
        preimage.extend_from_slice(&RlpItem::list(self.fields()).encode());
        preimage
    }

    pub fn signing_hash(&self) -> H256 {
        keccak256(&self.signing_preimage())
    }

    pub fn sign<S: Signer + ?Sized>(self, signer: &S) -> Result<AuthorizationTuple> {
        let signature = signer.sign(&self.signing_preimage())?;
        debug!(
            "Signed authorization chain_id={} address=0x{} nonce={}",
            self.chain_id,
            hex::encode(self.address.as_bytes()),
            self.nonce
        );
        self.into_signed(signature.recovery_id, signature.r, signature.s)
    }

    pub fn into_signed(self, y_parity: u8, r: U256, s: U256) -> Result<AuthorizationTuple> {
        AuthorizationTuple::new(self.chain_id, self.address, self.nonce, y_parity, r, s)
    }
}

/// Signed authorization as carried in a delegation transaction.
///
/// Equality and hashing cover all six fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthorizationTuple {
    chain_id: u64,
    address: Address,
    nonce: u64,
    y_parity: u8,
    r: U256,
    s: U256,
}

impl AuthorizationTuple {
    pub fn new(
        chain_id: u64,
        address: Address,
        nonce: u64,
        y_parity: u8,
        r: U256,
        s: U256,
    ) -> Result<Self> {
        if y_parity > 1 {
            return Err(TransactionError::InvalidSignatureEncoding(format!(
                "authorization y_parity must be 0 or 1, got {}",
                y_parity
            )));
        }
        Ok(Self {
            chain_id,
            address,
            nonce,
            y_parity,
            r,
            s,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn y_parity(&self) -> u8 {
        self.y_parity
    }

    pub fn r(&self) -> U256 {
        self.r
    }

    pub fn s(&self) -> U256 {
        self.s
    }

    pub fn authorization(&self) -> Authorization {
        Authorization::new(self.chain_id, self.address, self.nonce)
    }

    /// `[chainId, address, nonce, yParity, r, s]`
    pub fn to_rlp_item(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::from(self.chain_id),
            RlpItem::bytes(self.address.as_bytes()),
            RlpItem::from(self.nonce),
            RlpItem::from(self.y_parity),
            RlpItem::uint(self.r),
            RlpItem::uint(self.s),
        ])
    }

    /// Account that signed this authorization.
    pub fn recover_authority(&self) -> Result<Address> {
        recover_address(
            &self.authorization().signing_hash(),
            self.y_parity,
            self.r,
            self.s,
        )
    }
}

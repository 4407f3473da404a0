// citrate/core/transactions/src/envelope/mod.rs

//! Transaction envelopes and the field sequences they serialize to.
//!
//! An envelope knows the order of its own fields and nothing else: the type
//! byte, the signature placement and the final byte layout are applied by the
//! encoder through [`TransactionPayload`].

pub mod access_list;
pub mod blob;
pub mod common;
pub mod delegation;
pub mod fee_market;
pub mod legacy;

pub use access_list::AccessListTransaction;
pub use blob::{kzg_to_versioned_hash, BlobSidecar, BlobTransaction};
pub use common::{AccessListEntry, Address, FeeMarketFees, TxCommon};
pub use delegation::DelegationTransaction;
pub use fee_market::FeeMarketTransaction;
pub use legacy::LegacyTransaction;

use ethereum_types::U256;
use std::fmt;

use crate::authorization::AuthorizationTuple;
use crate::error::{Result, TransactionError};
use crate::rlp_item::RlpItem;
use crate::signature::SignatureValue;

/// EIP-2718 type discriminators.
pub mod tx_type {
    pub const ACCESS_LIST: u8 = 0x01;
    pub const FEE_MARKET: u8 = 0x02;
    pub const BLOB: u8 = 0x03;
    pub const DELEGATION: u8 = 0x04;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Legacy,
    AccessList,
    FeeMarket,
    Blob,
    Delegation,
}

impl TransactionType {
    /// Leading discriminator byte; `None` for Legacy, which has no prefix.
    pub fn type_byte(&self) -> Option<u8> {
        match self {
            TransactionType::Legacy => None,
            TransactionType::AccessList => Some(tx_type::ACCESS_LIST),
            TransactionType::FeeMarket => Some(tx_type::FEE_MARKET),
            TransactionType::Blob => Some(tx_type::BLOB),
            TransactionType::Delegation => Some(tx_type::DELEGATION),
        }
    }

    pub fn is_typed(&self) -> bool {
        self.type_byte().is_some()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionType::Legacy => "legacy",
            TransactionType::AccessList => "access-list",
            TransactionType::FeeMarket => "fee-market",
            TransactionType::Blob => "blob",
            TransactionType::Delegation => "delegation",
        };
        write!(f, "{}", name)
    }
}

impl TryFrom<u8> for TransactionType {
    type Error = TransactionError;

    fn try_from(byte: u8) -> Result<Self> {
        match byte {
            tx_type::ACCESS_LIST => Ok(TransactionType::AccessList),
            tx_type::FEE_MARKET => Ok(TransactionType::FeeMarket),
            tx_type::BLOB => Ok(TransactionType::Blob),
            tx_type::DELEGATION => Ok(TransactionType::Delegation),
            other => Err(TransactionError::unsupported(format!(
                "unknown transaction type 0x{:02x}",
                other
            ))),
        }
    }
}

/// What the encoder needs from anything it can serialize and sign.
pub trait TransactionPayload {
    fn transaction_type(&self) -> TransactionType;

    /// Chain id carried in the body; `None` for Legacy.
    fn chain_id(&self) -> Option<u64>;

    /// Fields covered by the signature, in wire order.
    fn unsigned_fields(&self) -> Result<Vec<RlpItem>>;

    /// Unsigned fields followed by the signature fields.
    fn signed_fields(&self, signature: &SignatureValue) -> Result<Vec<RlpItem>>;

    /// Item written after the type byte in the final wire form.
    fn signed_payload(&self, signature: &SignatureValue) -> Result<RlpItem> {
        Ok(RlpItem::list(self.signed_fields(signature)?))
    }
}

/// One of the five supported transaction formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    Legacy(LegacyTransaction),
    AccessList(AccessListTransaction),
    FeeMarket(FeeMarketTransaction),
    Blob(BlobTransaction),
    Delegation(DelegationTransaction),
}

impl Envelope {
    pub fn legacy(common: TxCommon, gas_price: U256) -> Self {
        Envelope::Legacy(LegacyTransaction::new(common, gas_price))
    }

    pub fn access_list(
        chain_id: u64,
        common: TxCommon,
        gas_price: U256,
        access_list: Vec<AccessListEntry>,
    ) -> Self {
        Envelope::AccessList(AccessListTransaction::new(
            chain_id,
            common,
            gas_price,
            access_list,
        ))
    }

    pub fn fee_market(
        chain_id: u64,
        common: TxCommon,
        fees: FeeMarketFees,
        access_list: Vec<AccessListEntry>,
    ) -> Self {
        Envelope::FeeMarket(FeeMarketTransaction::new(chain_id, common, fees, access_list))
    }

    pub fn blob(tx: BlobTransaction) -> Result<Self> {
        tx.validate()?;
        Ok(Envelope::Blob(tx))
    }

    pub fn delegation(
        chain_id: u64,
        common: TxCommon,
        fees: FeeMarketFees,
        access_list: Vec<AccessListEntry>,
        authorization_list: Vec<AuthorizationTuple>,
    ) -> Result<Self> {
        let tx = DelegationTransaction::new(chain_id, common, fees, access_list, authorization_list);
        tx.validate()?;
        Ok(Envelope::Delegation(tx))
    }

    pub fn common(&self) -> &TxCommon {
        match self {
            Envelope::Legacy(tx) => &tx.common,
            Envelope::AccessList(tx) => &tx.common,
            Envelope::FeeMarket(tx) => &tx.common,
            Envelope::Blob(tx) => &tx.common,
            Envelope::Delegation(tx) => &tx.common,
        }
    }

    /// Re-check the invariants the factories enforce; fields are public and
    /// may have changed since construction.
    pub fn validate(&self) -> Result<()> {
        match self {
            Envelope::Blob(tx) => tx.validate(),
            Envelope::Delegation(tx) => tx.validate(),
            _ => Ok(()),
        }
    }

    /// `[v, r, s]` for Legacy, `[yParity, r, s]` for every typed envelope.
    pub(crate) fn signature_fields(&self, signature: &SignatureValue) -> Result<Vec<RlpItem>> {
        match self.chain_id() {
            None => Ok(signature.legacy_fields()),
            Some(chain_id) => signature.parity_fields(chain_id),
        }
    }
}

impl TransactionPayload for Envelope {
    fn transaction_type(&self) -> TransactionType {
        match self {
            Envelope::Legacy(_) => TransactionType::Legacy,
            Envelope::AccessList(_) => TransactionType::AccessList,
            Envelope::FeeMarket(_) => TransactionType::FeeMarket,
            Envelope::Blob(_) => TransactionType::Blob,
            Envelope::Delegation(_) => TransactionType::Delegation,
        }
    }

    fn chain_id(&self) -> Option<u64> {
        match self {
            Envelope::Legacy(_) => None,
            Envelope::AccessList(tx) => Some(tx.chain_id),
            Envelope::FeeMarket(tx) => Some(tx.chain_id),
            Envelope::Blob(tx) => Some(tx.chain_id),
            Envelope::Delegation(tx) => Some(tx.chain_id),
        }
    }

    fn unsigned_fields(&self) -> Result<Vec<RlpItem>> {
        self.validate()?;
        Ok(match self {
            Envelope::Legacy(tx) => tx.unsigned_fields(),
            Envelope::AccessList(tx) => tx.unsigned_fields(),
            Envelope::FeeMarket(tx) => tx.unsigned_fields(),
            Envelope::Blob(tx) => tx.unsigned_fields(),
            Envelope::Delegation(tx) => tx.unsigned_fields(),
        })
    }

    fn signed_fields(&self, signature: &SignatureValue) -> Result<Vec<RlpItem>> {
        let mut fields = self.unsigned_fields()?;
        fields.extend(self.signature_fields(signature)?);
        Ok(fields)
    }

    fn signed_payload(&self, signature: &SignatureValue) -> Result<RlpItem> {
        let fields = self.signed_fields(signature)?;
        Ok(match self {
            Envelope::Blob(tx) => tx.wrap_signed(fields),
            _ => RlpItem::list(fields),
        })
    }
}

impl From<LegacyTransaction> for Envelope {
    fn from(tx: LegacyTransaction) -> Self {
        Envelope::Legacy(tx)
    }
}

impl From<AccessListTransaction> for Envelope {
    fn from(tx: AccessListTransaction) -> Self {
        Envelope::AccessList(tx)
    }
}

impl From<FeeMarketTransaction> for Envelope {
    fn from(tx: FeeMarketTransaction) -> Self {
        Envelope::FeeMarket(tx)
    }
}

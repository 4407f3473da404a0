// citrate/core/transactions/src/envelope/common.rs

use ethereum_types::{H160, H256, U256};
use serde::{Deserialize, Serialize};

use crate::rlp_item::RlpItem;

pub type Address = H160;

/// Fields every envelope carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxCommon {
    pub nonce: u64,
    pub gas_limit: u64,
    /// `None` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
}

impl TxCommon {
    pub fn new(nonce: u64, gas_limit: u64, to: Option<Address>, value: U256, data: Vec<u8>) -> Self {
        Self {
            nonce,
            gas_limit,
            to,
            value,
            data,
        }
    }

    pub(crate) fn to_item(&self) -> RlpItem {
        RlpItem::address(self.to.as_ref())
    }

    pub(crate) fn value_item(&self) -> RlpItem {
        RlpItem::uint(self.value)
    }

    pub(crate) fn data_item(&self) -> RlpItem {
        RlpItem::bytes(self.data.clone())
    }
}

/// EIP-1559 fee pair shared by the fee-market family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeMarketFees {
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
}

impl FeeMarketFees {
    pub fn new(max_priority_fee_per_gas: U256, max_fee_per_gas: U256) -> Self {
        Self {
            max_priority_fee_per_gas,
            max_fee_per_gas,
        }
    }
}

/// Access list entry for EIP-2930 and later envelopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessListEntry {
    pub address: Address,
    pub storage_keys: Vec<H256>,
}

impl AccessListEntry {
    pub fn new(address: Address, storage_keys: Vec<H256>) -> Self {
        Self {
            address,
            storage_keys,
        }
    }

    fn to_item(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::bytes(self.address.as_bytes()),
            RlpItem::hashes(&self.storage_keys),
        ])
    }
}

/// `[[address, [key, ...]], ...]` in the order given.
pub(crate) fn access_list_item(access_list: &[AccessListEntry]) -> RlpItem {
    RlpItem::list(access_list.iter().map(AccessListEntry::to_item).collect())
}

/// Leading `[nonce, maxPriorityFee, maxFee, gasLimit, to, value, data, accessList]`
/// run shared by every fee-market envelope, after the chain id.
pub(crate) fn fee_market_fields(
    chain_id: u64,
    common: &TxCommon,
    fees: &FeeMarketFees,
    access_list: &[AccessListEntry],
) -> Vec<RlpItem> {
    vec![
        RlpItem::from(chain_id),
        RlpItem::from(common.nonce),
        RlpItem::uint(fees.max_priority_fee_per_gas),
        RlpItem::uint(fees.max_fee_per_gas),
        RlpItem::from(common.gas_limit),
        common.to_item(),
        common.value_item(),
        common.data_item(),
        access_list_item(access_list),
    ]
}

// citrate/core/transactions/src/envelope/access_list.rs

use ethereum_types::U256;

use super::common::{access_list_item, AccessListEntry, TxCommon};
use crate::rlp_item::RlpItem;

/// EIP-2930 transaction (type `0x01`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessListTransaction {
    pub chain_id: u64,
    pub common: TxCommon,
    pub gas_price: U256,
    pub access_list: Vec<AccessListEntry>,
}

impl AccessListTransaction {
    pub fn new(
        chain_id: u64,
        common: TxCommon,
        gas_price: U256,
        access_list: Vec<AccessListEntry>,
    ) -> Self {
        Self {
            chain_id,
            common,
            gas_price,
            access_list,
        }
    }

    /// `[chainId, nonce, gasPrice, gasLimit, to, value, data, accessList]`
    pub fn unsigned_fields(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::from(self.chain_id),
            RlpItem::from(self.common.nonce),
            RlpItem::uint(self.gas_price),
            RlpItem::from(self.common.gas_limit),
            self.common.to_item(),
            self.common.value_item(),
            self.common.data_item(),
            access_list_item(&self.access_list),
        ]
    }
}

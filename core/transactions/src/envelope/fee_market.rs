// citrate/core/transactions/src/envelope/fee_market.rs

use super::common::{fee_market_fields, AccessListEntry, FeeMarketFees, TxCommon};
use crate::rlp_item::RlpItem;

/// EIP-1559 transaction (type `0x02`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeMarketTransaction {
    pub chain_id: u64,
    pub common: TxCommon,
    pub fees: FeeMarketFees,
    pub access_list: Vec<AccessListEntry>,
}

impl FeeMarketTransaction {
    pub fn new(
        chain_id: u64,
        common: TxCommon,
        fees: FeeMarketFees,
        access_list: Vec<AccessListEntry>,
    ) -> Self {
        Self {
            chain_id,
            common,
            fees,
            access_list,
        }
    }

    /// `[chainId, nonce, maxPriorityFeePerGas, maxFeePerGas, gasLimit, to, value, data, accessList]`
    pub fn unsigned_fields(&self) -> Vec<RlpItem> {
        fee_market_fields(self.chain_id, &self.common, &self.fees, &self.access_list)
    }
}

// citrate/core/transactions/src/envelope/legacy.rs

use ethereum_types::U256;

use super::common::TxCommon;
use crate::rlp_item::RlpItem;

/// Pre-EIP-2718 transaction. Replay protection, if any, lives in `v`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyTransaction {
    pub common: TxCommon,
    pub gas_price: U256,
}

impl LegacyTransaction {
    pub fn new(common: TxCommon, gas_price: U256) -> Self {
        Self { common, gas_price }
    }

    /// `[nonce, gasPrice, gasLimit, to, value, data]`
    pub fn unsigned_fields(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::from(self.common.nonce),
            RlpItem::uint(self.gas_price),
            RlpItem::from(self.common.gas_limit),
            self.common.to_item(),
            self.common.value_item(),
            self.common.data_item(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_creation_keeps_empty_to() {
        let tx = LegacyTransaction::new(
            TxCommon::new(0, 21_000, None, U256::zero(), vec![]),
            U256::from(1_000_000_000u64),
        );
        let fields = tx.unsigned_fields();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[3], RlpItem::empty());
        assert_eq!(fields[5], RlpItem::empty());
    }
}

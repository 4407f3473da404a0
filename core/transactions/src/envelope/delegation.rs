// citrate/core/transactions/src/envelope/delegation.rs

//! EIP-7702 set-code transactions (type `0x04`).

use super::common::{fee_market_fields, AccessListEntry, FeeMarketFees, TxCommon};
use crate::authorization::AuthorizationTuple;
use crate::error::{Result, TransactionError};
use crate::rlp_item::RlpItem;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelegationTransaction {
    pub chain_id: u64,
    pub common: TxCommon,
    pub fees: FeeMarketFees,
    pub access_list: Vec<AccessListEntry>,
    pub authorization_list: Vec<AuthorizationTuple>,
}

impl DelegationTransaction {
    pub fn new(
        chain_id: u64,
        common: TxCommon,
        fees: FeeMarketFees,
        access_list: Vec<AccessListEntry>,
        authorization_list: Vec<AuthorizationTuple>,
    ) -> Self {
        Self {
            chain_id,
            common,
            fees,
            access_list,
            authorization_list,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.common.to.is_none() {
            return Err(TransactionError::malformed(
                "to",
                "delegation transactions cannot create contracts",
            ));
        }
        if self.authorization_list.is_empty() {
            return Err(TransactionError::malformed(
                "authorizationList",
                "at least one authorization is required",
            ));
        }
        Ok(())
    }

    /// `[chainId, nonce, maxPriorityFeePerGas, maxFeePerGas, gasLimit, to, value, data,
    /// accessList, authorizationList]`
    pub fn unsigned_fields(&self) -> Vec<RlpItem> {
        let mut fields =
            fee_market_fields(self.chain_id, &self.common, &self.fees, &self.access_list);
        fields.push(RlpItem::list(
            self.authorization_list
                .iter()
                .map(AuthorizationTuple::to_rlp_item)
                .collect(),
        ));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethereum_types::{H160, U256};

    fn authorization() -> AuthorizationTuple {
        AuthorizationTuple::new(1, H160::repeat_byte(0xde), 0, 1, U256::from(5u64), U256::from(6u64))
            .unwrap()
    }

    fn delegation(authorizations: Vec<AuthorizationTuple>) -> DelegationTransaction {
        DelegationTransaction::new(
            1,
            TxCommon::new(2, 50_000, Some(H160::repeat_byte(0x44)), U256::zero(), vec![]),
            FeeMarketFees::new(U256::from(1u64), U256::from(2u64)),
            vec![],
            authorizations,
        )
    }

    #[test]
    fn test_authorization_list_is_last() {
        let fields = delegation(vec![authorization()]).unsigned_fields();
        assert_eq!(fields.len(), 10);

        let RlpItem::List(entries) = &fields[9] else {
            panic!("authorization list must be a list");
        };
        assert_eq!(entries.len(), 1);
        let RlpItem::List(tuple) = &entries[0] else {
            panic!("authorization must be a list");
        };
        assert_eq!(tuple.len(), 6);
    }

    #[test]
    fn test_validation() {
        assert!(delegation(vec![authorization()]).validate().is_ok());
        assert!(delegation(vec![]).validate().is_err());

        let mut creation = delegation(vec![authorization()]);
        creation.common.to = None;
        assert!(matches!(
            creation.validate(),
            Err(TransactionError::MalformedField { .. })
        ));
    }
}

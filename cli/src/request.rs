// citrate/cli/src/request.rs
//
// JSON transaction requests, as accepted by `encode` and `sign`

use anyhow::{bail, Context, Result};
use citrate_transactions::quantity::{
    decode_address, decode_data, decode_hash, decode_quantity, decode_quantity_u64,
};
use citrate_transactions::{
    AccessListEntry, AuthorizationObject, BlobTransaction, EnclaveKey, Envelope, FeeMarketFees,
    PrivacyRecipients, PrivateTransaction, Restriction, TransactionPayload, TransactionType,
    TxCommon, U256,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(rename = "type")]
    pub tx_type: Option<String>,
    pub chain_id: Option<String>,
    pub nonce: Option<String>,
    pub gas: String,
    pub gas_price: Option<String>,
    pub max_fee_per_gas: Option<String>,
    pub max_priority_fee_per_gas: Option<String>,
    pub max_fee_per_blob_gas: Option<String>,
    pub blob_versioned_hashes: Option<Vec<String>>,
    pub to: Option<String>,
    pub value: Option<String>,
    pub data: Option<String>,
    pub access_list: Option<Vec<AccessListEntry>>,
    pub authorization_list: Option<Vec<AuthorizationObject>>,
    pub private_from: Option<String>,
    pub private_for: Option<Vec<String>>,
    pub privacy_group_id: Option<String>,
    pub restriction: Option<String>,
}

impl TransactionRequest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read transaction from {:?}", path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse transaction from {:?}", path))
    }

    /// Explicit `type`, otherwise the newest envelope whose fields are present.
    pub fn transaction_type(&self) -> Result<TransactionType> {
        if let Some(tx_type) = &self.tx_type {
            let byte = decode_quantity_u64("type", tx_type)?;
            if byte == 0 {
                return Ok(TransactionType::Legacy);
            }
            let byte = u8::try_from(byte).context("transaction type exceeds one byte")?;
            return Ok(TransactionType::try_from(byte)?);
        }

        Ok(if self.authorization_list.is_some() {
            TransactionType::Delegation
        } else if self.blob_versioned_hashes.is_some() {
            TransactionType::Blob
        } else if self.max_fee_per_gas.is_some() || self.max_priority_fee_per_gas.is_some() {
            TransactionType::FeeMarket
        } else if self.access_list.is_some() {
            TransactionType::AccessList
        } else {
            TransactionType::Legacy
        })
    }

    /// Chain id from the request, falling back to `default_chain_id`.
    pub fn chain_id(&self, default_chain_id: u64) -> Result<u64> {
        match &self.chain_id {
            Some(chain_id) => Ok(decode_quantity_u64("chainId", chain_id)?),
            None => Ok(default_chain_id),
        }
    }

    fn common(&self) -> Result<TxCommon> {
        let to = self
            .to
            .as_deref()
            .map(|to| decode_address("to", to))
            .transpose()?;

        Ok(TxCommon::new(
            optional_u64("nonce", self.nonce.as_deref())?,
            decode_quantity_u64("gas", &self.gas)?,
            to,
            optional_quantity("value", self.value.as_deref())?,
            match &self.data {
                Some(data) => decode_data("data", data)?,
                None => Vec::new(),
            },
        ))
    }

    fn fees(&self) -> Result<FeeMarketFees> {
        Ok(FeeMarketFees::new(
            required_quantity("maxPriorityFeePerGas", self.max_priority_fee_per_gas.as_deref())?,
            required_quantity("maxFeePerGas", self.max_fee_per_gas.as_deref())?,
        ))
    }

    fn access_list(&self) -> Vec<AccessListEntry> {
        self.access_list.clone().unwrap_or_default()
    }

    pub fn envelope(&self, default_chain_id: u64) -> Result<Envelope> {
        let chain_id = self.chain_id(default_chain_id)?;
        let common = self.common()?;

        let envelope = match self.transaction_type()? {
            TransactionType::Legacy => Envelope::legacy(
                common,
                required_quantity("gasPrice", self.gas_price.as_deref())?,
            ),
            TransactionType::AccessList => Envelope::access_list(
                chain_id,
                common,
                required_quantity("gasPrice", self.gas_price.as_deref())?,
                self.access_list(),
            ),
            TransactionType::FeeMarket => {
                Envelope::fee_market(chain_id, common, self.fees()?, self.access_list())
            }
            TransactionType::Blob => {
                let hashes = self
                    .blob_versioned_hashes
                    .iter()
                    .flatten()
                    .map(|hash| decode_hash("blobVersionedHashes", hash))
                    .collect::<citrate_transactions::Result<Vec<_>>>()?;
                Envelope::blob(BlobTransaction::new(
                    chain_id,
                    common,
                    self.fees()?,
                    self.access_list(),
                    required_quantity("maxFeePerBlobGas", self.max_fee_per_blob_gas.as_deref())?,
                    hashes,
                ))?
            }
            TransactionType::Delegation => {
                let authorizations = self
                    .authorization_list
                    .iter()
                    .flatten()
                    .map(AuthorizationObject::to_tuple)
                    .collect::<citrate_transactions::Result<Vec<_>>>()?;
                Envelope::delegation(
                    chain_id,
                    common,
                    self.fees()?,
                    self.access_list(),
                    authorizations,
                )?
            }
        };

        Ok(envelope)
    }

    /// The envelope, wrapped as a private transaction when `privateFrom` is set.
    pub fn payload(&self, default_chain_id: u64) -> Result<Box<dyn TransactionPayload>> {
        let envelope = self.envelope(default_chain_id)?;

        let Some(private_from) = &self.private_from else {
            return Ok(Box::new(envelope));
        };

        let recipients = match (&self.private_for, &self.privacy_group_id) {
            (Some(keys), None) => PrivacyRecipients::PrivateFor(
                keys.iter()
                    .map(|key| EnclaveKey::from_base64(key))
                    .collect::<citrate_transactions::Result<Vec<_>>>()?,
            ),
            (None, Some(group)) => PrivacyRecipients::PrivacyGroup(EnclaveKey::from_base64(group)?),
            _ => bail!("private transactions need exactly one of privateFor or privacyGroupId"),
        };

        let restriction = match self.restriction.as_deref() {
            None | Some("restricted") => Restriction::Restricted,
            Some("unrestricted") => Restriction::Unrestricted,
            Some(other) => bail!("unknown restriction `{}`", other),
        };

        Ok(Box::new(PrivateTransaction::new(
            envelope,
            EnclaveKey::from_base64(private_from)?,
            recipients,
            restriction,
        )?))
    }
}

fn optional_u64(field: &str, value: Option<&str>) -> Result<u64> {
    Ok(match value {
        Some(value) => decode_quantity_u64(field, value)?,
        None => 0,
    })
}

fn optional_quantity(field: &str, value: Option<&str>) -> Result<U256> {
    Ok(match value {
        Some(value) => decode_quantity(field, value)?,
        None => U256::zero(),
    })
}

fn required_quantity(field: &str, value: Option<&str>) -> Result<U256> {
    let value = value.with_context(|| format!("missing `{}`", field))?;
    Ok(decode_quantity(field, value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use citrate_transactions::encode;
    use serde_json::json;

    fn request(value: serde_json::Value) -> TransactionRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_type_inference() {
        let legacy = request(json!({ "gas": "0x5208", "gasPrice": "0x1" }));
        assert_eq!(legacy.transaction_type().unwrap(), TransactionType::Legacy);

        let fee_market = request(json!({ "gas": "0x5208", "maxFeePerGas": "0x2" }));
        assert_eq!(fee_market.transaction_type().unwrap(), TransactionType::FeeMarket);

        let access_list = request(json!({ "gas": "0x5208", "gasPrice": "0x1", "accessList": [] }));
        assert_eq!(access_list.transaction_type().unwrap(), TransactionType::AccessList);

        let explicit = request(json!({ "type": "0x2", "gas": "0x5208" }));
        assert_eq!(explicit.transaction_type().unwrap(), TransactionType::FeeMarket);

        let unknown = request(json!({ "type": "0x9", "gas": "0x5208" }));
        assert!(unknown.transaction_type().is_err());
    }

    #[test]
    fn test_fee_market_request_matches_vector() {
        let tx = request(json!({
            "chainId": "0x1",
            "nonce": "0x42",
            "gas": "0x7530",
            "maxPriorityFeePerGas": "0x684ee1800",
            "maxFeePerGas": "0x9c7652400",
            "to": "0xdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef",
            "value": "0xb98bc829a6f90000",
            "data": "0x"
        }))
        .envelope(1337)
        .unwrap();

        assert_eq!(
            hex::encode(encode(&tx).unwrap()),
            "02f10142850684ee18008509c765240082753094deadbeefdeadbeefdeadbeefdeadbeefdeadbeef88b98bc829a6f9000080c0"
        );
    }

    #[test]
    fn test_default_chain_id() {
        let tx = request(json!({ "gas": "0x5208", "maxFeePerGas": "0x2", "maxPriorityFeePerGas": "0x1" }));
        assert_eq!(tx.envelope(1337).unwrap().chain_id(), Some(1337));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let legacy = request(json!({ "gas": "0x5208" }));
        assert!(legacy.envelope(1).is_err());

        let bad_nonce = request(json!({ "gas": "0x5208", "gasPrice": "0x1", "nonce": "7" }));
        assert!(bad_nonce.envelope(1).is_err());
    }

    #[test]
    fn test_delegation_without_authorization_chain_id() {
        let tx = request(json!({
            "gas": "0x5208",
            "maxFeePerGas": "0x2",
            "maxPriorityFeePerGas": "0x1",
            "to": "0xdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef",
            "authorizationList": [{
                "nonce": "0x0",
                "address": "0xdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef",
                "yParity": "0x0",
                "r": "0x1",
                "s": "0x1"
            }]
        }));
        assert_eq!(tx.transaction_type().unwrap(), TransactionType::Delegation);
        assert!(tx.envelope(1).is_err());
    }

    #[test]
    fn test_private_payload() {
        let key = EnclaveKey::new([7u8; 32]).to_base64();
        let tx = request(json!({
            "gas": "0x5208",
            "gasPrice": "0x1",
            "privateFrom": key,
            "privacyGroupId": key,
            "restriction": "unrestricted"
        }));
        let payload = tx.payload(1).unwrap();
        assert_eq!(payload.transaction_type(), TransactionType::Legacy);
        assert_eq!(payload.unsigned_fields().unwrap().len(), 9);

        let both = request(json!({
            "gas": "0x5208",
            "gasPrice": "0x1",
            "privateFrom": key,
            "privateFor": [key],
            "privacyGroupId": key
        }));
        assert!(both.payload(1).is_err());
    }
}

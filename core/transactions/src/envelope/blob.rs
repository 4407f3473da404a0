// citrate/core/transactions/src/envelope/blob.rs

//! EIP-4844 blob transactions (type `0x03`).
//!
//! The signing preimage and the transaction hash always cover the bare field
//! list. When a sidecar is attached, the wire form wraps the signed field list
//! once more together with the blobs, commitments and proofs.

use ethereum_types::{H256, U256};
use sha2::{Digest, Sha256};

use super::common::{fee_market_fields, AccessListEntry, FeeMarketFees, TxCommon};
use crate::error::{Result, TransactionError};
use crate::rlp_item::RlpItem;

/// Bytes per blob (4096 field elements of 32 bytes).
pub const BLOB_SIZE: usize = 131_072;

/// Bytes per KZG commitment or proof.
pub const KZG_SIZE: usize = 48;

/// Version byte of KZG versioned hashes.
pub const VERSIONED_HASH_VERSION_KZG: u8 = 0x01;

/// `0x01 || sha256(commitment)[1..]`
pub fn kzg_to_versioned_hash(commitment: &[u8]) -> H256 {
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&Sha256::digest(commitment));
    hash[0] = VERSIONED_HASH_VERSION_KZG;
    H256::from(hash)
}

/// Blobs travelling with a transaction on the network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobSidecar {
    pub blobs: Vec<Vec<u8>>,
    pub commitments: Vec<Vec<u8>>,
    pub proofs: Vec<Vec<u8>>,
}

impl BlobSidecar {
    pub fn new(blobs: Vec<Vec<u8>>, commitments: Vec<Vec<u8>>, proofs: Vec<Vec<u8>>) -> Self {
        Self {
            blobs,
            commitments,
            proofs,
        }
    }

    pub fn versioned_hashes(&self) -> Vec<H256> {
        self.commitments
            .iter()
            .map(|commitment| kzg_to_versioned_hash(commitment))
            .collect()
    }

    /// Check sizes and that each commitment hashes to the matching versioned hash.
    pub fn validate(&self, versioned_hashes: &[H256]) -> Result<()> {
        let count = versioned_hashes.len();
        if self.blobs.len() != count || self.commitments.len() != count || self.proofs.len() != count {
            return Err(TransactionError::malformed(
                "sidecar",
                format!(
                    "expected {} blobs, commitments and proofs, got {}/{}/{}",
                    count,
                    self.blobs.len(),
                    self.commitments.len(),
                    self.proofs.len()
                ),
            ));
        }

        for (i, blob) in self.blobs.iter().enumerate() {
            if blob.len() != BLOB_SIZE {
                return Err(TransactionError::malformed(
                    format!("sidecar.blobs[{}]", i),
                    format!("blob must be {} bytes, got {}", BLOB_SIZE, blob.len()),
                ));
            }
        }

        for (i, (commitment, proof)) in self.commitments.iter().zip(&self.proofs).enumerate() {
            if commitment.len() != KZG_SIZE || proof.len() != KZG_SIZE {
                return Err(TransactionError::malformed(
                    format!("sidecar[{}]", i),
                    format!("commitments and proofs must be {} bytes", KZG_SIZE),
                ));
            }
            if kzg_to_versioned_hash(commitment) != versioned_hashes[i] {
                return Err(TransactionError::malformed(
                    format!("blobVersionedHashes[{}]", i),
                    "does not match sidecar commitment",
                ));
            }
        }

        Ok(())
    }

    fn items(&self) -> [RlpItem; 3] {
        let list = |values: &[Vec<u8>]| {
            RlpItem::list(values.iter().map(|v| RlpItem::bytes(v.clone())).collect())
        };
        [list(&self.blobs), list(&self.commitments), list(&self.proofs)]
    }
}

/// EIP-4844 transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobTransaction {
    pub chain_id: u64,
    pub common: TxCommon,
    pub fees: FeeMarketFees,
    pub access_list: Vec<AccessListEntry>,
    pub max_fee_per_blob_gas: U256,
    pub blob_versioned_hashes: Vec<H256>,
    pub sidecar: Option<BlobSidecar>,
}

impl BlobTransaction {
    pub fn new(
        chain_id: u64,
        common: TxCommon,
        fees: FeeMarketFees,
        access_list: Vec<AccessListEntry>,
        max_fee_per_blob_gas: U256,
        blob_versioned_hashes: Vec<H256>,
    ) -> Self {
        Self {
            chain_id,
            common,
            fees,
            access_list,
            max_fee_per_blob_gas,
            blob_versioned_hashes,
            sidecar: None,
        }
    }

    /// Attach blobs; they must match the versioned hashes already set.
    pub fn with_sidecar(mut self, sidecar: BlobSidecar) -> Result<Self> {
        sidecar.validate(&self.blob_versioned_hashes)?;
        self.sidecar = Some(sidecar);
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.common.to.is_none() {
            return Err(TransactionError::malformed(
                "to",
                "blob transactions cannot create contracts",
            ));
        }
        if self.blob_versioned_hashes.is_empty() {
            return Err(TransactionError::malformed(
                "blobVersionedHashes",
                "at least one blob is required",
            ));
        }
        for (i, hash) in self.blob_versioned_hashes.iter().enumerate() {
            if hash.as_bytes()[0] != VERSIONED_HASH_VERSION_KZG {
                return Err(TransactionError::malformed(
                    format!("blobVersionedHashes[{}]", i),
                    format!("unsupported version byte 0x{:02x}", hash.as_bytes()[0]),
                ));
            }
        }
        if let Some(sidecar) = &self.sidecar {
            sidecar.validate(&self.blob_versioned_hashes)?;
        }
        Ok(())
    }

    /// `[chainId, nonce, maxPriorityFeePerGas, maxFeePerGas, gasLimit, to, value, data,
    /// accessList, maxFeePerBlobGas, blobVersionedHashes]`
    pub fn unsigned_fields(&self) -> Vec<RlpItem> {
        let mut fields =
            fee_market_fields(self.chain_id, &self.common, &self.fees, &self.access_list);
        fields.push(RlpItem::uint(self.max_fee_per_blob_gas));
        fields.push(RlpItem::hashes(&self.blob_versioned_hashes));
        fields
    }

    /// Network form `[[signed fields], blobs, commitments, proofs]`, or the bare
    /// signed list when no sidecar is attached.
    pub(crate) fn wrap_signed(&self, signed_fields: Vec<RlpItem>) -> RlpItem {
        match &self.sidecar {
            Some(sidecar) => {
                let [blobs, commitments, proofs] = sidecar.items();
                RlpItem::list(vec![RlpItem::list(signed_fields), blobs, commitments, proofs])
            }
            None => RlpItem::list(signed_fields),
        }
    }
}

// citrate/core/transactions/src/encoder.rs

//! Turns envelopes into signing preimages and final wire bytes.
//!
//! A transaction moves through `built -> preimage ready -> signed -> final
//! bytes`. Nothing here holds state between calls; each function takes the
//! stage it needs and returns the next one.

use ethereum_types::{H256, U256};
use tracing::{debug, trace};

use crate::crypto::{keccak256, recover_address, Signer};
use crate::envelope::{Address, TransactionPayload, TransactionType};
use crate::error::{Result, TransactionError};
use crate::rlp_item::RlpItem;
use crate::signature::{SignatureValue, LOWER_REAL_V};

fn with_type_byte(tx_type: TransactionType, payload: &RlpItem) -> Vec<u8> {
    let encoded = payload.encode();
    match tx_type.type_byte() {
        Some(byte) => {
            let mut out = Vec::with_capacity(encoded.len() + 1);
            out.push(byte);
            out.extend_from_slice(&encoded);
            out
        }
        None => encoded,
    }
}

/// Signing preimage: `[type byte] || rlp(unsigned fields)`.
pub fn encode<T: TransactionPayload + ?Sized>(tx: &T) -> Result<Vec<u8>> {
    let fields = tx.unsigned_fields()?;
    let preimage = with_type_byte(tx.transaction_type(), &RlpItem::list(fields));
    trace!(
        "Encoded {} preimage ({} bytes)",
        tx.transaction_type(),
        preimage.len()
    );
    Ok(preimage)
}

/// EIP-155 preimage `rlp([unsigned fields, chainId, empty, empty])`.
///
/// Only Legacy transactions take an external chain id; typed envelopes carry
/// their own.
pub fn encode_for_chain<T: TransactionPayload + ?Sized>(tx: &T, chain_id: u64) -> Result<Vec<u8>> {
    if tx.transaction_type().is_typed() {
        return Err(TransactionError::unsupported(format!(
            "{} transactions carry their own chain id",
            tx.transaction_type()
        )));
    }

    let placeholder = SignatureValue::chain_id_placeholder(chain_id);
    let preimage = tx.signed_payload(&placeholder)?.encode();
    trace!(
        "Encoded EIP-155 preimage for chain {} ({} bytes)",
        chain_id,
        preimage.len()
    );
    Ok(preimage)
}

/// Final wire bytes: `[type byte] || rlp(signed payload)`.
///
/// Legacy transactions need a 27/28 or EIP-155 `v`; a raw 0/1 parity is
/// rejected. Convert it with [`SignatureValue::to_legacy`] first.
pub fn encode_signed<T: TransactionPayload + ?Sized>(
    tx: &T,
    signature: &SignatureValue,
) -> Result<Vec<u8>> {
    if !tx.transaction_type().is_typed() && signature.v() < U256::from(LOWER_REAL_V) {
        return Err(TransactionError::InvalidSignatureEncoding(format!(
            "legacy v must be at least {}, got {}",
            LOWER_REAL_V,
            signature.v()
        )));
    }

    let payload = tx.signed_payload(signature)?;
    Ok(with_type_byte(tx.transaction_type(), &payload))
}

/// Shift a signature's recovery id onto the EIP-155 `v` for `chain_id`.
pub fn create_eip155_signature(signature: &SignatureValue, chain_id: u64) -> Result<SignatureValue> {
    signature.to_legacy(Some(chain_id))
}

/// Sign without external replay protection.
///
/// Legacy signatures use `v = 27 + recovery id`; typed envelopes keep the
/// raw parity.
pub fn sign_transaction<T, S>(tx: &T, signer: &S) -> Result<SignedTransaction>
where
    T: TransactionPayload + ?Sized,
    S: Signer + ?Sized,
{
    let preimage = encode(tx)?;
    let raw = signer.sign(&preimage)?;
    let typed = SignatureValue::from_recovery_id(raw.recovery_id, raw.r, raw.s)?;

    let signature = if tx.transaction_type().is_typed() {
        typed
    } else {
        typed.to_legacy(None)?
    };

    SignedTransaction::assemble(tx, signature)
}

/// Sign with a chain id: EIP-155 for Legacy, plain signing for typed
/// envelopes.
pub fn sign_transaction_for_chain<T, S>(tx: &T, chain_id: u64, signer: &S) -> Result<SignedTransaction>
where
    T: TransactionPayload + ?Sized,
    S: Signer + ?Sized,
{
    if tx.transaction_type().is_typed() {
        if tx.chain_id() != Some(chain_id) {
            debug!(
                "Ignoring chain id {} for {} transaction bound to {:?}",
                chain_id,
                tx.transaction_type(),
                tx.chain_id()
            );
        }
        return sign_transaction(tx, signer);
    }

    let preimage = encode_for_chain(tx, chain_id)?;
    let raw = signer.sign(&preimage)?;
    let typed = SignatureValue::from_recovery_id(raw.recovery_id, raw.r, raw.s)?;
    let signature = create_eip155_signature(&typed, chain_id)?;

    SignedTransaction::assemble(tx, signature)
}

/// Signed transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    transaction_type: TransactionType,
    signature: SignatureValue,
    raw: Vec<u8>,
    hash: H256,
}

impl SignedTransaction {
    /// Attach an externally produced signature.
    pub fn assemble<T: TransactionPayload + ?Sized>(tx: &T, signature: SignatureValue) -> Result<Self> {
        let transaction_type = tx.transaction_type();
        let raw = encode_signed(tx, &signature)?;

        // Hash the canonical form; a blob sidecar wrapper is not part of it.
        let canonical = with_type_byte(
            transaction_type,
            &RlpItem::list(tx.signed_fields(&signature)?),
        );
        let hash = keccak256(&canonical);

        debug!(
            "Signed {} transaction 0x{} ({} bytes)",
            transaction_type,
            hex::encode(hash.as_bytes()),
            raw.len()
        );

        Ok(Self {
            transaction_type,
            signature,
            raw,
            hash,
        })
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn signature(&self) -> &SignatureValue {
        &self.signature
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn raw_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.raw))
    }

    pub fn hash(&self) -> H256 {
        self.hash
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.raw
    }
}

/// Recover the sender of `tx` from its signature.
///
/// For Legacy the EIP-155 preimage is used whenever `v` embeds a chain id.
pub fn recover_signer<T: TransactionPayload + ?Sized>(
    tx: &T,
    signature: &SignatureValue,
) -> Result<Address> {
    let (preimage, recovery_id) = match tx.chain_id() {
        Some(chain_id) => (encode(tx)?, signature.recovery_id(Some(chain_id))?),
        None => match signature.chain_id() {
            Some(chain_id) => (
                encode_for_chain(tx, chain_id)?,
                signature.recovery_id(Some(chain_id))?,
            ),
            None => (encode(tx)?, signature.recovery_id(None)?),
        },
    };

    recover_address(&keccak256(&preimage), recovery_id, signature.r(), signature.s())
}

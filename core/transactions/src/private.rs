// citrate/core/transactions/src/private.rs

//! Private transactions: a Legacy or Fee-Market envelope decorated with
//! enclave routing fields.
//!
//! The privacy fields sit between the inner envelope's unsigned fields and
//! the signature, so they are covered by the signature and the preimage.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;

use crate::envelope::{Envelope, TransactionPayload, TransactionType};
use crate::error::{Result, TransactionError};
use crate::rlp_item::RlpItem;
use crate::signature::SignatureValue;

/// 32-byte enclave public key, exchanged as base64.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnclaveKey([u8; 32]);

impl EnclaveKey {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_base64(value: &str) -> Result<Self> {
        let decoded = STANDARD
            .decode(value.trim())
            .map_err(|e| TransactionError::malformed("enclaveKey", e.to_string()))?;
        if decoded.len() != 32 {
            return Err(TransactionError::malformed(
                "enclaveKey",
                format!("expected 32 bytes, got {}", decoded.len()),
            ));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for EnclaveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnclaveKey({})", self.to_base64())
    }
}

/// Who may decrypt the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivacyRecipients {
    PrivateFor(Vec<EnclaveKey>),
    PrivacyGroup(EnclaveKey),
}

impl PrivacyRecipients {
    fn to_item(&self) -> RlpItem {
        match self {
            PrivacyRecipients::PrivateFor(keys) => RlpItem::list(
                keys.iter()
                    .map(|key| RlpItem::bytes(key.as_bytes().to_vec()))
                    .collect(),
            ),
            PrivacyRecipients::PrivacyGroup(group) => RlpItem::bytes(group.as_bytes().to_vec()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Restriction {
    #[default]
    Restricted,
    Unrestricted,
}

impl Restriction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Restriction::Restricted => "restricted",
            Restriction::Unrestricted => "unrestricted",
        }
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateTransaction {
    inner: Envelope,
    private_from: EnclaveKey,
    recipients: PrivacyRecipients,
    restriction: Restriction,
}

impl PrivateTransaction {
    pub fn new(
        inner: Envelope,
        private_from: EnclaveKey,
        recipients: PrivacyRecipients,
        restriction: Restriction,
    ) -> Result<Self> {
        match inner.transaction_type() {
            TransactionType::Legacy | TransactionType::FeeMarket => {}
            other => {
                return Err(TransactionError::unsupported(format!(
                    "private transactions cannot wrap {} envelopes",
                    other
                )))
            }
        }
        if let PrivacyRecipients::PrivateFor(keys) = &recipients {
            if keys.is_empty() {
                return Err(TransactionError::malformed(
                    "privateFor",
                    "at least one recipient is required",
                ));
            }
        }

        Ok(Self {
            inner,
            private_from,
            recipients,
            restriction,
        })
    }

    pub fn inner(&self) -> &Envelope {
        &self.inner
    }

    pub fn private_from(&self) -> &EnclaveKey {
        &self.private_from
    }

    pub fn recipients(&self) -> &PrivacyRecipients {
        &self.recipients
    }

    pub fn restriction(&self) -> Restriction {
        self.restriction
    }

    /// `[privateFrom, privateFor | privacyGroupId, restriction]`
    fn privacy_fields(&self) -> [RlpItem; 3] {
        [
            RlpItem::bytes(self.private_from.as_bytes().to_vec()),
            self.recipients.to_item(),
            RlpItem::bytes(self.restriction.as_str().as_bytes()),
        ]
    }
}

impl TransactionPayload for PrivateTransaction {
    fn transaction_type(&self) -> TransactionType {
        self.inner.transaction_type()
    }

    fn chain_id(&self) -> Option<u64> {
        self.inner.chain_id()
    }

    fn unsigned_fields(&self) -> Result<Vec<RlpItem>> {
        let mut fields = self.inner.unsigned_fields()?;
        fields.extend(self.privacy_fields());
        Ok(fields)
    }

    fn signed_fields(&self, signature: &SignatureValue) -> Result<Vec<RlpItem>> {
        let mut fields = self.unsigned_fields()?;
        fields.extend(self.inner.signature_fields(signature)?);
        Ok(fields)
    }
}

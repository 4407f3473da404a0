// citrate/core/transactions/src/signature.rs

//! Signature value and the recovery-id conventions it carries.
//!
//! Two encodings of the recovery component coexist:
//! - Legacy: `v = 27 + id`, or `v = 35 + 2 * chain_id + id` once EIP-155
//!   replay protection is applied.
//! - Typed envelopes: the raw recovery id (`0` or `1`) stored as `y_parity`.

use ethereum_types::U256;

use crate::error::{Result, TransactionError};
use crate::rlp_item::{minimal_be_bytes, RlpItem};

/// `v` offset for signatures without replay protection.
pub const LOWER_REAL_V: u64 = 27;

/// `v` offset added on top of `2 * chain_id` under EIP-155.
pub const CHAIN_ID_INC: u64 = 35;

/// Three-component signature: recovery component, `r` and `s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignatureValue {
    v: U256,
    r: U256,
    s: U256,
}

impl SignatureValue {
    /// Typed-transaction form: `v` holds the raw parity.
    pub fn from_recovery_id(recovery_id: u8, r: U256, s: U256) -> Result<Self> {
        if recovery_id > 1 {
            return Err(TransactionError::InvalidSignatureEncoding(format!(
                "recovery id must be 0 or 1, got {}",
                recovery_id
            )));
        }
        Ok(Self {
            v: U256::from(recovery_id),
            r,
            s,
        })
    }

    /// Build from an explicit `v`, as read from a signed legacy transaction.
    pub fn from_parts(v: U256, r: U256, s: U256) -> Self {
        Self { v, r, s }
    }

    /// Placeholder `(chain_id, empty, empty)` used for the EIP-155 signing preimage.
    pub fn chain_id_placeholder(chain_id: u64) -> Self {
        Self {
            v: U256::from(chain_id),
            r: U256::zero(),
            s: U256::zero(),
        }
    }

    pub fn v(&self) -> U256 {
        self.v
    }

    pub fn r(&self) -> U256 {
        self.r
    }

    pub fn s(&self) -> U256 {
        self.s
    }

    /// `r` left-padded to 32 bytes.
    pub fn r_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.r.to_big_endian(&mut out);
        out
    }

    /// `s` left-padded to 32 bytes.
    pub fn s_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.s.to_big_endian(&mut out);
        out
    }

    /// Recover the raw recovery id under whichever convention `v` follows.
    ///
    /// With a chain id, an EIP-155 `v` must match that chain exactly.
    pub fn recovery_id(&self, chain_id: Option<u64>) -> Result<u8> {
        let v = self.v;

        if v <= U256::one() {
            return Ok(v.low_u64() as u8);
        }

        let lower = U256::from(LOWER_REAL_V);
        if v == lower || v == lower + U256::one() {
            return Ok((v - lower).low_u64() as u8);
        }

        let inc = U256::from(CHAIN_ID_INC);
        if v >= inc {
            let offset = v - inc;
            match chain_id {
                Some(chain_id) => {
                    let base = U256::from(chain_id) * U256::from(2u64);
                    if offset == base || offset == base + U256::one() {
                        return Ok((offset - base).low_u64() as u8);
                    }
                }
                None => return Ok((offset % U256::from(2u64)).low_u64() as u8),
            }
        }

        Err(TransactionError::InvalidSignatureEncoding(match chain_id {
            Some(chain_id) => format!("v={} does not match chain id {}", v, chain_id),
            None => format!("v={} is not a recognised recovery encoding", v),
        }))
    }

    /// Chain id embedded in an EIP-155 `v`, if any.
    pub fn chain_id(&self) -> Option<u64> {
        derive_chain_id(self.v)
    }

    /// Legacy form of this signature: `27 + id`, or the EIP-155 shift when a
    /// chain id is supplied.
    pub fn to_legacy(&self, chain_id: Option<u64>) -> Result<Self> {
        Ok(Self {
            v: self.legacy_v(chain_id)?,
            r: self.r,
            s: self.s,
        })
    }

    /// Legacy `v` as a number.
    pub fn legacy_v(&self, chain_id: Option<u64>) -> Result<U256> {
        let id = U256::from(self.recovery_id(None)?);
        Ok(match chain_id {
            Some(chain_id) => id + U256::from(CHAIN_ID_INC) + U256::from(chain_id) * U256::from(2u64),
            None => id + U256::from(LOWER_REAL_V),
        })
    }

    /// Legacy `v` as minimal big-endian bytes.
    pub fn legacy_v_bytes(&self, chain_id: Option<u64>) -> Result<Vec<u8>> {
        Ok(minimal_be_bytes(self.legacy_v(chain_id)?))
    }

    /// `[v, r, s]` exactly as carried.
    pub(crate) fn legacy_fields(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::uint(self.v),
            RlpItem::uint(self.r),
            RlpItem::uint(self.s),
        ]
    }

    /// `[y_parity, r, s]` with the parity re-derived against `chain_id`.
    pub(crate) fn parity_fields(&self, chain_id: u64) -> Result<Vec<RlpItem>> {
        let parity = self.recovery_id(Some(chain_id))?;
        Ok(vec![
            RlpItem::from(parity),
            RlpItem::uint(self.r),
            RlpItem::uint(self.s),
        ])
    }
}

/// Invert EIP-155: `floor((v - 35) / 2)`, only defined for `v >= 35`.
pub fn derive_chain_id(v: U256) -> Option<u64> {
    let inc = U256::from(CHAIN_ID_INC);
    if v < inc {
        return None;
    }
    let chain_id = (v - inc) / U256::from(2u64);
    if chain_id > U256::from(u64::MAX) {
        return None;
    }
    Some(chain_id.low_u64())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(v: u64) -> SignatureValue {
        SignatureValue::from_parts(U256::from(v), U256::from(1u64), U256::from(2u64))
    }

    #[test]
    fn test_legacy_v_without_chain_id() {
        let typed = SignatureValue::from_recovery_id(0, U256::one(), U256::one()).unwrap();
        assert_eq!(typed.to_legacy(None).unwrap().v(), U256::from(27u64));

        let typed = SignatureValue::from_recovery_id(1, U256::one(), U256::one()).unwrap();
        assert_eq!(typed.legacy_v(None).unwrap(), U256::from(28u64));
    }

    #[test]
    fn test_eip155_shift() {
        let typed = SignatureValue::from_recovery_id(1, U256::one(), U256::one()).unwrap();
        let legacy = typed.to_legacy(Some(1)).unwrap();
        assert_eq!(legacy.v(), U256::from(38u64));
        assert_eq!(legacy.recovery_id(Some(1)).unwrap(), 1);
        assert_eq!(legacy.chain_id(), Some(1));
    }

    #[test]
    fn test_recovery_id_conventions() {
        assert_eq!(sig(0).recovery_id(None).unwrap(), 0);
        assert_eq!(sig(1).recovery_id(Some(5)).unwrap(), 1);
        assert_eq!(sig(27).recovery_id(None).unwrap(), 0);
        assert_eq!(sig(28).recovery_id(Some(1)).unwrap(), 1);
        assert_eq!(sig(37).recovery_id(None).unwrap(), 0);
        assert_eq!(sig(2710).recovery_id(Some(1337)).unwrap(), 1);
    }

    #[test]
    fn test_malformed_v_is_rejected() {
        assert!(matches!(
            sig(5).recovery_id(None),
            Err(TransactionError::InvalidSignatureEncoding(_))
        ));
        // EIP-155 v for chain 1 checked against chain 5
        assert!(matches!(
            sig(37).recovery_id(Some(5)),
            Err(TransactionError::InvalidSignatureEncoding(_))
        ));
        assert!(sig(30).recovery_id(Some(1)).is_err());
    }

    #[test]
    fn test_derive_chain_id() {
        assert_eq!(derive_chain_id(U256::from(27u64)), None);
        assert_eq!(derive_chain_id(U256::from(28u64)), None);
        assert_eq!(derive_chain_id(U256::from(35u64)), Some(0));
        assert_eq!(derive_chain_id(U256::from(37u64)), Some(1));
        assert_eq!(derive_chain_id(U256::from(2709u64)), Some(1337));
    }

    #[test]
    fn test_recovery_id_above_one_rejected() {
        assert!(SignatureValue::from_recovery_id(2, U256::one(), U256::one()).is_err());
    }

    #[test]
    fn test_components_are_trimmed() {
        let value = SignatureValue::from_parts(U256::from(27u64), U256::zero(), U256::from(0x01ffu64));
        let fields = value.legacy_fields();
        assert_eq!(fields[1], RlpItem::empty());
        assert_eq!(fields[2], RlpItem::bytes(vec![0x01, 0xff]));
        assert_eq!(value.s_bytes()[30..], [0x01, 0xff]);
    }

    #[test]
    fn test_placeholder_carries_chain_id() {
        let placeholder = SignatureValue::chain_id_placeholder(1);
        assert_eq!(
            placeholder.legacy_fields(),
            vec![RlpItem::from(1u64), RlpItem::empty(), RlpItem::empty()]
        );
    }
}

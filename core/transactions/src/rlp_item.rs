// citrate/core/transactions/src/rlp_item.rs

//! Item tree handed to the RLP serializer.
//!
//! Every envelope describes itself as an ordered sequence of [`RlpItem`]s. The
//! tree is serialized through [`rlp::RlpStream`], which applies the single
//! byte, short and long prefix rules for strings and lists.

use ethereum_types::{H160, H256, U256};
use rlp::{Encodable, RlpStream};

/// A node of the recursive length-prefix tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    /// Atomic byte string.
    String(Vec<u8>),
    /// Ordered list of nested items.
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// Unsigned integer as a minimal big-endian string. Zero is the empty string.
    pub fn uint(value: U256) -> Self {
        RlpItem::String(minimal_be_bytes(value))
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        RlpItem::String(bytes.into())
    }

    pub fn empty() -> Self {
        RlpItem::String(Vec::new())
    }

    pub fn list(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }

    /// Optional address; absent encodes as the empty string, never omitted.
    pub fn address(address: Option<&H160>) -> Self {
        match address {
            Some(address) => RlpItem::bytes(address.as_bytes()),
            None => RlpItem::empty(),
        }
    }

    pub fn hashes(hashes: &[H256]) -> Self {
        RlpItem::List(
            hashes
                .iter()
                .map(|hash| RlpItem::bytes(hash.as_bytes()))
                .collect(),
        )
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    /// Serialize this item into its canonical byte form.
    pub fn encode(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }
}

impl Encodable for RlpItem {
    fn rlp_append(&self, s: &mut RlpStream) {
        match self {
            // The caller's `append` already counted this item.
            RlpItem::String(bytes) => bytes.rlp_append(s),
            RlpItem::List(items) => {
                s.begin_list(items.len());
                for item in items {
                    s.append(item);
                }
            }
        }
    }
}

impl From<u64> for RlpItem {
    fn from(value: u64) -> Self {
        RlpItem::uint(U256::from(value))
    }
}

impl From<u8> for RlpItem {
    fn from(value: u8) -> Self {
        RlpItem::uint(U256::from(value))
    }
}

impl From<U256> for RlpItem {
    fn from(value: U256) -> Self {
        RlpItem::uint(value)
    }
}

/// Strip leading zero bytes. An all-zero input yields the empty slice.
pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len());
    &bytes[first..]
}

/// Minimal big-endian representation of `value`, with no leading zero byte.
pub fn minimal_be_bytes(value: U256) -> Vec<u8> {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    trim_leading_zeros(&buf).to_vec()
}

// Property-based tests for the encoder
//
// 1. Minimality: integers encode without leading zeros and decode back exactly
// 2. Determinism: the same inputs always give the same bytes
// 3. Type-byte presence: typed output starts with its discriminator, Legacy with a list prefix
// 4. Well-formedness: signed output parses as one RLP list with the right field count
// 5. EIP-155 round trip: recovery id and chain id survive the v shift
// 6. Authorization tuples: equality and hashing cover every field

use citrate_transactions::rlp_item::minimal_be_bytes;
use citrate_transactions::*;
use proptest::prelude::*;
use rlp::Rlp;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn u256() -> impl Strategy<Value = U256> {
    any::<[u8; 32]>().prop_map(|bytes| U256::from_big_endian(&bytes))
}

fn address() -> impl Strategy<Value = Option<Address>> {
    prop_oneof![
        Just(None),
        any::<[u8; 20]>().prop_map(|bytes| Some(Address::from(bytes))),
    ]
}

fn common() -> impl Strategy<Value = TxCommon> {
    (
        any::<u64>(),
        any::<u64>(),
        address(),
        u256(),
        proptest::collection::vec(any::<u8>(), 0..96),
    )
        .prop_map(|(nonce, gas_limit, to, value, data)| {
            TxCommon::new(nonce, gas_limit, to, value, data)
        })
}

fn versioned_hashes() -> impl Strategy<Value = Vec<H256>> {
    proptest::collection::vec(any::<[u8; 32]>(), 1..4).prop_map(|hashes| {
        hashes
            .into_iter()
            .map(|mut bytes| {
                bytes[0] = 0x01;
                H256::from(bytes)
            })
            .collect()
    })
}

fn authorization_tuple() -> impl Strategy<Value = AuthorizationTuple> {
    (
        any::<u64>(),
        any::<[u8; 20]>(),
        any::<u64>(),
        0u8..2,
        u256(),
        u256(),
    )
        .prop_map(|(chain_id, address, nonce, y_parity, r, s)| {
            AuthorizationTuple::new(chain_id, Address::from(address), nonce, y_parity, r, s).unwrap()
        })
}

fn envelope() -> impl Strategy<Value = Envelope> {
    (
        common(),
        any::<u64>(),
        u256(),
        u256(),
        u256(),
        versioned_hashes(),
        proptest::collection::vec(authorization_tuple(), 1..3),
        0u8..5,
    )
        .prop_map(
            |(mut common, chain_id, fee_a, fee_b, blob_fee, hashes, authorizations, kind)| {
                let fees = FeeMarketFees::new(fee_a, fee_b);
                match kind {
                    0 => Envelope::legacy(common, fee_a),
                    1 => Envelope::access_list(chain_id, common, fee_a, vec![]),
                    2 => Envelope::fee_market(chain_id, common, fees, vec![]),
                    3 => {
                        common.to.get_or_insert(Address::repeat_byte(0x11));
                        Envelope::blob(BlobTransaction::new(
                            chain_id,
                            common,
                            fees,
                            vec![],
                            blob_fee,
                            hashes,
                        ))
                        .unwrap()
                    }
                    _ => {
                        common.to.get_or_insert(Address::repeat_byte(0x22));
                        Envelope::delegation(chain_id, common, fees, vec![], authorizations)
                            .unwrap()
                    }
                }
            },
        )
}

fn signature() -> impl Strategy<Value = SignatureValue> {
    (0u8..2, u256(), u256())
        .prop_map(|(id, r, s)| SignatureValue::from_recovery_id(id, r, s).unwrap())
}

/// Legacy envelopes carry `27 + id`; typed ones the raw parity.
fn signature_for(tx: &Envelope, sig: &SignatureValue) -> SignatureValue {
    if tx.transaction_type().is_typed() {
        *sig
    } else {
        sig.to_legacy(None).unwrap()
    }
}

/// Signed field count and the list positions of nonce, gas limit and value.
fn layout(tx_type: TransactionType) -> (usize, usize, usize, usize) {
    match tx_type {
        TransactionType::Legacy => (9, 0, 2, 4),
        TransactionType::AccessList => (11, 1, 3, 5),
        TransactionType::FeeMarket => (12, 1, 4, 6),
        TransactionType::Delegation => (13, 1, 4, 6),
        TransactionType::Blob => (14, 1, 4, 6),
    }
}

fn hash_of(tuple: &AuthorizationTuple) -> u64 {
    let mut hasher = DefaultHasher::new();
    tuple.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn minimal_encoding_round_trips(value in u256()) {
        let bytes = minimal_be_bytes(value);
        if value.is_zero() {
            prop_assert!(bytes.is_empty());
        } else {
            prop_assert_ne!(bytes[0], 0);
        }
        prop_assert_eq!(U256::from_big_endian(&bytes), value);
    }

    #[test]
    fn encoding_is_deterministic(tx in envelope(), sig in signature()) {
        let sig = signature_for(&tx, &sig);
        prop_assert_eq!(encode(&tx).unwrap(), encode(&tx.clone()).unwrap());
        prop_assert_eq!(
            encode_signed(&tx, &sig).unwrap(),
            encode_signed(&tx.clone(), &sig).unwrap()
        );
    }

    #[test]
    fn type_byte_is_present(tx in envelope(), sig in signature()) {
        let raw = encode_signed(&tx, &signature_for(&tx, &sig)).unwrap();
        match tx.transaction_type().type_byte() {
            Some(byte) => prop_assert_eq!(raw[0], byte),
            None => prop_assert!(raw[0] >= 0xc0),
        }
    }

    #[test]
    fn signed_output_is_well_formed(tx in envelope(), sig in signature()) {
        let sig = signature_for(&tx, &sig);
        let raw = encode_signed(&tx, &sig).unwrap();
        let body = match tx.transaction_type().type_byte() {
            Some(_) => &raw[1..],
            None => &raw[..],
        };

        let rlp = Rlp::new(body);
        let (fields, nonce_at, gas_at, value_at) = layout(tx.transaction_type());
        prop_assert!(rlp.is_list());
        prop_assert_eq!(rlp.payload_info().unwrap().total(), body.len());
        prop_assert_eq!(rlp.item_count().unwrap(), fields);

        let common = tx.common();
        prop_assert_eq!(rlp.val_at::<u64>(nonce_at).unwrap(), common.nonce);
        prop_assert_eq!(rlp.val_at::<u64>(gas_at).unwrap(), common.gas_limit);
        prop_assert_eq!(rlp.val_at::<U256>(value_at).unwrap(), common.value);
        prop_assert_eq!(rlp.val_at::<U256>(fields - 2).unwrap(), sig.r());
        prop_assert_eq!(rlp.val_at::<U256>(fields - 1).unwrap(), sig.s());
    }

    #[test]
    fn eip155_round_trip(id in 0u8..2, chain_id in 0u64..(u64::MAX / 4), r in u256(), s in u256()) {
        let sig = SignatureValue::from_recovery_id(id, r, s).unwrap();
        let legacy = sig.to_legacy(Some(chain_id)).unwrap();
        prop_assert_eq!(legacy.recovery_id(Some(chain_id)).unwrap(), id);
        prop_assert_eq!(derive_chain_id(legacy.v()), Some(chain_id));
    }

    #[test]
    fn authorization_equality_tracks_every_field(
        tuple in authorization_tuple(),
        field in 0usize..6,
        bump in 1u64..1000,
    ) {
        let copy = AuthorizationTuple::new(
            tuple.chain_id(),
            tuple.address(),
            tuple.nonce(),
            tuple.y_parity(),
            tuple.r(),
            tuple.s(),
        )
        .unwrap();
        prop_assert_eq!(copy, tuple);
        prop_assert_eq!(hash_of(&copy), hash_of(&tuple));

        let mut address = tuple.address();
        address.as_bytes_mut()[0] ^= 0x01;
        let (chain_id, nonce, y_parity, r, s) = (
            tuple.chain_id(),
            tuple.nonce(),
            tuple.y_parity(),
            tuple.r(),
            tuple.s(),
        );
        let changed = match field {
            0 => AuthorizationTuple::new(chain_id.wrapping_add(bump), tuple.address(), nonce, y_parity, r, s),
            1 => AuthorizationTuple::new(chain_id, address, nonce, y_parity, r, s),
            2 => AuthorizationTuple::new(chain_id, tuple.address(), nonce.wrapping_add(bump), y_parity, r, s),
            3 => AuthorizationTuple::new(chain_id, tuple.address(), nonce, 1 - y_parity, r, s),
            4 => AuthorizationTuple::new(chain_id, tuple.address(), nonce, y_parity, r ^ U256::one(), s),
            _ => AuthorizationTuple::new(chain_id, tuple.address(), nonce, y_parity, r, s ^ U256::one()),
        }
        .unwrap();
        prop_assert_ne!(changed, tuple);
        prop_assert_ne!(hash_of(&changed), hash_of(&tuple));
    }
}

// citrate/core/transactions/src/lib.rs

pub mod authorization;
pub mod crypto;
pub mod encoder;
pub mod envelope;
pub mod error;
pub mod private;
pub mod quantity;
pub mod rlp_item;
pub mod rpc;
pub mod signature;

pub use authorization::{Authorization, AuthorizationTuple, AUTHORIZATION_MAGIC};
pub use crypto::{keccak256, recover_address, RawSignature, Secp256k1Signer, Signer};
pub use encoder::{
    create_eip155_signature, encode, encode_for_chain, encode_signed, recover_signer,
    sign_transaction, sign_transaction_for_chain, SignedTransaction,
};
pub use envelope::{
    AccessListEntry, AccessListTransaction, Address, BlobSidecar, BlobTransaction,
    DelegationTransaction, Envelope, FeeMarketFees, FeeMarketTransaction, LegacyTransaction,
    TransactionPayload, TransactionType, TxCommon,
};
pub use error::{Result, TransactionError};
pub use private::{EnclaveKey, PrivacyRecipients, PrivateTransaction, Restriction};
pub use rlp_item::RlpItem;
pub use rpc::AuthorizationObject;
pub use signature::{derive_chain_id, SignatureValue};

pub use ethereum_types::{H160, H256, U256};

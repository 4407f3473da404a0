// citrate/core/transactions/src/crypto.rs

use ethereum_types::{H160, H256, U256};
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    All, Message, PublicKey, Secp256k1, SecretKey,
};
use sha3::{Digest, Keccak256};
use std::fmt;
use tracing::trace;

use crate::error::{Result, TransactionError};

/// Output of a signing primitive: recovery id plus the two curve scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSignature {
    pub recovery_id: u8,
    pub r: U256,
    pub s: U256,
}

/// Signing capability injected into the encoder.
///
/// `message` is the signing preimage; implementations hash it themselves.
pub trait Signer {
    fn sign(&self, message: &[u8]) -> Result<RawSignature>;

    /// Account the signatures belong to.
    fn address(&self) -> H160;
}

impl<S: Signer + ?Sized> Signer for &S {
    fn sign(&self, message: &[u8]) -> Result<RawSignature> {
        (**self).sign(message)
    }

    fn address(&self) -> H160 {
        (**self).address()
    }
}

/// secp256k1 signer over the keccak-256 digest of the preimage.
pub struct Secp256k1Signer {
    secp: Secp256k1<All>,
    secret: SecretKey,
    address: H160,
}

impl Secp256k1Signer {
    pub fn from_slice(secret: &[u8]) -> Result<Self> {
        let secp = Secp256k1::new();
        let secret = SecretKey::from_slice(secret)
            .map_err(|e| TransactionError::malformed("privateKey", e.to_string()))?;
        let public = PublicKey::from_secret_key(&secp, &secret);
        let address = public_key_to_address(&public);

        Ok(Self {
            secp,
            secret,
            address,
        })
    }

    /// Parse a hex private key, with or without `0x`.
    pub fn from_hex(secret: &str) -> Result<Self> {
        let bytes = hex::decode(secret.trim().trim_start_matches("0x"))
            .map_err(|e| TransactionError::malformed("privateKey", e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl Signer for Secp256k1Signer {
    fn sign(&self, message: &[u8]) -> Result<RawSignature> {
        let digest = keccak256(message);
        let msg = Message::from_slice(digest.as_bytes())
            .map_err(|e| TransactionError::Signing(e.to_string()))?;

        let (recovery_id, compact) = self
            .secp
            .sign_ecdsa_recoverable(&msg, &self.secret)
            .serialize_compact();

        trace!(
            "Signed digest 0x{} as 0x{}",
            hex::encode(digest.as_bytes()),
            hex::encode(self.address.as_bytes())
        );

        Ok(RawSignature {
            recovery_id: recovery_id.to_i32() as u8,
            r: U256::from_big_endian(&compact[..32]),
            s: U256::from_big_endian(&compact[32..]),
        })
    }

    fn address(&self) -> H160 {
        self.address
    }
}

impl fmt::Debug for Secp256k1Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256k1Signer")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

pub fn keccak256(bytes: &[u8]) -> H256 {
    H256::from_slice(&Keccak256::digest(bytes))
}

/// Ethereum address of a public key: last 20 bytes of keccak(x || y).
pub fn public_key_to_address(public: &PublicKey) -> H160 {
    let uncompressed = public.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    H160::from_slice(&hash.as_bytes()[12..])
}

/// Recover the signing address from a digest and a raw-parity signature.
pub fn recover_address(digest: &H256, recovery_id: u8, r: U256, s: U256) -> Result<H160> {
    let recovery_id = RecoveryId::from_i32(recovery_id as i32)
        .map_err(|e| TransactionError::InvalidSignatureEncoding(e.to_string()))?;

    let mut compact = [0u8; 64];
    r.to_big_endian(&mut compact[..32]);
    s.to_big_endian(&mut compact[32..]);

    let signature = RecoverableSignature::from_compact(&compact, recovery_id)
        .map_err(|e| TransactionError::InvalidSignatureEncoding(e.to_string()))?;
    let message = Message::from_slice(digest.as_bytes())
        .map_err(|e| TransactionError::Signing(e.to_string()))?;

    let public = Secp256k1::verification_only()
        .recover_ecdsa(&message, &signature)
        .map_err(|e| TransactionError::InvalidSignatureEncoding(e.to_string()))?;

    Ok(public_key_to_address(&public))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GANACHE_KEY: &str = "4f3edf983ac636a65a842ce7c78d9aa706d3b113bce9c46f30d7d21715b23b1d";

    #[test]
    fn test_address_from_key() {
        let signer = Secp256k1Signer::from_hex(GANACHE_KEY).unwrap();
        assert_eq!(
            hex::encode(signer.address().as_bytes()),
            "90f8bf6a479f320ead074411a4b0e7944ea8c9c1"
        );
    }

    #[test]
    fn test_sign_and_recover() {
        let signer = Secp256k1Signer::from_hex(GANACHE_KEY).unwrap();
        let message = b"citrate";
        let signature = signer.sign(message).unwrap();
        assert!(signature.recovery_id <= 1);

        let recovered =
            recover_address(&keccak256(message), signature.recovery_id, signature.r, signature.s)
                .unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let signer = Secp256k1Signer::from_hex(GANACHE_KEY).unwrap();
        assert_eq!(signer.sign(b"abc").unwrap(), signer.sign(b"abc").unwrap());
    }

    #[test]
    fn test_invalid_key_rejected() {
        assert!(Secp256k1Signer::from_slice(&[0u8; 32]).is_err());
        assert!(Secp256k1Signer::from_hex("0xzz").is_err());
        assert!(Secp256k1Signer::from_slice(&[1u8; 31]).is_err());
    }

    #[test]
    fn test_keccak_empty() {
        assert_eq!(
            hex::encode(keccak256(&[]).as_bytes()),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let signer = Secp256k1Signer::from_hex(GANACHE_KEY).unwrap();
        let printed = format!("{:?}", signer);
        assert!(!printed.contains(GANACHE_KEY));
    }
}

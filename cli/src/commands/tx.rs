// citrate/cli/src/commands/tx.rs
//
// Preimage encoding and transaction signing from JSON requests

use anyhow::Result;
use citrate_transactions::{
    encode, encode_for_chain, keccak256, sign_transaction, sign_transaction_for_chain,
    SignedTransaction, Signer, TransactionPayload, H256,
};
use colored::Colorize;
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::request::TransactionRequest;
use crate::utils::keys;

/// Whether a payload gets EIP-155 treatment under this config.
fn uses_replay_protection(payload: &dyn TransactionPayload, config: &Config) -> bool {
    config.replay_protection && !payload.transaction_type().is_typed()
}

pub fn build_preimage(request: &TransactionRequest, config: &Config) -> Result<(Vec<u8>, H256)> {
    let payload = request.payload(config.chain_id)?;

    let preimage = if uses_replay_protection(payload.as_ref(), config) {
        encode_for_chain(payload.as_ref(), request.chain_id(config.chain_id)?)?
    } else {
        encode(payload.as_ref())?
    };
    let hash = keccak256(&preimage);

    Ok((preimage, hash))
}

pub fn sign<S: Signer + ?Sized>(
    request: &TransactionRequest,
    config: &Config,
    signer: &S,
) -> Result<SignedTransaction> {
    let payload = request.payload(config.chain_id)?;

    let signed = if uses_replay_protection(payload.as_ref(), config) {
        let chain_id = request.chain_id(config.chain_id)?;
        sign_transaction_for_chain(payload.as_ref(), chain_id, signer)?
    } else {
        sign_transaction(payload.as_ref(), signer)?
    };

    info!(
        "Signed {} transaction from 0x{}",
        signed.transaction_type(),
        hex::encode(signer.address().as_bytes())
    );
    Ok(signed)
}

pub fn execute_encode(tx: &Path, config: &Config) -> Result<()> {
    let request = TransactionRequest::from_file(tx)?;
    let (preimage, hash) = build_preimage(&request, config)?;

    println!("Preimage: {}", format!("0x{}", hex::encode(preimage)).cyan());
    println!(
        "Signing hash: {}",
        format!("0x{}", hex::encode(hash.as_bytes())).dimmed()
    );
    Ok(())
}

pub fn execute_sign(tx: &Path, key: Option<&str>, config: &Config) -> Result<()> {
    let request = TransactionRequest::from_file(tx)?;
    let signer = keys::load_signer(key, config)?;
    let signed = sign(&request, config, &signer)?;

    println!("{}", "✓ Transaction signed".green());
    println!("Type: {}", signed.transaction_type());
    println!("Raw: {}", signed.raw_hex().cyan());
    println!(
        "Hash: {}",
        format!("0x{}", hex::encode(signed.hash().as_bytes())).dimmed()
    );
    Ok(())
}

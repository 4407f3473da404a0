// citrate/cli/src/commands/authorization.rs
//
// EIP-7702 authorizations: sign one, or recover who signed one

use anyhow::{Context, Result};
use citrate_transactions::quantity::decode_address;
use citrate_transactions::{Address, Authorization, AuthorizationObject, Signer};
use colored::Colorize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::utils::keys;

pub fn sign_authorization<S: Signer + ?Sized>(
    address: &str,
    nonce: u64,
    chain_id: u64,
    signer: &S,
) -> Result<AuthorizationObject> {
    let address = decode_address("address", address)?;
    let tuple = Authorization::new(chain_id, address, nonce).sign(signer)?;
    info!(
        "Authorized delegation to 0x{} on chain {}",
        hex::encode(address.as_bytes()),
        chain_id
    );
    Ok(AuthorizationObject::from_tuple(&tuple))
}

pub fn recover_authority(object: &AuthorizationObject) -> Result<Address> {
    let tuple = object
        .to_tuple()
        .context("Failed to decode authorization")?;
    Ok(tuple.recover_authority()?)
}

pub fn execute_sign(
    address: &str,
    nonce: u64,
    key: Option<&str>,
    config: &Config,
) -> Result<()> {
    let signer = keys::load_signer(key, config)?;
    let object = sign_authorization(address, nonce, config.chain_id, &signer)?;
    println!("{}", serde_json::to_string_pretty(&object)?);
    Ok(())
}

pub fn execute_recover(json: &Path) -> Result<()> {
    let contents = fs::read_to_string(json)
        .with_context(|| format!("Failed to read authorization from {:?}", json))?;
    let object: AuthorizationObject = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse authorization from {:?}", json))?;

    let authority = recover_authority(&object)?;
    println!(
        "Authority: {}",
        format!("0x{}", hex::encode(authority.as_bytes())).cyan()
    );
    Ok(())
}

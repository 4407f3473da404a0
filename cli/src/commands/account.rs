// citrate/cli/src/commands/account.rs

use anyhow::Result;
use citrate_transactions::Signer;
use colored::Colorize;

use crate::config::Config;
use crate::utils::keys;

pub fn execute_address(key: Option<&str>, config: &Config) -> Result<()> {
    let signer = keys::load_signer(key, config)?;
    println!(
        "Address: {}",
        format!("0x{}", hex::encode(signer.address().as_bytes())).cyan()
    );
    Ok(())
}

// citrate/cli/src/utils/keys.rs
//
// Private keys come from `--key` or from the environment variable named in
// the config; they are never written to disk or logged.

use anyhow::{Context, Result};
use citrate_transactions::Secp256k1Signer;
use tracing::debug;

use crate::config::Config;

pub fn load_signer(key: Option<&str>, config: &Config) -> Result<Secp256k1Signer> {
    let secret = match key {
        Some(key) => key.to_string(),
        None => {
            debug!("Reading private key from ${}", config.key_env);
            std::env::var(&config.key_env)
                .with_context(|| format!("No --key given and ${} is not set", config.key_env))?
        }
    };

    Secp256k1Signer::from_hex(&secret).context("Invalid private key")
}

#[cfg(test)]
mod tests {
    use super::*;
    use citrate_transactions::Signer;

    const GANACHE_KEY: &str = "0x4f3edf983ac636a65a842ce7c78d9aa706d3b113bce9c46f30d7d21715b23b1d";

    #[test]
    fn test_key_flag_wins() {
        let config = Config {
            key_env: "CITRATE_TX_TEST_UNSET_KEY".to_string(),
            ..Config::default()
        };
        let signer = load_signer(Some(GANACHE_KEY), &config).unwrap();
        assert_eq!(
            hex::encode(signer.address().as_bytes()),
            "90f8bf6a479f320ead074411a4b0e7944ea8c9c1"
        );
    }

    #[test]
    fn test_key_from_environment() {
        let config = Config {
            key_env: "CITRATE_TX_TEST_ENV_KEY".to_string(),
            ..Config::default()
        };
        std::env::set_var(&config.key_env, GANACHE_KEY);
        assert!(load_signer(None, &config).is_ok());
    }

    #[test]
    fn test_missing_key() {
        let config = Config {
            key_env: "CITRATE_TX_TEST_UNSET_KEY".to_string(),
            ..Config::default()
        };
        assert!(load_signer(None, &config).is_err());
        assert!(load_signer(Some("0x1234"), &config).is_err());
    }
}

use std::path::{Path, PathBuf};

use common::Commitment;
use serde::{Deserialize, Serialize};

///What to do when some accounts of a batch fetch fail to load or decode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPolicy {
    ///Any failure rejects the whole batch, the local list stays as it was
    #[default]
    FailBatch,
    ///Failed entries are dropped and reported next to the successful ones
    SkipFailed,
}

fn default_poll_interval_millis() -> u64 {
    500
}

fn default_max_polls() -> u64 {
    60
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    ///JSON-RPC endpoint of the network
    pub rpc_addr: String,
    ///Commitment used for reads, preflight and confirmation
    #[serde(default)]
    pub commitment: Commitment,
    ///Solana CLI keypair file used as the signing wallet
    pub keypair_path: PathBuf,
    ///Descriptor of the Bank program
    pub bank_descriptor: PathBuf,
    ///Descriptor of the GuessingGame program
    pub guessing_game_descriptor: PathBuf,
    #[serde(default)]
    pub fetch_policy: FetchPolicy,
    ///Delay between signature status polls
    #[serde(default = "default_poll_interval_millis")]
    pub confirm_poll_interval_millis: u64,
    ///Polls before a sent transaction is reported unconfirmed
    #[serde(default = "default_max_polls")]
    pub confirm_max_polls: u64,
}

impl ClientConfig {
    ///Relative paths in the config are relative to the directory holding it
    pub fn resolve_paths(mut self, home: &Path) -> Self {
        for path in [
            &mut self.keypair_path,
            &mut self.bank_descriptor,
            &mut self.guessing_game_descriptor,
        ] {
            if path.is_relative() {
                *path = home.join(&*path);
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config: ClientConfig = serde_json::from_str(
            r#"{
                "rpc_addr": "http://127.0.0.1:8899",
                "keypair_path": "id.json",
                "bank_descriptor": "bank.json",
                "guessing_game_descriptor": "/abs/guessing_game.json"
            }"#,
        )
        .unwrap();

        assert_eq!(config.commitment, Commitment::Processed);
        assert_eq!(config.fetch_policy, FetchPolicy::FailBatch);
        assert_eq!(config.confirm_poll_interval_millis, 500);
        assert_eq!(config.confirm_max_polls, 60);

        let resolved = config.resolve_paths(Path::new("/home/client"));

        assert_eq!(resolved.keypair_path, PathBuf::from("/home/client/id.json"));
        assert_eq!(resolved.bank_descriptor, PathBuf::from("/home/client/bank.json"));
        assert_eq!(
            resolved.guessing_game_descriptor,
            PathBuf::from("/abs/guessing_game.json")
        );
    }

    #[test]
    fn test_shipped_debug_config_parses() {
        let config: ClientConfig =
            serde_json::from_str(include_str!("../../configs/debug/client_config.json")).unwrap();

        assert_eq!(config.fetch_policy, FetchPolicy::FailBatch);
        assert_eq!(config.rpc_addr, "http://127.0.0.1:8899");
    }

    #[test]
    fn test_skip_policy_spelling() {
        let policy: FetchPolicy = serde_json::from_str("\"skip_failed\"").unwrap();

        assert_eq!(policy, FetchPolicy::SkipFailed);
    }
}

use std::{fs::File, io::BufReader, path::PathBuf, str::FromStr};

use anyhow::{Result, anyhow};
use solana_sdk::pubkey::Pubkey;

use crate::{HOME_DIR_ENV_VAR, config::ClientConfig};

pub const CONFIG_FILE_NAME: &str = "client_config.json";

///Get home dir for client. Env var `PDA_CLIENT_HOME_DIR` must be set before execution to succeed.
pub fn get_home() -> Result<PathBuf> {
    let raw = std::env::var(HOME_DIR_ENV_VAR)
        .map_err(|_| anyhow!("{HOME_DIR_ENV_VAR} is not set"))?;

    Ok(PathBuf::from_str(&raw)?)
}

///Fetch config from `PDA_CLIENT_HOME_DIR`, relative paths resolved against it
pub fn fetch_config() -> Result<ClientConfig> {
    let config_home = get_home()?;

    fetch_config_from(config_home)
}

pub fn fetch_config_from(config_home: PathBuf) -> Result<ClientConfig> {
    let file = File::open(config_home.join(CONFIG_FILE_NAME))?;
    let reader = BufReader::new(file);

    let config: ClientConfig = serde_json::from_reader(reader)?;

    Ok(config.resolve_paths(&config_home))
}

pub fn parse_pubkey(raw: &str) -> Result<Pubkey> {
    Pubkey::from_str(raw).map_err(|err| anyhow!("Invalid account address {raw}: {err}"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_fetch_config_from_dir() {
        let home = tempfile::tempdir().unwrap();
        let mut file = File::create(home.path().join(CONFIG_FILE_NAME)).unwrap();
        file.write_all(include_bytes!("../../configs/debug/client_config.json"))
            .unwrap();

        let config = fetch_config_from(home.path().to_path_buf()).unwrap();

        assert_eq!(config.keypair_path, home.path().join("id.json"));
        assert!(config.bank_descriptor.starts_with(home.path()));
    }

    #[test]
    fn test_fetch_config_missing_file() {
        let home = tempfile::tempdir().unwrap();

        assert!(fetch_config_from(home.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_parse_pubkey() {
        let key = Pubkey::new_unique();

        assert_eq!(parse_pubkey(&key.to_string()).unwrap(), key);
        assert!(parse_pubkey("xyz").is_err());
    }
}

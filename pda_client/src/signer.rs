use std::path::Path;

use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signer, read_keypair_file},
    transaction::Transaction,
};

use crate::error::ExecutionFailureKind;

///Wallet boundary: exposes the user's key and signs on their behalf
pub trait WalletSigner {
    fn pubkey(&self) -> Pubkey;

    fn sign_transaction(
        &self,
        tx: &mut Transaction,
        recent_blockhash: Hash,
    ) -> Result<(), ExecutionFailureKind>;
}

///Wallet backed by a local keypair
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    ///Reads a Solana CLI keypair file (JSON array of 64 bytes)
    pub fn from_file(path: &Path) -> Result<Self, ExecutionFailureKind> {
        let keypair = read_keypair_file(path).map_err(|err| {
            ExecutionFailureKind::SignerError(format!("cannot read keypair {path:?}: {err}"))
        })?;

        Ok(Self::new(keypair))
    }
}

impl WalletSigner for KeypairWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    fn sign_transaction(
        &self,
        tx: &mut Transaction,
        recent_blockhash: Hash,
    ) -> Result<(), ExecutionFailureKind> {
        tx.try_sign(&[&self.keypair], recent_blockhash)
            .map_err(|err| ExecutionFailureKind::SignerError(err.to_string()))
    }
}

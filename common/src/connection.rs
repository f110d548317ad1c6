use serde::{Deserialize, Serialize};
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};

use crate::{error::RpcClientError, rpc_client::json::SignatureStatus};

///Commitment level requested from the node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    #[default]
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }

    ///Whether a status reported by the node satisfies this level
    pub fn is_reached_by(&self, status: &str) -> bool {
        let rank = |s: &str| match s {
            "processed" => 0,
            "confirmed" => 1,
            "finalized" => 2,
            _ => -1,
        };

        rank(status) >= rank(self.as_str())
    }
}

///Snapshot of an account as stored on the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAccount {
    pub address: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
    pub owner: Pubkey,
}

///Network boundary: everything the client needs from a program-execution network
pub trait Connection {
    ///Addresses of every account owned by `program`
    async fn get_program_accounts(&self, program: &Pubkey) -> Result<Vec<Pubkey>, RpcClientError>;

    async fn get_account(&self, address: &Pubkey) -> Result<Option<RawAccount>, RpcClientError>;

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, RpcClientError>;

    async fn get_latest_blockhash(&self) -> Result<Hash, RpcClientError>;

    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, RpcClientError>;

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<SignatureStatus>, RpcClientError>;
}

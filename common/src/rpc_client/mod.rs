use std::str::FromStr;

use base64::{Engine, engine::general_purpose::STANDARD};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};

use crate::{
    connection::{Commitment, Connection, RawAccount},
    error::RpcClientError,
    rpc_client::json::{
        KeyedUiAccount, LatestBlockhash, RpcContextResponse, RpcErrorResponse, RpcRequest,
        RpcResponse, SignatureStatus, UiAccount,
    },
};

pub mod json;

///JSON-RPC client for a Solana-compatible node
#[derive(Clone)]
pub struct RpcClient {
    pub client: Client,
    pub rpc_addr: String,
    pub commitment: Commitment,
}

impl RpcClient {
    pub fn new(rpc_addr: String, commitment: Commitment) -> Result<Self, RpcClientError> {
        Ok(Self {
            client: Client::builder().build()?,
            rpc_addr,
            commitment,
        })
    }

    pub async fn call_method_with_payload(
        &self,
        method: &str,
        payload: Value,
    ) -> Result<Value, RpcClientError> {
        let request = RpcRequest::from_payload_version_2_0(method.to_string(), payload);

        debug!("Calling {method} at {}", self.rpc_addr);

        let call_builder = self.client.post(&self.rpc_addr);
        let call_res = call_builder.json(&request).send().await?;

        let response_vall = call_res.json::<Value>().await?;

        if let Ok(response) = serde_json::from_value::<RpcResponse>(response_vall.clone()) {
            Ok(response.result)
        } else {
            let err_resp = serde_json::from_value::<RpcErrorResponse>(response_vall)?;

            Err(err_resp.error.into())
        }
    }

    async fn call_typed<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: Value,
    ) -> Result<T, RpcClientError> {
        let resp = self.call_method_with_payload(method, payload).await?;

        Ok(serde_json::from_value(resp)?)
    }

    fn commitment_config(&self) -> Value {
        json!({ "commitment": self.commitment.as_str() })
    }
}

pub fn parse_pubkey(raw: &str) -> Result<Pubkey, RpcClientError> {
    Pubkey::from_str(raw)
        .map_err(|err| RpcClientError::invalid_response(format!("bad pubkey {raw}: {err}")))
}

///Turn a base64-encoded node account into raw bytes
pub fn decode_ui_account(address: Pubkey, account: UiAccount) -> Result<RawAccount, RpcClientError> {
    let (payload, encoding) = account.data;
    if encoding != "base64" {
        return Err(RpcClientError::invalid_response(format!(
            "unexpected account encoding {encoding}"
        )));
    }

    Ok(RawAccount {
        address,
        lamports: account.lamports,
        data: STANDARD.decode(payload)?,
        owner: parse_pubkey(&account.owner)?,
    })
}

impl Connection for RpcClient {
    async fn get_program_accounts(&self, program: &Pubkey) -> Result<Vec<Pubkey>, RpcClientError> {
        // Only addresses are needed here, data is fetched per account afterwards
        let accounts: Vec<KeyedUiAccount> = self
            .call_typed(
                "getProgramAccounts",
                json!([
                    program.to_string(),
                    {
                        "encoding": "base64",
                        "commitment": self.commitment.as_str(),
                        "dataSlice": { "offset": 0, "length": 0 }
                    }
                ]),
            )
            .await?;

        accounts
            .iter()
            .map(|keyed| parse_pubkey(&keyed.pubkey))
            .collect()
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<RawAccount>, RpcClientError> {
        let resp: RpcContextResponse<Option<UiAccount>> = self
            .call_typed(
                "getAccountInfo",
                json!([
                    address.to_string(),
                    { "encoding": "base64", "commitment": self.commitment.as_str() }
                ]),
            )
            .await?;

        resp.value
            .map(|account| decode_ui_account(*address, account))
            .transpose()
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, RpcClientError> {
        self.call_typed(
            "getMinimumBalanceForRentExemption",
            json!([data_len, self.commitment_config()]),
        )
        .await
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, RpcClientError> {
        let resp: RpcContextResponse<LatestBlockhash> = self
            .call_typed("getLatestBlockhash", json!([self.commitment_config()]))
            .await?;

        Hash::from_str(&resp.value.blockhash).map_err(|err| {
            RpcClientError::invalid_response(format!("bad blockhash {}: {err}", resp.value.blockhash))
        })
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, RpcClientError> {
        let wire = STANDARD.encode(bincode::serialize(tx)?);

        let sig: String = self
            .call_typed(
                "sendTransaction",
                json!([
                    wire,
                    { "encoding": "base64", "preflightCommitment": self.commitment.as_str() }
                ]),
            )
            .await?;

        Signature::from_str(&sig)
            .map_err(|err| RpcClientError::invalid_response(format!("bad signature {sig}: {err}")))
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<SignatureStatus>, RpcClientError> {
        let resp: RpcContextResponse<Vec<Option<SignatureStatus>>> = self
            .call_typed(
                "getSignatureStatuses",
                json!([[signature.to_string()], { "searchTransactionHistory": false }]),
            )
            .await?;

        Ok(resp.value.into_iter().next().flatten())
    }
}

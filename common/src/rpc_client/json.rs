use serde::{Deserialize, Serialize};

use crate::error::RpcErrorBody;

//Responses

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponseContext {
    pub slot: u64,
}

///Envelope used by node methods that answer `{ context, value }`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcContextResponse<T> {
    pub context: RpcResponseContext,
    pub value: T,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UiAccount {
    pub lamports: u64,
    ///`[payload, encoding]`, always requested as base64
    pub data: (String, String),
    pub owner: String,
    pub executable: bool,
    pub rent_epoch: u64,
    #[serde(default)]
    pub space: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct KeyedUiAccount {
    pub pubkey: String,
    pub account: UiAccount,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LatestBlockhash {
    pub blockhash: String,
    pub last_valid_block_height: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    pub slot: u64,
    #[serde(default)]
    pub confirmations: Option<u64>,
    #[serde(default)]
    pub err: Option<serde_json::Value>,
    #[serde(default)]
    pub confirmation_status: Option<String>,
}

//General

#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    pub id: u64,
}

impl RpcRequest {
    pub fn from_payload_version_2_0(method: String, payload: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method,
            params: payload,
            id: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: serde_json::Value,
    pub id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorResponse {
    pub jsonrpc: String,
    pub error: RpcErrorBody,
    pub id: Option<u64>,
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(thiserror::Error, Debug)]
pub enum RpcClientError {
    #[error("HTTP error")]
    Reqwest(#[from] reqwest::Error),
    #[error("JSON error")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Base64 decode error")]
    Base64(#[from] base64::DecodeError),
    #[error("Transaction serialization error")]
    Bincode(#[from] bincode::Error),
    #[error("RPC node returned error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<RpcErrorBody> for RpcClientError {
    fn from(value: RpcErrorBody) -> Self {
        Self::Rpc {
            code: value.code,
            message: value.message,
        }
    }
}

impl RpcClientError {
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}

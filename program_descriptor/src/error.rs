use std::path::PathBuf;

use thiserror::Error;

use crate::idl_type::IdlType;

#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Failed to read descriptor at {path:?}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed descriptor: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Descriptor has no program address in metadata")]
    MissingAddress,

    #[error("Program address {0} is not a valid public key")]
    InvalidAddress(String),

    #[error("Instruction {0} is not part of the descriptor")]
    UnknownInstruction(String),

    #[error("Account type {0} is not part of the descriptor")]
    UnknownAccount(String),

    #[error("Type {0} is not defined in the descriptor")]
    UnknownType(String),

    #[error("Missing argument {arg} for instruction {instruction}")]
    MissingArgument { instruction: String, arg: String },

    #[error("Argument {arg} is not declared by instruction {instruction}")]
    UnexpectedArgument { instruction: String, arg: String },

    #[error("Value for {field} does not fit type {expected:?}")]
    TypeMismatch { field: String, expected: IdlType },

    #[error("Account data is not a {0} account")]
    DiscriminatorMismatch(String),

    #[error("Deserialization error: {0}")]
    Borsh(#[from] borsh::io::Error),
}

impl DescriptorError {
    pub fn type_mismatch(field: &str, expected: &IdlType) -> Self {
        Self::TypeMismatch {
            field: field.to_string(),
            expected: expected.clone(),
        }
    }
}

use common::RpcClientError;
use program_descriptor::DescriptorError;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

#[derive(thiserror::Error, Debug)]
pub enum ExecutionFailureKind {
    #[error("Remote call failed: {0}")]
    RpcError(#[from] RpcClientError),
    #[error("Descriptor error: {0}")]
    DescriptorError(#[from] DescriptorError),
    #[error("Wallet refused to sign: {0}")]
    SignerError(String),
    #[error("Account {0} does not exist")]
    AccountNotFound(Pubkey),
    #[error("Instruction {instruction} needs account {account} which has no known source")]
    UnresolvedAccount {
        instruction: String,
        account: String,
    },
    #[error("Computed amount {0} does not fit a u64 argument")]
    AmountOutOfRange(i128),
    #[error("Transaction {signature} failed on-chain: {reason}")]
    TransactionFailed {
        signature: Signature,
        reason: String,
    },
    #[error("Transaction {signature} not confirmed after {polls} polls")]
    ConfirmationTimeout { signature: Signature, polls: u64 },
    #[error("Fetching account {address} failed, whole batch dropped")]
    BatchFetchFailed {
        address: Pubkey,
        source: Box<ExecutionFailureKind>,
    },
}

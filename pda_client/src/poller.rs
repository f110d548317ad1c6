use std::time::Duration;

use common::{Commitment, Connection, rpc_client::json::SignatureStatus};
use log::{debug, info};
use solana_sdk::signature::Signature;

use crate::{config::ClientConfig, error::ExecutionFailureKind};

///Waits for a submitted transaction to reach the configured commitment.
///
///Only the status is polled; the transaction itself is never resent.
#[derive(Debug, Clone)]
pub struct TxPoller {
    pub polling_interval_millis: u64,
    pub polling_max_polls: u64,
    pub commitment: Commitment,
}

impl TxPoller {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            polling_interval_millis: config.confirm_poll_interval_millis,
            polling_max_polls: config.confirm_max_polls,
            commitment: config.commitment,
        }
    }

    pub async fn poll_signature<C: Connection>(
        &self,
        connection: &C,
        signature: &Signature,
    ) -> Result<SignatureStatus, ExecutionFailureKind> {
        for poll_id in 1..=self.polling_max_polls {
            debug!("Poll {poll_id} for {signature}");

            if let Some(status) = connection.get_signature_status(signature).await? {
                if let Some(err) = status.err {
                    return Err(ExecutionFailureKind::TransactionFailed {
                        signature: *signature,
                        reason: err.to_string(),
                    });
                }

                // Nodes without `confirmationStatus` only report rooted signatures
                let reached = status
                    .confirmation_status
                    .as_deref()
                    .is_none_or(|level| self.commitment.is_reached_by(level));

                if reached {
                    info!("Transaction {signature} reached {}", self.commitment.as_str());
                    return Ok(status);
                }
            }

            tokio::time::sleep(Duration::from_millis(self.polling_interval_millis)).await;
        }

        Err(ExecutionFailureKind::ConfirmationTimeout {
            signature: *signature,
            polls: self.polling_max_polls,
        })
    }
}

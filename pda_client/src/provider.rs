use common::Connection;
use log::info;
use solana_sdk::{instruction::Instruction, signature::Signature, transaction::Transaction};

use crate::{error::ExecutionFailureKind, poller::TxPoller, signer::WalletSigner};

///Binding of a network connection and a signing wallet
pub struct Provider<'a, C, W> {
    pub connection: &'a C,
    pub wallet: &'a W,
    pub poller: &'a TxPoller,
}

impl<C, W> Clone for Provider<'_, C, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, W> Copy for Provider<'_, C, W> {}

impl<'a, C: Connection, W: WalletSigner> Provider<'a, C, W> {
    pub fn new(connection: &'a C, wallet: &'a W, poller: &'a TxPoller) -> Self {
        Self {
            connection,
            wallet,
            poller,
        }
    }

    ///Sign with the wallet as fee payer, submit, and wait for confirmation
    pub async fn send_and_confirm(
        &self,
        instructions: &[Instruction],
    ) -> Result<Signature, ExecutionFailureKind> {
        let payer = self.wallet.pubkey();
        let recent_blockhash = self.connection.get_latest_blockhash().await?;

        let mut tx = Transaction::new_with_payer(instructions, Some(&payer));
        self.wallet.sign_transaction(&mut tx, recent_blockhash)?;

        let signature = self.connection.send_transaction(&tx).await?;
        info!("Sent transaction {signature}");

        self.poller
            .poll_signature(self.connection, &signature)
            .await?;

        Ok(signature)
    }
}

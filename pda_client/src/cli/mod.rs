use anyhow::Result;
use common::Connection;

use crate::{SubcommandReturnValue, session::Session, signer::WalletSigner};

pub mod bank;
pub mod guessing_game;
pub mod shell;

pub trait ClientSubcommand {
    async fn handle_subcommand<C: Connection, W: WalletSigner>(
        self,
        session: &mut Session<'_, C, W>,
    ) -> Result<SubcommandReturnValue>;
}

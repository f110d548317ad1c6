use anyhow::Result;
use clap::{Parser, Subcommand};
use common::Connection;
use log::{error, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    SubcommandReturnValue,
    cli::{ClientSubcommand, bank::BankSubcommand, guessing_game::GuessingGameSubcommand},
    render::render_accounts,
    session::Session,
    signer::WalletSigner,
};

///One line typed into the interactive shell
#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub action: ShellAction,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    ///Bank program actions
    #[command(subcommand)]
    Bank(BankSubcommand),
    ///GuessingGame program actions
    #[command(subcommand)]
    Game(GuessingGameSubcommand),
    ///Show the last fetched lists
    Show {},
    ///Leave the shell
    Exit {},
}

///Run actions from `input` until it ends or `exit` is read. Returns the actions handled.
///
///The session and its lists live for the whole loop.
pub async fn run_shell<R, C, W>(session: &mut Session<'_, C, W>, input: R) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    C: Connection,
    W: WalletSigner,
{
    let mut lines = input.lines();
    let mut handled = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parsed = match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        let res = match parsed.action {
            ShellAction::Bank(cmd) => cmd.handle_subcommand(session).await,
            ShellAction::Game(cmd) => cmd.handle_subcommand(session).await,
            ShellAction::Show {} => {
                print!("{}", render_accounts("banks", &session.banks));
                print!("{}", render_accounts("pots", &session.pots));
                Ok(SubcommandReturnValue::Empty)
            }
            ShellAction::Exit {} => break,
        };

        match res {
            Ok(value) => info!("{line} -> {value:?}"),
            Err(err) => error!("{line} rejected: {err}"),
        }

        handled += 1;
    }

    Ok(handled)
}

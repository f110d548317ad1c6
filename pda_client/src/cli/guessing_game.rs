use anyhow::Result;
use clap::Subcommand;
use common::Connection;

use crate::{
    SubcommandReturnValue,
    cli::ClientSubcommand,
    helperfunctions::parse_pubkey,
    render::{render_accounts, render_accounts_json},
    session::Session,
    signer::WalletSigner,
};

///Represents CLI subcommand for the GuessingGame program
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum GuessingGameSubcommand {
    ///Create the caller's pot
    Create {},
    ///Fetch every pot and show it
    List {
        #[arg(long)]
        json: bool,
    },
    ///Deposit into `account` to play
    Deposit {
        #[arg(short, long)]
        account: String,
    },
    ///Roll the dice against `account`
    Guess {
        #[arg(short, long)]
        account: String,
    },
}

impl ClientSubcommand for GuessingGameSubcommand {
    async fn handle_subcommand<C: Connection, W: WalletSigner>(
        self,
        session: &mut Session<'_, C, W>,
    ) -> Result<SubcommandReturnValue> {
        let res = match self {
            GuessingGameSubcommand::Create {} => session.create_pot().await.map(|address| {
                println!("Created pot {address}");
                SubcommandReturnValue::Created { address }
            }),
            GuessingGameSubcommand::List { json } => match session.get_pot().await {
                Some(count) => {
                    if json {
                        println!("{}", render_accounts_json(&session.pots)?);
                    } else {
                        print!("{}", render_accounts("pots", &session.pots));
                    }
                    Some(SubcommandReturnValue::Fetched { count })
                }
                None => None,
            },
            GuessingGameSubcommand::Deposit { account } => {
                let pot = parse_pubkey(&account)?;

                session.deposit_pot(pot).await.map(|signature| {
                    println!("Entered the game in {signature}");
                    SubcommandReturnValue::Sent { signature }
                })
            }
            GuessingGameSubcommand::Guess { account } => {
                let pot = parse_pubkey(&account)?;

                session.win_or_lose(pot).await.map(|outcome| {
                    println!("Rolled {}, guess sent in {}", outcome.rolled, outcome.signature);
                    SubcommandReturnValue::Guessed {
                        rolled: outcome.rolled,
                        sent: outcome.sent,
                    }
                })
            }
        };

        Ok(res.unwrap_or(SubcommandReturnValue::Failed))
    }
}

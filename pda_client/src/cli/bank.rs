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

///Represents CLI subcommand for the Bank program
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BankSubcommand {
    ///Create the caller's bank account
    Create {},
    ///Fetch every bank account and show it
    List {
        ///Print as JSON instead of one line per account
        #[arg(long)]
        json: bool,
    },
    ///Deposit 0.1 into `account`
    Deposit {
        ///account - base58 address of the bank account
        #[arg(short, long)]
        account: String,
    },
    ///Withdraw the spendable balance of `account`
    Withdraw {
        ///account - base58 address of the bank account
        #[arg(short, long)]
        account: String,
    },
}

impl ClientSubcommand for BankSubcommand {
    async fn handle_subcommand<C: Connection, W: WalletSigner>(
        self,
        session: &mut Session<'_, C, W>,
    ) -> Result<SubcommandReturnValue> {
        let res = match self {
            BankSubcommand::Create {} => session.create_bank().await.map(|address| {
                println!("Created bank {address}");
                SubcommandReturnValue::Created { address }
            }),
            BankSubcommand::List { json } => match session.get_banks().await {
                Some(count) => {
                    if json {
                        println!("{}", render_accounts_json(&session.banks)?);
                    } else {
                        print!("{}", render_accounts("banks", &session.banks));
                    }
                    Some(SubcommandReturnValue::Fetched { count })
                }
                None => None,
            },
            BankSubcommand::Deposit { account } => {
                let bank = parse_pubkey(&account)?;

                session.deposit_bank(bank).await.map(|signature| {
                    println!("Deposit sent in {signature}");
                    SubcommandReturnValue::Sent { signature }
                })
            }
            BankSubcommand::Withdraw { account } => {
                let bank = parse_pubkey(&account)?;

                session.withdraw_bank(bank).await.map(|withdrawal| {
                    println!(
                        "Withdrew {} in {}",
                        withdrawal.amount, withdrawal.signature
                    );
                    SubcommandReturnValue::Withdrew {
                        amount: withdrawal.amount,
                    }
                })
            }
        };

        Ok(res.unwrap_or(SubcommandReturnValue::Failed))
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use common::rpc_client::RpcClient;
use log::info;
use program_descriptor::{ProgramDescriptor, derive_address};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use crate::{
    cli::{
        ClientSubcommand, bank::BankSubcommand, guessing_game::GuessingGameSubcommand,
        shell::run_shell,
    },
    config::ClientConfig,
    helperfunctions::{fetch_config, parse_pubkey},
    poller::TxPoller,
    program_client::ProgramProfile,
    program_facades::{
        Bank, GuessingGame, bank::BANK_PROFILE, guessing_game::GUESSING_GAME_PROFILE,
    },
    provider::Provider,
    session::Session,
    signer::{KeypairWallet, WalletSigner},
};

pub const HOME_DIR_ENV_VAR: &str = "PDA_CLIENT_HOME_DIR";

pub mod cli;
pub mod config;
pub mod error;
pub mod helperfunctions;
pub mod poller;
pub mod program_client;
pub mod program_facades;
pub mod provider;
pub mod render;
pub mod session;
pub mod signer;

#[cfg(test)]
mod tests;

///Everything loaded once at start: network client, wallet, descriptors
pub struct ClientCore {
    pub config: ClientConfig,
    pub rpc_client: RpcClient,
    pub wallet: KeypairWallet,
    pub poller: TxPoller,
    pub bank_descriptor: ProgramDescriptor,
    pub guessing_game_descriptor: ProgramDescriptor,
}

impl ClientCore {
    pub fn start_from_config(config: ClientConfig) -> Result<Self> {
        let rpc_client = RpcClient::new(config.rpc_addr.clone(), config.commitment)?;
        let wallet = KeypairWallet::from_file(&config.keypair_path)?;
        let poller = TxPoller::new(&config);

        let bank_descriptor = ProgramDescriptor::from_file(&config.bank_descriptor)?;
        let guessing_game_descriptor =
            ProgramDescriptor::from_file(&config.guessing_game_descriptor)?;

        info!(
            "Using wallet {} against {}",
            wallet.pubkey(),
            config.rpc_addr
        );

        Ok(Self {
            config,
            rpc_client,
            wallet,
            poller,
            bank_descriptor,
            guessing_game_descriptor,
        })
    }

    pub fn provider(&self) -> Provider<'_, RpcClient, KeypairWallet> {
        Provider::new(&self.rpc_client, &self.wallet, &self.poller)
    }

    pub fn session(&self) -> Result<Session<'_, RpcClient, KeypairWallet>> {
        let bank = Bank::new(self.provider(), &self.bank_descriptor)?;
        let game = GuessingGame::new(self.provider(), &self.guessing_game_descriptor)?;

        Ok(Session::new(bank, game, self.config.fetch_policy))
    }

    fn descriptor_for(&self, program: ProgramKind) -> (&ProgramDescriptor, ProgramProfile) {
        match program {
            ProgramKind::Bank => (&self.bank_descriptor, BANK_PROFILE),
            ProgramKind::Game => (&self.guessing_game_descriptor, GUESSING_GAME_PROFILE),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramKind {
    Bank,
    Game,
}

///Represents CLI command for the client
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
#[clap(about)]
pub enum Command {
    ///Bank program actions
    #[command(subcommand)]
    Bank(BankSubcommand),
    ///GuessingGame program actions
    #[command(subcommand)]
    Game(GuessingGameSubcommand),
    ///Print the PDA `owner` (default: own wallet) gets in `program`
    Address {
        #[arg(long, value_enum)]
        program: ProgramKind,
        ///owner - base58 public key
        #[arg(long)]
        owner: Option<String>,
    },
    ///Read actions line by line from stdin, keeping fetched lists between them
    Shell {},
}

///To execute commands, env var PDA_CLIENT_HOME_DIR must be set into directory with config
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Args {
    /// Client command
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubcommandReturnValue {
    Empty,
    Created { address: Pubkey },
    Fetched { count: usize },
    Sent { signature: Signature },
    Withdrew { amount: u64 },
    Guessed { rolled: u64, sent: u64 },
    ///The remote call failed and was logged
    Failed,
}

pub async fn execute_subcommand(command: Command) -> Result<SubcommandReturnValue> {
    let client_config = fetch_config()?;
    let client_core = ClientCore::start_from_config(client_config)?;
    let mut session = client_core.session()?;

    let subcommand_ret = match command {
        Command::Bank(bank_subcommand) => bank_subcommand.handle_subcommand(&mut session).await?,
        Command::Game(game_subcommand) => game_subcommand.handle_subcommand(&mut session).await?,
        Command::Address { program, owner } => {
            let owner = match owner {
                Some(owner) => parse_pubkey(&owner)?,
                None => client_core.wallet.pubkey(),
            };
            let (descriptor, profile) = client_core.descriptor_for(program);
            let (address, bump) = derive_address(profile.seed, &owner, &descriptor.program_id()?);

            println!("{address} (bump {bump})");

            SubcommandReturnValue::Created { address }
        }
        Command::Shell {} => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let handled = run_shell(&mut session, stdin).await?;

            info!("Shell handled {handled} actions");

            SubcommandReturnValue::Empty
        }
    };

    Ok(subcommand_ret)
}

use common::Connection;
use log::{error, info};
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{
    config::FetchPolicy,
    program_client::AccountSnapshot,
    program_facades::{
        Bank, GuessingGame,
        bank::Withdrawal,
        guessing_game::GuessOutcome,
    },
    signer::WalletSigner,
};

///Fetched snapshots in the order the network returned them; only ever replaced whole
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AccountList {
    snapshots: Vec<AccountSnapshot>,
}

impl AccountList {
    pub fn replace_all(&mut self, snapshots: Vec<AccountSnapshot>) {
        self.snapshots = snapshots;
    }

    pub fn snapshots(&self) -> &[AccountSnapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn find(&self, address: &Pubkey) -> Option<&AccountSnapshot> {
        self.snapshots.iter().find(|snap| &snap.address == address)
    }
}

///UI-facing state: both program clients plus the locally cached account lists.
///
///Every action catches its own failure, logs it and returns `None`; the lists
///change only when a fetch fully succeeds under the configured policy.
pub struct Session<'a, C, W> {
    pub bank: Bank<'a, C, W>,
    pub game: GuessingGame<'a, C, W>,
    pub fetch_policy: FetchPolicy,
    pub banks: AccountList,
    pub pots: AccountList,
}

impl<'a, C: Connection, W: WalletSigner> Session<'a, C, W> {
    pub fn new(bank: Bank<'a, C, W>, game: GuessingGame<'a, C, W>, fetch_policy: FetchPolicy) -> Self {
        Self {
            bank,
            game,
            fetch_policy,
            banks: AccountList::default(),
            pots: AccountList::default(),
        }
    }

    pub async fn create_bank(&self) -> Option<Pubkey> {
        match self.bank.create_bank().await {
            Ok((bank, _)) => Some(bank),
            Err(err) => {
                error!("Error while creating the bank {err}");
                None
            }
        }
    }

    pub async fn get_banks(&mut self) -> Option<usize> {
        match self.bank.get_banks(self.fetch_policy).await {
            Ok(outcome) => {
                info!("Banks {:?}", outcome.accounts);
                self.banks.replace_all(outcome.accounts);
                Some(self.banks.len())
            }
            Err(err) => {
                error!("Error while getting banks {err}");
                None
            }
        }
    }

    pub async fn deposit_bank(&self, bank: Pubkey) -> Option<Signature> {
        match self.bank.deposit_bank(bank).await {
            Ok(signature) => Some(signature),
            Err(err) => {
                error!("Error depositing to bank {err}");
                None
            }
        }
    }

    pub async fn withdraw_bank(&self, bank: Pubkey) -> Option<Withdrawal> {
        match self.bank.withdraw_bank(bank).await {
            Ok(withdrawal) => Some(withdrawal),
            Err(err) => {
                error!("Error withdrawing from bank {err}");
                None
            }
        }
    }

    pub async fn create_pot(&self) -> Option<Pubkey> {
        match self.game.create_pot().await {
            Ok((pot, _)) => Some(pot),
            Err(err) => {
                error!("Error while creating the jackpot {err}");
                None
            }
        }
    }

    pub async fn get_pot(&mut self) -> Option<usize> {
        match self.game.get_pot(self.fetch_policy).await {
            Ok(outcome) => {
                info!("Pots {:?}", outcome.accounts);
                self.pots.replace_all(outcome.accounts);
                Some(self.pots.len())
            }
            Err(err) => {
                error!("Error while getting JackPot {err}");
                None
            }
        }
    }

    pub async fn deposit_pot(&self, pot: Pubkey) -> Option<Signature> {
        match self.game.deposit_pot(pot).await {
            Ok(signature) => Some(signature),
            Err(err) => {
                error!("Error depositing to play {err}");
                None
            }
        }
    }

    pub async fn win_or_lose(&self, pot: Pubkey) -> Option<GuessOutcome> {
        match self.game.win_or_lose(pot).await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                error!("Error guessing {err}");
                None
            }
        }
    }
}

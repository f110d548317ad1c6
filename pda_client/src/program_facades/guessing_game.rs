use std::ops::RangeInclusive;

use common::Connection;
use log::{debug, info};
use program_descriptor::{ProgramDescriptor, Value};
use rand::Rng;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{
    config::FetchPolicy,
    error::ExecutionFailureKind,
    program_client::{FetchOutcome, ProgramClient, ProgramProfile},
    provider::Provider,
    signer::WalletSigner,
};

pub const GUESSING_GAME_PROFILE: ProgramProfile = ProgramProfile {
    seed: "jackpot",
    account_type: "Pot",
    pda_account: "pot",
    // the deployed client passes the pot as `bank` to `guess`
    pda_aliases: &["bank"],
    display_name: "JackPot",
};

pub const GUESS_RANGE: RangeInclusive<u64> = 1..=100;

///Value placed in the `amount` field of `guess`
pub const SENT_GUESS_AMOUNT: u64 = 0;

pub fn roll_guess<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen_range(GUESS_RANGE)
}

///Result of a guess: the locally rolled number and what was actually transmitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub rolled: u64,
    pub sent: u64,
    pub signature: Signature,
}

pub struct GuessingGame<'a, C, W>(pub ProgramClient<'a, C, W>);

impl<'a, C: Connection, W: WalletSigner> GuessingGame<'a, C, W> {
    pub fn new(
        provider: Provider<'a, C, W>,
        descriptor: &'a ProgramDescriptor,
    ) -> Result<Self, ExecutionFailureKind> {
        Ok(Self(ProgramClient::new(
            provider,
            descriptor,
            GUESSING_GAME_PROFILE,
        )?))
    }

    pub async fn create_pot(&self) -> Result<(Pubkey, Signature), ExecutionFailureKind> {
        let (pot, signature) = self.0.create().await?;

        info!("Wow, new jackpot was created {pot}");

        Ok((pot, signature))
    }

    pub async fn get_pot(&self, policy: FetchPolicy) -> Result<FetchOutcome, ExecutionFailureKind> {
        self.0.fetch_all(policy).await
    }

    ///Enter the game; the entry amount is decided on-chain
    pub async fn deposit_pot(&self, pot: Pubkey) -> Result<Signature, ExecutionFailureKind> {
        let signature = self.0.invoke("deposit", pot, &[]).await?;

        info!("Entered game at {pot}");

        Ok(signature)
    }

    pub async fn win_or_lose(&self, pot: Pubkey) -> Result<GuessOutcome, ExecutionFailureKind> {
        let rolled = roll_guess(&mut rand::thread_rng());

        self.submit_guess(pot, rolled).await
    }

    ///Rolled number is logged but `amount` goes out as [`SENT_GUESS_AMOUNT`]
    pub async fn submit_guess(
        &self,
        pot: Pubkey,
        rolled: u64,
    ) -> Result<GuessOutcome, ExecutionFailureKind> {
        let raw = self
            .0
            .provider
            .connection
            .get_account(&pot)
            .await?
            .ok_or(ExecutionFailureKind::AccountNotFound(pot))?;

        debug!("Rolled {rolled} against pot {pot} holding {} bytes", raw.data.len());

        let signature = self
            .0
            .invoke("guess", pot, &[("amount", Value::from(SENT_GUESS_AMOUNT))])
            .await?;

        info!("Guess submitted to {pot}");

        Ok(GuessOutcome {
            rolled,
            sent: SENT_GUESS_AMOUNT,
            signature,
        })
    }
}

use common::Connection;
use log::info;
use program_descriptor::{ProgramDescriptor, Value};
use solana_sdk::{native_token::LAMPORTS_PER_SOL, pubkey::Pubkey, signature::Signature};

use crate::{
    config::FetchPolicy,
    error::ExecutionFailureKind,
    program_client::{FetchOutcome, ProgramClient, ProgramProfile},
    provider::Provider,
    signer::WalletSigner,
};

pub const BANK_PROFILE: ProgramProfile = ProgramProfile {
    seed: "bankaccount",
    account_type: "Bank",
    pda_account: "bank",
    pda_aliases: &[],
    display_name: "WsoS Bank",
};

///Fixed deposit: 0.1 of the base currency unit
pub const DEPOSIT_LAMPORTS: u64 = LAMPORTS_PER_SOL / 10;

///Amount `withdraw_bank` requests: account byte length minus the rent-exempt minimum for that length.
///
///Byte length stands in for the lamport balance here. Kept as the deployed client behaves.
pub fn spendable_balance(data_len: usize, rent_exempt_minimum: u64) -> i128 {
    data_len as i128 - rent_exempt_minimum as i128
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    pub amount: u64,
    pub signature: Signature,
}

pub struct Bank<'a, C, W>(pub ProgramClient<'a, C, W>);

impl<'a, C: Connection, W: WalletSigner> Bank<'a, C, W> {
    pub fn new(
        provider: Provider<'a, C, W>,
        descriptor: &'a ProgramDescriptor,
    ) -> Result<Self, ExecutionFailureKind> {
        Ok(Self(ProgramClient::new(provider, descriptor, BANK_PROFILE)?))
    }

    pub async fn create_bank(&self) -> Result<(Pubkey, Signature), ExecutionFailureKind> {
        let (bank, signature) = self.0.create().await?;

        info!("Wow, new bank was created {bank}");

        Ok((bank, signature))
    }

    pub async fn get_banks(&self, policy: FetchPolicy) -> Result<FetchOutcome, ExecutionFailureKind> {
        self.0.fetch_all(policy).await
    }

    pub async fn deposit_bank(&self, bank: Pubkey) -> Result<Signature, ExecutionFailureKind> {
        let signature = self
            .0
            .invoke("deposit", bank, &[("amount", Value::from(DEPOSIT_LAMPORTS))])
            .await?;

        info!("Deposited {DEPOSIT_LAMPORTS} lamports into {bank}");

        Ok(signature)
    }

    pub async fn withdraw_bank(&self, bank: Pubkey) -> Result<Withdrawal, ExecutionFailureKind> {
        let connection = self.0.provider.connection;

        let raw = connection
            .get_account(&bank)
            .await?
            .ok_or(ExecutionFailureKind::AccountNotFound(bank))?;
        let rent = connection
            .get_minimum_balance_for_rent_exemption(raw.data.len())
            .await?;

        let spendable = spendable_balance(raw.data.len(), rent);
        let amount =
            u64::try_from(spendable).map_err(|_| ExecutionFailureKind::AmountOutOfRange(spendable))?;

        let signature = self
            .0
            .invoke("withdraw", bank, &[("amount", Value::from(amount))])
            .await?;

        info!("Withdrew {amount} from {bank}");

        Ok(Withdrawal { amount, signature })
    }
}

use common::Connection;
use futures::future::join_all;
use log::{info, warn};
use program_descriptor::{DecodedAccount, ProgramDescriptor, Value, derive_address};
use serde::Serialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::Signature,
    system_program,
};

use crate::{
    config::FetchPolicy, error::ExecutionFailureKind, provider::Provider, signer::WalletSigner,
};

pub const USER_ACCOUNT: &str = "user";
pub const SYSTEM_PROGRAM_ACCOUNT: &str = "systemProgram";

///What distinguishes one PDA-backed program from another on the client side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramProfile {
    ///Seed prefix of the per-user PDA
    pub seed: &'static str,
    ///Account type name in the descriptor
    pub account_type: &'static str,
    ///Instruction account name the PDA is passed as
    pub pda_account: &'static str,
    ///Other instruction account names that also mean the PDA
    pub pda_aliases: &'static [&'static str],
    ///Name given to accounts created by this client
    pub display_name: &'static str,
}

impl ProgramProfile {
    fn is_pda_account(&self, name: &str) -> bool {
        self.pda_account == name || self.pda_aliases.contains(&name)
    }
}

///Decoded program account plus the address it lives at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub address: Pubkey,
    pub name: String,
    pub balance: u64,
    pub account: DecodedAccount,
}

impl AccountSnapshot {
    pub fn new(address: Pubkey, account: DecodedAccount) -> Self {
        let name = account
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let balance = account
            .get("balance")
            .and_then(Value::as_u64)
            .unwrap_or_default();

        Self {
            address,
            name,
            balance,
            account,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccountSnapshotView {
    pub address: String,
    pub name: String,
    pub balance: u64,
}

impl From<&AccountSnapshot> for AccountSnapshotView {
    fn from(value: &AccountSnapshot) -> Self {
        Self {
            address: value.address.to_string(),
            name: value.name.clone(),
            balance: value.balance,
        }
    }
}

#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub accounts: Vec<AccountSnapshot>,
    ///Accounts dropped under [`FetchPolicy::SkipFailed`], with the reason
    pub failed: Vec<(Pubkey, String)>,
}

///Generic client for a program described by a [`ProgramDescriptor`]
pub struct ProgramClient<'a, C, W> {
    pub provider: Provider<'a, C, W>,
    pub descriptor: &'a ProgramDescriptor,
    pub program_id: Pubkey,
    pub profile: ProgramProfile,
}

impl<'a, C: Connection, W: WalletSigner> ProgramClient<'a, C, W> {
    pub fn new(
        provider: Provider<'a, C, W>,
        descriptor: &'a ProgramDescriptor,
        profile: ProgramProfile,
    ) -> Result<Self, ExecutionFailureKind> {
        Ok(Self {
            provider,
            descriptor,
            program_id: descriptor.program_id()?,
            profile,
        })
    }

    pub fn derive_address(&self, owner: &Pubkey) -> Pubkey {
        derive_address(self.profile.seed, owner, &self.program_id).0
    }

    ///Create the caller's PDA under its display name
    pub async fn create(&self) -> Result<(Pubkey, Signature), ExecutionFailureKind> {
        let owner = self.provider.wallet.pubkey();
        let pda = self.derive_address(&owner);

        let signature = self
            .invoke(
                "create",
                pda,
                &[("name", Value::from(self.profile.display_name))],
            )
            .await?;

        Ok((pda, signature))
    }

    pub fn build_instruction(
        &self,
        name: &str,
        target: Pubkey,
        args: &[(&str, Value)],
    ) -> Result<Instruction, ExecutionFailureKind> {
        let def = self.descriptor.instruction(name)?;

        let accounts = def
            .accounts
            .iter()
            .map(|item| {
                let pubkey = self.resolve_account(name, &item.name, target)?;

                Ok(if item.is_mut {
                    AccountMeta::new(pubkey, item.is_signer)
                } else {
                    AccountMeta::new_readonly(pubkey, item.is_signer)
                })
            })
            .collect::<Result<Vec<_>, ExecutionFailureKind>>()?;

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data: self.descriptor.encode_instruction(name, args)?,
        })
    }

    pub async fn invoke(
        &self,
        name: &str,
        target: Pubkey,
        args: &[(&str, Value)],
    ) -> Result<Signature, ExecutionFailureKind> {
        let ix = self.build_instruction(name, target, args)?;

        self.provider.send_and_confirm(&[ix]).await
    }

    fn resolve_account(
        &self,
        instruction: &str,
        account: &str,
        target: Pubkey,
    ) -> Result<Pubkey, ExecutionFailureKind> {
        match account {
            USER_ACCOUNT => Ok(self.provider.wallet.pubkey()),
            SYSTEM_PROGRAM_ACCOUNT => Ok(system_program::id()),
            name if self.profile.is_pda_account(name) => Ok(target),
            _ => Err(ExecutionFailureKind::UnresolvedAccount {
                instruction: instruction.to_string(),
                account: account.to_string(),
            }),
        }
    }

    ///Fetch and decode one program account
    pub async fn fetch(&self, address: Pubkey) -> Result<AccountSnapshot, ExecutionFailureKind> {
        let raw = self
            .provider
            .connection
            .get_account(&address)
            .await?
            .ok_or(ExecutionFailureKind::AccountNotFound(address))?;

        let decoded = self
            .descriptor
            .decode_account(self.profile.account_type, &raw.data)?;

        Ok(AccountSnapshot::new(address, decoded))
    }

    ///List every program-owned account, then fetch all of them concurrently and join
    pub async fn fetch_all(
        &self,
        policy: FetchPolicy,
    ) -> Result<FetchOutcome, ExecutionFailureKind> {
        let addresses = self
            .provider
            .connection
            .get_program_accounts(&self.program_id)
            .await?;

        let results = join_all(addresses.iter().map(|address| self.fetch(*address))).await;

        let mut outcome = FetchOutcome::default();
        for (address, res) in addresses.into_iter().zip(results) {
            match (res, policy) {
                (Ok(snapshot), _) => outcome.accounts.push(snapshot),
                (Err(err), FetchPolicy::FailBatch) => {
                    return Err(ExecutionFailureKind::BatchFetchFailed {
                        address,
                        source: Box::new(err),
                    });
                }
                (Err(err), FetchPolicy::SkipFailed) => {
                    warn!("Skipping account {address}: {err}");
                    outcome.failed.push((address, err.to_string()));
                }
            }
        }

        info!(
            "Fetched {} {} accounts, {} skipped",
            outcome.accounts.len(),
            self.profile.account_type,
            outcome.failed.len()
        );

        Ok(outcome)
    }
}

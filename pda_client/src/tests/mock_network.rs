use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Mutex,
};

use common::{Connection, RawAccount, RpcClientError, rpc_client::json::SignatureStatus};
use program_descriptor::{ProgramDescriptor, Value, derive_address, instruction_discriminator};
use solana_sdk::{
    hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction,
};

use crate::{
    program_client::ProgramProfile,
    program_facades::{bank::BANK_PROFILE, guessing_game::GUESSING_GAME_PROFILE},
};

///Fixed space the programs allocate for every PDA
pub const ACCOUNT_SPACE: usize = 84;

///Lamports the game program takes per entry
pub const GAME_ENTRY_LAMPORTS: u64 = 1_000_000;

pub fn bank_descriptor() -> ProgramDescriptor {
    ProgramDescriptor::from_json(include_str!("../../../descriptors/bank.json")).unwrap()
}

pub fn game_descriptor() -> ProgramDescriptor {
    ProgramDescriptor::from_json(include_str!("../../../descriptors/guessing_game.json")).unwrap()
}

///Instruction the mock executed, as the program saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executed {
    pub program: Pubkey,
    pub instruction: &'static str,
    pub target: Pubkey,
    pub signer: Pubkey,
    pub amount: Option<u64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
struct PdaState {
    program: Pubkey,
    name: String,
    balance: u64,
    owner: Pubkey,
}

#[derive(Default)]
struct MockState {
    pdas: BTreeMap<Pubkey, PdaState>,
    raw_accounts: BTreeMap<Pubkey, RawAccount>,
    statuses: HashMap<Signature, SignatureStatus>,
    sent: Vec<Transaction>,
    executed: Vec<Executed>,
    failing_fetch: HashSet<Pubkey>,
    rent_override: Option<u64>,
    fail_sends: bool,
    fail_on_chain: bool,
    drop_statuses: bool,
    slot: u64,
}

///In-memory network running both programs' instruction handlers.
///
///Mirrors what the client observes over RPC: account bytes, rent minimum,
///signature statuses. Failure switches make each remote call fail on demand.
pub struct MockNetwork {
    pub bank: ProgramDescriptor,
    pub game: ProgramDescriptor,
    pub bank_id: Pubkey,
    pub game_id: Pubkey,
    state: Mutex<MockState>,
}

impl MockNetwork {
    pub fn new() -> Self {
        let bank = bank_descriptor();
        let game = game_descriptor();
        let bank_id = bank.program_id().unwrap();
        let game_id = game.program_id().unwrap();

        Self {
            bank,
            game,
            bank_id,
            game_id,
            state: Mutex::new(MockState::default()),
        }
    }

    pub fn set_rent_override(&self, rent: u64) {
        self.state.lock().unwrap().rent_override = Some(rent);
    }

    pub fn set_fail_sends(&self, fail: bool) {
        self.state.lock().unwrap().fail_sends = fail;
    }

    pub fn set_fail_on_chain(&self, fail: bool) {
        self.state.lock().unwrap().fail_on_chain = fail;
    }

    ///Accept transactions but never report a status for them
    pub fn set_drop_statuses(&self, drop: bool) {
        self.state.lock().unwrap().drop_statuses = drop;
    }

    pub fn fail_fetch_of(&self, address: Pubkey) {
        self.state.lock().unwrap().failing_fetch.insert(address);
    }

    ///Program-owned account whose bytes do not decode as the program's account type
    pub fn insert_garbage_account(&self, program: Pubkey) -> Pubkey {
        let address = Pubkey::new_unique();
        self.state.lock().unwrap().raw_accounts.insert(
            address,
            RawAccount {
                address,
                lamports: 1,
                data: vec![0xAB; ACCOUNT_SPACE],
                owner: program,
            },
        );

        address
    }

    pub fn sent(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn executed(&self) -> Vec<Executed> {
        self.state.lock().unwrap().executed.clone()
    }

    pub fn balance_of(&self, address: &Pubkey) -> Option<u64> {
        self.state
            .lock()
            .unwrap()
            .pdas
            .get(address)
            .map(|pda| pda.balance)
    }

    fn descriptor_of(&self, program: &Pubkey) -> Option<(&ProgramDescriptor, ProgramProfile)> {
        if *program == self.bank_id {
            Some((&self.bank, BANK_PROFILE))
        } else if *program == self.game_id {
            Some((&self.game, GUESSING_GAME_PROFILE))
        } else {
            None
        }
    }

    fn encode_pda(&self, pda: &PdaState) -> Vec<u8> {
        let (descriptor, profile) = self.descriptor_of(&pda.program).unwrap();
        let mut data = descriptor
            .encode_account(
                profile.account_type,
                &[
                    ("name", Value::from(pda.name.as_str())),
                    ("balance", Value::from(pda.balance)),
                    ("owner", Value::from(pda.owner)),
                ],
            )
            .unwrap();
        data.resize(ACCOUNT_SPACE, 0);

        data
    }

    ///Run every instruction of `tx` against a copy of the state; commit only if all succeed
    fn execute(&self, state: &mut MockState, tx: &Transaction) -> Result<(), String> {
        let mut pdas = state.pdas.clone();
        let mut executed = vec![];
        let message = &tx.message;

        for ix in &message.instructions {
            let program = message.account_keys[ix.program_id_index as usize];
            let accounts: Vec<Pubkey> = ix
                .accounts
                .iter()
                .map(|idx| message.account_keys[*idx as usize])
                .collect();
            let (_, profile) = self
                .descriptor_of(&program)
                .ok_or_else(|| format!("unknown program {program}"))?;

            let (target, signer) = match accounts.as_slice() {
                [target, signer, ..] => (*target, *signer),
                _ => return Err("missing accounts".to_string()),
            };
            let (expected, _) = derive_address(profile.seed, &signer, &program);
            if target != expected {
                return Err(format!("seeds constraint violated for {target}"));
            }

            let (disc, args) = ix.data.split_at(8);
            let is_game = program == self.game_id;
            let mut record = Executed {
                program,
                instruction: "",
                target,
                signer,
                amount: None,
                name: None,
            };

            if disc == instruction_discriminator("create") {
                let name: String = borsh::from_slice(args).map_err(|err| err.to_string())?;
                if pdas.contains_key(&target) {
                    return Err(format!("account {target} already in use"));
                }
                pdas.insert(
                    target,
                    PdaState {
                        program,
                        name: name.clone(),
                        balance: 0,
                        owner: signer,
                    },
                );
                record.instruction = "create";
                record.name = Some(name);
            } else if disc == instruction_discriminator("deposit") {
                let pda = pdas.get_mut(&target).ok_or("account not initialized")?;
                let amount = if is_game {
                    if !args.is_empty() {
                        return Err("game deposit takes no arguments".to_string());
                    }
                    GAME_ENTRY_LAMPORTS
                } else {
                    borsh::from_slice::<u64>(args).map_err(|err| err.to_string())?
                };
                pda.balance += amount;
                record.instruction = "deposit";
                record.amount = Some(amount);
            } else if !is_game && disc == instruction_discriminator("withdraw") {
                let amount: u64 = borsh::from_slice(args).map_err(|err| err.to_string())?;
                let pda = pdas.get_mut(&target).ok_or("account not initialized")?;
                if pda.owner != signer {
                    return Err("only the owner may withdraw".to_string());
                }
                pda.balance = pda.balance.saturating_sub(amount);
                record.instruction = "withdraw";
                record.amount = Some(amount);
            } else if is_game && disc == instruction_discriminator("guess") {
                let amount: u64 = borsh::from_slice(args).map_err(|err| err.to_string())?;
                if !pdas.contains_key(&target) {
                    return Err("account not initialized".to_string());
                }
                record.instruction = "guess";
                record.amount = Some(amount);
            } else {
                return Err("unknown instruction".to_string());
            }

            executed.push(record);
        }

        state.pdas = pdas;
        state.executed.extend(executed);

        Ok(())
    }
}

impl Connection for MockNetwork {
    async fn get_program_accounts(&self, program: &Pubkey) -> Result<Vec<Pubkey>, RpcClientError> {
        let state = self.state.lock().unwrap();

        let pdas = state
            .pdas
            .iter()
            .filter(|(_, pda)| pda.program == *program)
            .map(|(address, _)| *address);
        let raw = state
            .raw_accounts
            .values()
            .filter(|acc| acc.owner == *program)
            .map(|acc| acc.address);

        Ok(pdas.chain(raw).collect())
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<RawAccount>, RpcClientError> {
        let state = self.state.lock().unwrap();

        if state.failing_fetch.contains(address) {
            return Err(RpcClientError::Rpc {
                code: -32009,
                message: format!("failed to load {address}"),
            });
        }

        if let Some(raw) = state.raw_accounts.get(address) {
            return Ok(Some(raw.clone()));
        }

        Ok(state.pdas.get(address).map(|pda| RawAccount {
            address: *address,
            lamports: pda.balance,
            data: self.encode_pda(pda),
            owner: pda.program,
        }))
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, RpcClientError> {
        let state = self.state.lock().unwrap();

        Ok(state
            .rent_override
            .unwrap_or((128 + data_len as u64) * 6960))
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, RpcClientError> {
        Ok(Hash::new_unique())
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, RpcClientError> {
        let mut state = self.state.lock().unwrap();

        if state.fail_sends {
            return Err(RpcClientError::Rpc {
                code: -32002,
                message: "Transaction simulation failed".to_string(),
            });
        }

        if tx.verify().is_err() {
            return Err(RpcClientError::Rpc {
                code: -32003,
                message: "Transaction signature verification failure".to_string(),
            });
        }

        let signature = tx.signatures[0];
        state.sent.push(tx.clone());
        state.slot += 1;

        let err = if state.fail_on_chain {
            Some(serde_json::json!({"InstructionError": [0, {"Custom": 6000}]}))
        } else {
            self.execute(&mut state, tx)
                .err()
                .map(serde_json::Value::String)
        };

        if !state.drop_statuses {
            let slot = state.slot;
            state.statuses.insert(
                signature,
                SignatureStatus {
                    slot,
                    confirmations: Some(0),
                    err,
                    confirmation_status: Some("confirmed".to_string()),
                },
            );
        }

        Ok(signature)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<SignatureStatus>, RpcClientError> {
        Ok(self.state.lock().unwrap().statuses.get(signature).cloned())
    }
}

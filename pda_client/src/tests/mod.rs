use common::Commitment;
use solana_sdk::signature::Keypair;

use crate::{
    config::FetchPolicy,
    poller::TxPoller,
    program_facades::{Bank, GuessingGame},
    provider::Provider,
    session::Session,
    signer::KeypairWallet,
};

use mock_network::MockNetwork;

mod mock_network;

pub const TEST_MAX_POLLS: u64 = 5;

///Mock network plus a fresh wallet, wired the way `ClientCore` wires the real ones
pub struct Harness {
    pub network: MockNetwork,
    pub wallet: KeypairWallet,
    pub poller: TxPoller,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            network: MockNetwork::new(),
            wallet: KeypairWallet::new(Keypair::new()),
            poller: TxPoller {
                polling_interval_millis: 1,
                polling_max_polls: TEST_MAX_POLLS,
                commitment: Commitment::Confirmed,
            },
        }
    }

    pub fn provider(&self) -> Provider<'_, MockNetwork, KeypairWallet> {
        Provider::new(&self.network, &self.wallet, &self.poller)
    }

    pub fn bank(&self) -> Bank<'_, MockNetwork, KeypairWallet> {
        Bank::new(self.provider(), &self.network.bank).unwrap()
    }

    pub fn game(&self) -> GuessingGame<'_, MockNetwork, KeypairWallet> {
        GuessingGame::new(self.provider(), &self.network.game).unwrap()
    }

    pub fn session(&self, policy: FetchPolicy) -> Session<'_, MockNetwork, KeypairWallet> {
        Session::new(self.bank(), self.game(), policy)
    }
}

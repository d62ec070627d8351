/* This file is part of DarkFi (https://dark.fi)
 *
 * Copyright (C) 2020-2026 Dyne.org foundation
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

// Not every test file uses every helper.
#![allow(dead_code)]

use std::collections::HashMap;

use log::debug;

use openparty::{
    chain::{CallOutput, Chain, ChainPtr, Receipt},
    contract::{
        client,
        model::{Address, PartyParams, SongId},
        ONE_TOKEN,
    },
    tx::Transaction,
    Error, Result,
};

/// Initialize the logging mechanism
pub fn init_logger() {
    let mut cfg = simplelog::ConfigBuilder::new();

    // We check this error so we can execute same file tests in parallel,
    // otherwise second one fails to init logger here.
    if simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        //simplelog::LevelFilter::Debug,
        //simplelog::LevelFilter::Trace,
        cfg.build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .is_err()
    {
        debug!(target: "test_harness", "Logger initialized");
    }
}

/// Enum representing available account holders
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Holder {
    /// Deployer and owner of the party
    Dj,
    Alice,
    Bob,
    Charlie,
}

/// Native coins every holder starts with
pub const GENESIS_NATIVE: u128 = 10_000 * ONE_TOKEN;

/// Party contract test harness instance
pub struct TestHarness {
    /// Addresses of the initialized [`Holder`]s
    pub holders: HashMap<Holder, Address>,
    /// The shared host ledger
    pub chain: ChainPtr,
}

impl TestHarness {
    /// Instantiate a new [`TestHarness`] with `Holder::Dj` as the deployer.
    pub fn new(holders: &[Holder], params: PartyParams) -> Result<Self> {
        let mut holders_map = HashMap::new();
        holders_map.insert(Holder::Dj, Address::account(0));
        for (i, holder) in holders.iter().enumerate() {
            holders_map.insert(*holder, Address::account(i as u64 + 1));
        }

        let genesis: Vec<(Address, u128)> =
            holders_map.values().map(|addr| (*addr, GENESIS_NATIVE)).collect();

        let chain = Chain::new(holders_map[&Holder::Dj], params, &genesis)?;

        Ok(Self { holders: holders_map, chain: chain.into_ptr() })
    }

    pub fn address(&self, holder: &Holder) -> Address {
        self.holders[holder]
    }

    pub async fn party_address(&self) -> Address {
        self.chain.read().await.party().address()
    }

    pub async fn execute(&self, tx: Transaction) -> Result<Receipt> {
        self.chain.write().await.execute(&tx)
    }

    /// `Party::PurchaseVotes`, returning the credited vote tokens
    pub async fn purchase_votes(&self, holder: &Holder, payment: u128) -> Result<u128> {
        let tx = client::purchase_votes_tx(self.address(holder), payment);
        match self.execute(tx).await?.output {
            CallOutput::Credited(amount) => Ok(amount),
            _ => Err(Error::ParseFailed("Unexpected purchase output")),
        }
    }

    /// Approve the party contract to draw `amount` from `holder`
    pub async fn approve_party(&self, holder: &Holder, amount: u128) -> Result<()> {
        let spender = self.party_address().await;
        self.execute(client::approve_tx(self.address(holder), spender, amount)?).await?;
        Ok(())
    }

    pub async fn mint_song(&self, holder: &Holder, uri: &str) -> Result<SongId> {
        let tx = client::mint_song_tx(self.address(holder), uri)?;
        match self.execute(tx).await?.output {
            CallOutput::Minted(id) => Ok(id),
            _ => Err(Error::ParseFailed("Unexpected mint output")),
        }
    }

    pub async fn open_voting(&self, holder: &Holder) -> Result<()> {
        self.execute(client::open_voting_tx(self.address(holder))).await?;
        Ok(())
    }

    pub async fn close_voting(&self, holder: &Holder) -> Result<()> {
        self.execute(client::close_voting_tx(self.address(holder))).await?;
        Ok(())
    }

    pub async fn vote(&self, holder: &Holder, song_id: SongId, amount: u128) -> Result<()> {
        self.execute(client::vote_tx(self.address(holder), song_id, amount)?).await?;
        Ok(())
    }

    pub async fn votes_balance(&self, holder: &Holder) -> u128 {
        self.chain.read().await.party().votes_token().balance_of(&self.address(holder))
    }

    pub async fn voting_power(&self, holder: &Holder) -> u128 {
        self.chain.read().await.party().voting_power(&self.address(holder))
    }

    pub async fn native_balance(&self, holder: &Holder) -> u128 {
        self.chain.read().await.native_balance_of(&self.address(holder))
    }

    /// Check the vote token supply invariant
    pub async fn assert_supply(&self) {
        let chain = self.chain.read().await;
        let votes = chain.party().votes_token();
        let sum: u128 = votes.holders().map(|(_, balance)| *balance).sum();
        assert_eq!(sum, votes.total_minted() - votes.total_burned());
        assert_eq!(sum, votes.total_supply());
    }
}

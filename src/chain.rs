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

//! In-process host ledger.
//!
//! [`Chain`] is the single sequential state machine the party contracts
//! run on. It owns the native coin balances and the [`OpenParty`]
//! controller, and applies [`Transaction`]s one at a time. A transaction
//! either commits completely or leaves the chain exactly as it was.

use std::{collections::HashMap, sync::Arc};

use log::{debug, info};
use smol::lock::RwLock;

use crate::{
    contract::{
        error::PartyError,
        model::{
            Address, ApproveParams, MintSongParams, PartyParams, SetSongFeeParams, SongId,
            TransferParams, VoteParams,
        },
        party::OpenParty,
        PartyFunction,
    },
    tx::{Transaction, TransactionHash},
    Error, Result,
};

/// Atomic pointer to the host ledger
pub type ChainPtr = Arc<RwLock<Chain>>;

/// What a successful call produced
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallOutput {
    None,
    /// Vote tokens credited by a purchase
    Credited(u128),
    /// Id of a freshly minted song
    Minted(SongId),
}

/// Record of an executed transaction
#[derive(Clone, Debug)]
pub struct Receipt {
    pub tx_hash: TransactionHash,
    pub nonce: u64,
    pub caller: Address,
    pub function: PartyFunction,
    pub output: CallOutput,
}

/// Decoded call, ready for dispatch
enum Call {
    PurchaseVotes,
    Approve(ApproveParams),
    Transfer(TransferParams),
    MintSong(MintSongParams),
    OpenVoting,
    CloseVoting,
    Vote(VoteParams),
    SetSongFee(SetSongFeeParams),
}

impl Call {
    fn decode(function: PartyFunction, tx: &Transaction) -> Result<Self> {
        let call = match function {
            PartyFunction::PurchaseVotes => Self::PurchaseVotes,
            PartyFunction::Approve => Self::Approve(tx.params()?),
            PartyFunction::Transfer => Self::Transfer(tx.params()?),
            PartyFunction::MintSong => Self::MintSong(tx.params()?),
            PartyFunction::OpenVoting => Self::OpenVoting,
            PartyFunction::CloseVoting => Self::CloseVoting,
            PartyFunction::Vote => Self::Vote(tx.params()?),
            PartyFunction::SetSongFee => Self::SetSongFee(tx.params()?),
        };

        Ok(call)
    }
}

/// In-process host ledger holding native balances and the deployed party
pub struct Chain {
    /// Native coin balances
    native: HashMap<Address, u128>,
    party: OpenParty,
    /// Number of committed transactions
    nonce: u64,
    receipts: Vec<Receipt>,
}

impl Chain {
    /// Deploy the party contracts from `deployer` and credit the genesis
    /// native balances.
    pub fn new(deployer: Address, params: PartyParams, genesis: &[(Address, u128)]) -> Result<Self> {
        let address = Address::contract(&deployer, 0);
        let party = OpenParty::new(address, deployer, params)?;

        let mut native: HashMap<Address, u128> = HashMap::new();
        for (account, amount) in genesis {
            let balance = native.entry(*account).or_insert(0);
            let Some(credited) = balance.checked_add(*amount) else {
                return Err(PartyError::Overflow.into())
            };
            *balance = credited;
        }

        info!(target: "openparty::chain", "Genesis with {} funded accounts", native.len());
        Ok(Self { native, party, nonce: 0, receipts: vec![] })
    }

    pub fn into_ptr(self) -> ChainPtr {
        Arc::new(RwLock::new(self))
    }

    /// Apply a transaction. On error nothing is changed.
    pub fn execute(&mut self, tx: &Transaction) -> Result<Receipt> {
        let function = tx.function()?;

        if tx.value > 0 && !function.is_payable() {
            debug!(target: "openparty::chain", "[Chain::Execute] Error: {function:?} is not payable");
            return Err(Error::NonPayable)
        }

        let caller_balance = self.native_balance_of(&tx.caller);
        if caller_balance < tx.value {
            debug!(
                target: "openparty::chain",
                "[Chain::Execute] Error: {} holds {caller_balance}, needs {}", tx.caller, tx.value,
            );
            return Err(Error::InsufficientFunds)
        }

        // The value only ever moves to the party, so check the credit
        // side before any contract state changes.
        let party_address = self.party.address();
        if tx.caller != party_address &&
            self.native_balance_of(&party_address).checked_add(tx.value).is_none()
        {
            return Err(PartyError::Overflow.into())
        }

        let call = Call::decode(function, tx)?;
        let output = self.dispatch(tx.caller, tx.value, call)?;

        if tx.value > 0 {
            self.native.insert(tx.caller, caller_balance - tx.value);
            *self.native.entry(party_address).or_insert(0) += tx.value;
        }

        self.nonce += 1;
        let receipt = Receipt {
            tx_hash: tx.hash(self.nonce),
            nonce: self.nonce,
            caller: tx.caller,
            function,
            output,
        };
        self.receipts.push(receipt.clone());

        debug!(target: "openparty::chain", "[Chain::Execute] {function:?} committed as {}", receipt.tx_hash);
        Ok(receipt)
    }

    fn dispatch(&mut self, caller: Address, value: u128, call: Call) -> Result<CallOutput> {
        let output = match call {
            Call::PurchaseVotes => CallOutput::Credited(self.party.purchase_votes(caller, value)?),
            Call::Approve(params) => {
                self.party.approve(caller, params.spender, params.amount);
                CallOutput::None
            }
            Call::Transfer(params) => {
                self.party.transfer(caller, params.recipient, params.amount)?;
                CallOutput::None
            }
            Call::MintSong(params) => CallOutput::Minted(self.party.mint_song(caller, &params.uri)?),
            Call::OpenVoting => {
                self.party.open_voting(caller)?;
                CallOutput::None
            }
            Call::CloseVoting => {
                self.party.close_voting(caller)?;
                CallOutput::None
            }
            Call::Vote(params) => {
                self.party.vote(caller, params.song_id, params.amount)?;
                CallOutput::None
            }
            Call::SetSongFee(params) => {
                self.party.set_song_fee(caller, params.fee_bps)?;
                CallOutput::None
            }
        };

        Ok(output)
    }

    pub fn native_balance_of(&self, account: &Address) -> u128 {
        self.native.get(account).copied().unwrap_or(0)
    }

    pub fn party(&self) -> &OpenParty {
        &self.party
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{client, ONE_TOKEN};

    fn chain() -> (Chain, Address, Address) {
        let deployer = Address::account(0);
        let alice = Address::account(1);
        let params = PartyParams { ratio: 1_000_000, song_fee_bps: 1000, song_price: ONE_TOKEN };
        let genesis = [(deployer, 100 * ONE_TOKEN), (alice, 100 * ONE_TOKEN)];
        (Chain::new(deployer, params, &genesis).unwrap(), deployer, alice)
    }

    #[test]
    fn purchase_moves_native_value() {
        let (mut chain, _, alice) = chain();
        let party = chain.party().address();

        let receipt = chain.execute(&client::purchase_votes_tx(alice, ONE_TOKEN)).unwrap();
        assert_eq!(receipt.output, CallOutput::Credited(1_000_000 * ONE_TOKEN));
        assert_eq!(receipt.nonce, 1);
        assert_eq!(chain.native_balance_of(&alice), 99 * ONE_TOKEN);
        assert_eq!(chain.native_balance_of(&party), ONE_TOKEN);
        assert_eq!(chain.receipts().len(), 1);
    }

    #[test]
    fn value_rejected_on_non_payable() {
        let (mut chain, deployer, _) = chain();
        let mut tx = client::open_voting_tx(deployer);
        tx.value = 1;

        assert!(matches!(chain.execute(&tx), Err(Error::NonPayable)));
        assert!(!chain.party().votes_open());
        assert_eq!(chain.nonce(), 0);
    }

    #[test]
    fn failed_calls_leave_chain_untouched() {
        let (mut chain, _, alice) = chain();
        let bob = Address::account(2);

        let tx = client::purchase_votes_tx(bob, 1);
        assert!(matches!(chain.execute(&tx), Err(Error::InsufficientFunds)));

        let tx = client::purchase_votes_tx(alice, 0);
        assert!(matches!(chain.execute(&tx), Err(Error::Contract(PartyError::InvalidAmount))));

        let tx = client::open_voting_tx(alice);
        assert!(matches!(chain.execute(&tx), Err(Error::Contract(PartyError::Unauthorized))));

        let tx = Transaction { caller: alice, value: 0, calldata: vec![42] };
        assert!(matches!(chain.execute(&tx), Err(Error::Contract(PartyError::InvalidFunction))));

        assert_eq!(chain.native_balance_of(&alice), 100 * ONE_TOKEN);
        assert_eq!(chain.nonce(), 0);
        assert!(chain.receipts().is_empty());
    }

    #[test]
    fn genesis_overflow_rejected() {
        let deployer = Address::account(0);
        let params = PartyParams { ratio: 1, song_fee_bps: 0, song_price: 0 };
        let genesis = [(deployer, u128::MAX), (deployer, 1)];
        assert!(matches!(
            Chain::new(deployer, params, &genesis),
            Err(Error::Contract(PartyError::Overflow))
        ));
    }
}

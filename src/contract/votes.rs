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

//! `OPVotes`: the fungible vote token ledger.
//!
//! Balances are only ever created by [`VotesToken::purchase`] and only
//! ever destroyed by [`VotesToken::burn`], so the sum of all balances is
//! always `total_minted - total_burned`.

use std::collections::HashMap;

use log::debug;

use super::{
    error::{ContractResult, PartyError},
    model::Address,
};

/// Fungible vote token ledger
#[derive(Clone, Debug)]
pub struct VotesToken {
    /// Vote token base units credited per base unit of payment
    ratio: u128,
    balances: HashMap<Address, u128>,
    /// (owner, spender) => amount
    allowances: HashMap<(Address, Address), u128>,
    total_minted: u128,
    total_burned: u128,
}

impl VotesToken {
    pub fn new(ratio: u128) -> Self {
        Self {
            ratio,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_minted: 0,
            total_burned: 0,
        }
    }

    /// Convert `payment` into vote tokens credited to `buyer`.
    /// Returns the credited amount.
    pub fn purchase(&mut self, buyer: Address, payment: u128) -> ContractResult<u128> {
        if payment == 0 {
            debug!(target: "openparty::votes", "[Votes::Purchase] Error: Zero payment from {buyer}");
            return Err(PartyError::InvalidAmount)
        }

        let Some(credited) = payment.checked_mul(self.ratio) else {
            return Err(PartyError::Overflow)
        };

        let Some(total_minted) = self.total_minted.checked_add(credited) else {
            return Err(PartyError::Overflow)
        };

        // A single balance can never exceed the minted total, so this can't overflow.
        *self.balances.entry(buyer).or_insert(0) += credited;
        self.total_minted = total_minted;

        debug!(target: "openparty::votes", "[Votes::Purchase] {buyer} credited {credited}");
        Ok(credited)
    }

    /// Set the amount `spender` may draw from `owner`. Any previous
    /// allowance is overwritten.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: u128) {
        if amount == 0 {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }

        debug!(target: "openparty::votes", "[Votes::Approve] {owner} allows {spender} {amount}");
    }

    /// Move `amount` from `owner` to `recipient` on behalf of `spender`,
    /// consuming allowance.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        owner: Address,
        recipient: Address,
        amount: u128,
    ) -> ContractResult<()> {
        let allowance = self.allowance(&owner, &spender);
        if allowance < amount {
            debug!(
                target: "openparty::votes",
                "[Votes::TransferFrom] Error: {spender} allowance {allowance} < {amount}",
            );
            return Err(PartyError::InsufficientAllowance)
        }

        if self.balance_of(&owner) < amount {
            debug!(target: "openparty::votes", "[Votes::TransferFrom] Error: {owner} balance too low");
            return Err(PartyError::InsufficientBalance)
        }

        self.approve(owner, spender, allowance - amount);
        self.move_balance(owner, recipient, amount);
        Ok(())
    }

    /// Plain transfer from `from` to `to`.
    pub fn transfer(&mut self, from: Address, to: Address, amount: u128) -> ContractResult<()> {
        if amount == 0 {
            return Err(PartyError::InvalidAmount)
        }

        if self.balance_of(&from) < amount {
            debug!(target: "openparty::votes", "[Votes::Transfer] Error: {from} balance too low");
            return Err(PartyError::InsufficientBalance)
        }

        self.move_balance(from, to, amount);
        Ok(())
    }

    /// Destroy `amount` of `account`'s tokens.
    pub fn burn(&mut self, account: Address, amount: u128) -> ContractResult<()> {
        if amount == 0 {
            return Err(PartyError::InvalidAmount)
        }

        let balance = self.balance_of(&account);
        if balance < amount {
            debug!(target: "openparty::votes", "[Votes::Burn] Error: {account} balance too low");
            return Err(PartyError::InsufficientBalance)
        }

        self.balances.insert(account, balance - amount);
        self.total_burned += amount;
        debug!(target: "openparty::votes", "[Votes::Burn] {account} burned {amount}");
        Ok(())
    }

    /// Caller must have checked that `from` holds at least `amount`.
    fn move_balance(&mut self, from: Address, to: Address, amount: u128) {
        if let Some(balance) = self.balances.get_mut(&from) {
            *balance -= amount;
        }
        *self.balances.entry(to).or_insert(0) += amount;
        debug!(target: "openparty::votes", "[Votes::Transfer] {from} -> {to}: {amount}");
    }

    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    pub fn ratio(&self) -> u128 {
        self.ratio
    }

    pub fn total_supply(&self) -> u128 {
        self.total_minted - self.total_burned
    }

    pub fn total_minted(&self) -> u128 {
        self.total_minted
    }

    pub fn total_burned(&self) -> u128 {
        self.total_burned
    }

    /// Iterate over every account that has held vote tokens.
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &u128)> {
        self.balances.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATIO: u128 = 1_000_000;

    #[test]
    fn purchase_credits_ratio() {
        let alice = Address::account(1);
        let mut votes = VotesToken::new(RATIO);

        assert_eq!(votes.purchase(alice, 10).unwrap(), 10 * RATIO);
        assert_eq!(votes.purchase(alice, 5).unwrap(), 5 * RATIO);
        assert_eq!(votes.balance_of(&alice), 15 * RATIO);
        assert_eq!(votes.total_supply(), 15 * RATIO);
        assert_eq!(votes.purchase(alice, 0), Err(PartyError::InvalidAmount));
    }

    #[test]
    fn purchase_overflow_leaves_state_untouched() {
        let alice = Address::account(1);
        let mut votes = VotesToken::new(RATIO);

        assert_eq!(votes.purchase(alice, u128::MAX / 2), Err(PartyError::Overflow));
        assert_eq!(votes.balance_of(&alice), 0);
        assert_eq!(votes.total_minted(), 0);

        let mut votes = VotesToken::new(1);
        votes.purchase(alice, u128::MAX - 1).unwrap();
        assert_eq!(votes.purchase(alice, 2), Err(PartyError::Overflow));
        assert_eq!(votes.balance_of(&alice), u128::MAX - 1);
    }

    #[test]
    fn approve_overwrites() {
        let alice = Address::account(1);
        let bob = Address::account(2);
        let mut votes = VotesToken::new(RATIO);

        votes.approve(alice, bob, 100);
        votes.approve(alice, bob, 40);
        assert_eq!(votes.allowance(&alice, &bob), 40);
        votes.approve(alice, bob, 0);
        assert_eq!(votes.allowance(&alice, &bob), 0);
    }

    #[test]
    fn transfer_from_checks_allowance_then_balance() {
        let alice = Address::account(1);
        let bob = Address::account(2);
        let carol = Address::account(3);
        let mut votes = VotesToken::new(1);
        votes.purchase(alice, 100).unwrap();

        assert_eq!(votes.transfer_from(bob, alice, carol, 1), Err(PartyError::InsufficientAllowance));

        votes.approve(alice, bob, 1000);
        assert_eq!(votes.transfer_from(bob, alice, carol, 101), Err(PartyError::InsufficientBalance));
        assert_eq!(votes.allowance(&alice, &bob), 1000);

        votes.transfer_from(bob, alice, carol, 60).unwrap();
        assert_eq!(votes.balance_of(&alice), 40);
        assert_eq!(votes.balance_of(&carol), 60);
        assert_eq!(votes.allowance(&alice, &bob), 940);
        assert_eq!(votes.total_supply(), 100);
    }

    #[test]
    fn transfer_to_self_keeps_balance() {
        let alice = Address::account(1);
        let mut votes = VotesToken::new(1);
        votes.purchase(alice, 10).unwrap();
        votes.transfer(alice, alice, 10).unwrap();
        assert_eq!(votes.balance_of(&alice), 10);
    }

    #[test]
    fn burn_reduces_supply() {
        let alice = Address::account(1);
        let mut votes = VotesToken::new(1);
        votes.purchase(alice, 10).unwrap();

        assert_eq!(votes.burn(alice, 11), Err(PartyError::InsufficientBalance));
        assert_eq!(votes.burn(alice, 0), Err(PartyError::InvalidAmount));
        votes.burn(alice, 4).unwrap();

        assert_eq!(votes.balance_of(&alice), 6);
        assert_eq!(votes.total_burned(), 4);
        assert_eq!(votes.total_supply(), 6);
        let sum: u128 = votes.holders().map(|(_, b)| *b).sum();
        assert_eq!(sum, votes.total_minted() - votes.total_burned());
    }
}

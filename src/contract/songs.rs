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

//! `OPSongs`: the append-only non-fungible song registry.

use log::debug;

use super::{
    error::{ContractResult, PartyError},
    model::{Address, Song, SongId},
    votes::VotesToken,
};

/// Non-fungible song registry. Song `n` lives at index `n - 1`.
#[derive(Clone, Debug, Default)]
pub struct SongsToken {
    songs: Vec<Song>,
}

impl SongsToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new song owned by `minter`, collecting `fee` vote tokens
    /// into `fee_sink`. `fee_sink` draws the fee as spender, so the minter
    /// must have approved it for at least `fee`.
    pub fn mint(
        &mut self,
        votes: &mut VotesToken,
        minter: Address,
        fee_sink: Address,
        uri: &str,
        fee: u128,
    ) -> ContractResult<SongId> {
        if uri.is_empty() {
            debug!(target: "openparty::songs", "[Songs::Mint] Error: Empty URI from {minter}");
            return Err(PartyError::EmptyURI)
        }

        votes.transfer_from(fee_sink, minter, fee_sink, fee)?;

        let id = SongId(self.songs.len() as u64 + 1);
        self.songs.push(Song { id, owner: minter, uri: uri.to_string(), score: 0 });

        debug!(target: "openparty::songs", "[Songs::Mint] Minted song {id} for {minter} (fee {fee})");
        Ok(id)
    }

    /// Credit `amount` to a song's score.
    pub(crate) fn add_score(&mut self, id: SongId, amount: u128) -> ContractResult<u128> {
        let song = self.get_mut(id)?;
        let Some(score) = song.score.checked_add(amount) else { return Err(PartyError::Overflow) };
        song.score = score;
        Ok(score)
    }

    pub fn get(&self, id: SongId) -> ContractResult<&Song> {
        let Some(index) = (id.0 as usize).checked_sub(1) else {
            return Err(PartyError::UnknownSong)
        };
        self.songs.get(index).ok_or(PartyError::UnknownSong)
    }

    fn get_mut(&mut self, id: SongId) -> ContractResult<&mut Song> {
        let Some(index) = (id.0 as usize).checked_sub(1) else {
            return Err(PartyError::UnknownSong)
        };
        self.songs.get_mut(index).ok_or(PartyError::UnknownSong)
    }

    pub fn owner_of(&self, id: SongId) -> ContractResult<Address> {
        Ok(self.get(id)?.owner)
    }

    pub fn uri_of(&self, id: SongId) -> ContractResult<&str> {
        Ok(&self.get(id)?.uri)
    }

    pub fn score_of(&self, id: SongId) -> ContractResult<u128> {
        Ok(self.get(id)?.score)
    }

    /// Songs owned by `account`, in mint order.
    pub fn tokens_of_owner(&self, account: &Address) -> Vec<SongId> {
        self.songs.iter().filter(|s| &s.owner == account).map(|s| s.id).collect()
    }

    /// Number of songs owned by `account`.
    pub fn balance_of(&self, account: &Address) -> usize {
        self.songs.iter().filter(|s| &s.owner == account).count()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Song> {
        self.songs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funded(account: Address, sink: Address, amount: u128) -> VotesToken {
        let mut votes = VotesToken::new(1);
        votes.purchase(account, amount).unwrap();
        votes.approve(account, sink, u128::MAX);
        votes
    }

    #[test]
    fn mint_assigns_sequential_ids() {
        let alice = Address::account(1);
        let bob = Address::account(2);
        let sink = Address::account(99);
        let mut votes = funded(alice, sink, 100);
        votes.purchase(bob, 100).unwrap();
        votes.approve(bob, sink, 10);

        let mut songs = SongsToken::new();
        assert_eq!(songs.mint(&mut votes, alice, sink, "uri1", 10).unwrap(), SongId(1));
        assert_eq!(songs.mint(&mut votes, bob, sink, "uri2", 10).unwrap(), SongId(2));
        assert_eq!(songs.mint(&mut votes, alice, sink, "uri3", 10).unwrap(), SongId(3));

        assert_eq!(songs.owner_of(SongId(2)).unwrap(), bob);
        assert_eq!(songs.uri_of(SongId(3)).unwrap(), "uri3");
        assert_eq!(songs.score_of(SongId(1)).unwrap(), 0);
        assert_eq!(songs.tokens_of_owner(&alice), vec![SongId(1), SongId(3)]);
        assert_eq!(songs.balance_of(&bob), 1);
        assert_eq!(votes.balance_of(&sink), 30);
        assert_eq!(votes.balance_of(&alice), 80);
    }

    #[test]
    fn mint_requires_allowance() {
        let alice = Address::account(1);
        let sink = Address::account(99);
        let mut votes = VotesToken::new(1);
        votes.purchase(alice, 100).unwrap();
        votes.approve(alice, sink, 9);

        let mut songs = SongsToken::new();
        assert_eq!(
            songs.mint(&mut votes, alice, sink, "uri1", 10),
            Err(PartyError::InsufficientAllowance)
        );
        assert!(songs.is_empty());
        assert_eq!(votes.balance_of(&alice), 100);
        assert_eq!(votes.allowance(&alice, &sink), 9);
    }

    #[test]
    fn mint_rejects_empty_uri_before_charging() {
        let alice = Address::account(1);
        let sink = Address::account(99);
        let mut votes = funded(alice, sink, 100);

        let mut songs = SongsToken::new();
        assert_eq!(songs.mint(&mut votes, alice, sink, "", 10), Err(PartyError::EmptyURI));
        assert_eq!(votes.balance_of(&alice), 100);
    }

    #[test]
    fn unknown_songs() {
        let songs = SongsToken::new();
        assert_eq!(songs.owner_of(SongId(0)), Err(PartyError::UnknownSong));
        assert_eq!(songs.uri_of(SongId(1)), Err(PartyError::UnknownSong));
        assert_eq!(songs.score_of(SongId(u64::MAX)), Err(PartyError::UnknownSong));
    }

    #[test]
    fn scores_accumulate() {
        let alice = Address::account(1);
        let sink = Address::account(99);
        let mut votes = funded(alice, sink, 100);
        let mut songs = SongsToken::new();
        let id = songs.mint(&mut votes, alice, sink, "uri1", 0).unwrap();

        assert_eq!(songs.add_score(id, 5).unwrap(), 5);
        assert_eq!(songs.add_score(id, 7).unwrap(), 12);
        assert_eq!(songs.add_score(SongId(2), 1), Err(PartyError::UnknownSong));
        assert_eq!(songs.add_score(id, u128::MAX), Err(PartyError::Overflow));
        assert_eq!(songs.score_of(id).unwrap(), 12);
    }
}

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

//! `OpenParty`: the voting controller.
//!
//! The controller owns the vote token ledger and the song registry and
//! is the only way to mutate either of them. Every call checks all of
//! its preconditions before touching state.

use log::{debug, info};

use super::{
    error::{ContractResult, PartyError},
    model::{Address, PartyParams, SessionState, SongId, VoteRecord, VotingSession},
    songs::SongsToken,
    votes::VotesToken,
    BPS_DENOMINATOR,
};
use crate::util::time::Timestamp;

/// Party controller contract
#[derive(Clone, Debug)]
pub struct OpenParty {
    /// Address of the controller itself, which also collects song fees
    address: Address,
    /// Deployer, the only account allowed to open and close voting
    owner: Address,
    song_fee_bps: u64,
    song_price: u128,
    votes: VotesToken,
    songs: SongsToken,
    session: VotingSession,
    records: Vec<VoteRecord>,
}

impl OpenParty {
    /// Deploy a new party at `address` owned by `owner`.
    pub fn new(address: Address, owner: Address, params: PartyParams) -> ContractResult<Self> {
        if params.ratio == 0 {
            return Err(PartyError::InvalidAmount)
        }

        if params.song_fee_bps > BPS_DENOMINATOR {
            return Err(PartyError::InvalidFee)
        }

        info!(
            target: "openparty::party",
            "Deployed OpenParty at {address} (owner {owner}, ratio {}, fee {} bps)",
            params.ratio, params.song_fee_bps,
        );

        Ok(Self {
            address,
            owner,
            song_fee_bps: params.song_fee_bps,
            song_price: params.song_price,
            votes: VotesToken::new(params.ratio),
            songs: SongsToken::new(),
            session: VotingSession::default(),
            records: vec![],
        })
    }

    /// Buy vote tokens with a native `payment`.
    pub fn purchase_votes(&mut self, buyer: Address, payment: u128) -> ContractResult<u128> {
        self.votes.purchase(buyer, payment)
    }

    /// `OPVotes::approve` on behalf of `owner`.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: u128) {
        self.votes.approve(owner, spender, amount)
    }

    /// `OPVotes::transfer` on behalf of `from`.
    pub fn transfer(&mut self, from: Address, to: Address, amount: u128) -> ContractResult<()> {
        self.votes.transfer(from, to, amount)
    }

    /// Vote tokens charged for minting a song:
    /// `song_fee_bps * song_price / 10000`.
    pub fn song_fee(&self) -> ContractResult<u128> {
        let Some(scaled) = self.song_price.checked_mul(self.song_fee_bps as u128) else {
            return Err(PartyError::Overflow)
        };
        Ok(scaled / BPS_DENOMINATOR as u128)
    }

    /// Mint a song for `minter`. The minter must have approved this
    /// contract for at least [`OpenParty::song_fee`].
    pub fn mint_song(&mut self, minter: Address, uri: &str) -> ContractResult<SongId> {
        let fee = self.song_fee()?;
        self.songs.mint(&mut self.votes, minter, self.address, uri, fee)
    }

    pub fn open_voting(&mut self, caller: Address) -> ContractResult<()> {
        self.check_owner(&caller, "OpenVoting")?;

        if self.session.is_open() {
            debug!(target: "openparty::party", "[Party::OpenVoting] Error: Voting already open");
            return Err(PartyError::AlreadyOpen)
        }

        self.session.state = SessionState::Open;
        self.session.round += 1;
        self.session.opened_at = Some(Timestamp::current_time());
        self.session.closed_at = None;

        info!(target: "openparty::party", "Voting round {} opened", self.session.round);
        Ok(())
    }

    pub fn close_voting(&mut self, caller: Address) -> ContractResult<()> {
        self.check_owner(&caller, "CloseVoting")?;

        if !self.session.is_open() {
            debug!(target: "openparty::party", "[Party::CloseVoting] Error: Voting already closed");
            return Err(PartyError::AlreadyClosed)
        }

        self.session.state = SessionState::Closed;
        self.session.closed_at = Some(Timestamp::current_time());

        info!(target: "openparty::party", "Voting round {} closed", self.session.round);
        Ok(())
    }

    /// Spend `amount` vote tokens of `caller` on `song_id`. The tokens are
    /// burned, and repeated votes for the same song accumulate.
    pub fn vote(&mut self, caller: Address, song_id: SongId, amount: u128) -> ContractResult<()> {
        if !self.session.is_open() {
            debug!(target: "openparty::party", "[Party::Vote] Error: Voting is not open");
            return Err(PartyError::VotingNotOpen)
        }

        let score = self.songs.score_of(song_id)?;

        if amount == 0 {
            return Err(PartyError::InvalidAmount)
        }

        if self.votes.balance_of(&caller) < amount {
            debug!(target: "openparty::party", "[Party::Vote] Error: {caller} cannot cover {amount}");
            return Err(PartyError::InsufficientBalance)
        }

        if score.checked_add(amount).is_none() {
            return Err(PartyError::Overflow)
        }

        // Everything below was checked above and can't fail.
        self.votes.burn(caller, amount)?;
        let score = self.songs.add_score(song_id, amount)?;
        self.records.push(VoteRecord { voter: caller, song_id, amount, round: self.session.round });

        debug!(target: "openparty::party", "[Party::Vote] {caller} voted {amount} on song {song_id} (score {score})");
        Ok(())
    }

    /// Voting power is the spendable vote token balance.
    pub fn voting_power(&self, account: &Address) -> u128 {
        self.votes.balance_of(account)
    }

    /// Highest scoring song. Ties go to the lowest id.
    pub fn winning_song(&self) -> ContractResult<SongId> {
        if self.session.is_open() {
            return Err(PartyError::VotingStillOpen)
        }

        let mut winner: Option<(SongId, u128)> = None;
        for song in self.songs.iter() {
            match winner {
                Some((_, best)) if song.score <= best => {}
                _ => winner = Some((song.id, song.score)),
            }
        }

        winner.map(|(id, _)| id).ok_or(PartyError::NoSongs)
    }

    /// Change the song fee. Owner only, bounded to `[0, 10000]`.
    pub fn set_song_fee(&mut self, caller: Address, fee_bps: u64) -> ContractResult<()> {
        self.check_owner(&caller, "SetSongFee")?;

        if fee_bps > BPS_DENOMINATOR {
            return Err(PartyError::InvalidFee)
        }

        info!(target: "openparty::party", "Song fee changed from {} to {fee_bps} bps", self.song_fee_bps);
        self.song_fee_bps = fee_bps;
        Ok(())
    }

    fn check_owner(&self, caller: &Address, call: &str) -> ContractResult<()> {
        if caller != &self.owner {
            debug!(target: "openparty::party", "[Party::{call}] Error: {caller} is not the owner");
            return Err(PartyError::Unauthorized)
        }
        Ok(())
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn params(&self) -> PartyParams {
        PartyParams {
            ratio: self.votes.ratio(),
            song_fee_bps: self.song_fee_bps,
            song_price: self.song_price,
        }
    }

    pub fn votes_open(&self) -> bool {
        self.session.is_open()
    }

    pub fn session(&self) -> &VotingSession {
        &self.session
    }

    pub fn vote_records(&self) -> &[VoteRecord] {
        &self.records
    }

    pub fn votes_token(&self) -> &VotesToken {
        &self.votes
    }

    pub fn songs_token(&self) -> &SongsToken {
        &self.songs
    }
}

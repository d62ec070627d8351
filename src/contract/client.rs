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

use darkfi_serial::{Encodable, WriteExt};

use super::{
    model::{
        Address, ApproveParams, MintSongParams, SetSongFeeParams, SongId, TransferParams,
        VoteParams,
    },
    PartyFunction,
};
use crate::{tx::Transaction, Result};

/// Build a transaction calling `function` with the given encoded `params`.
pub fn build_tx<T: Encodable>(
    caller: Address,
    value: u128,
    function: PartyFunction,
    params: &T,
) -> Result<Transaction> {
    let mut calldata = vec![];
    // Selects which path executes in the contract.
    calldata.write_u8(function as u8)?;
    params.encode(&mut calldata)?;

    Ok(Transaction { caller, value, calldata })
}

/// Transaction for a call without parameters.
fn bare_tx(caller: Address, value: u128, function: PartyFunction) -> Transaction {
    Transaction { caller, value, calldata: vec![function as u8] }
}

/// `Party::PurchaseVotes`, paying `payment` native base units.
pub fn purchase_votes_tx(caller: Address, payment: u128) -> Transaction {
    bare_tx(caller, payment, PartyFunction::PurchaseVotes)
}

/// `Votes::Approve`
pub fn approve_tx(caller: Address, spender: Address, amount: u128) -> Result<Transaction> {
    build_tx(caller, 0, PartyFunction::Approve, &ApproveParams { spender, amount })
}

/// `Votes::Transfer`
pub fn transfer_tx(caller: Address, recipient: Address, amount: u128) -> Result<Transaction> {
    build_tx(caller, 0, PartyFunction::Transfer, &TransferParams { recipient, amount })
}

/// `Party::MintSong`
pub fn mint_song_tx(caller: Address, uri: &str) -> Result<Transaction> {
    build_tx(caller, 0, PartyFunction::MintSong, &MintSongParams { uri: uri.to_string() })
}

/// `Party::OpenVoting`
pub fn open_voting_tx(caller: Address) -> Transaction {
    bare_tx(caller, 0, PartyFunction::OpenVoting)
}

/// `Party::CloseVoting`
pub fn close_voting_tx(caller: Address) -> Transaction {
    bare_tx(caller, 0, PartyFunction::CloseVoting)
}

/// `Party::Vote`
pub fn vote_tx(caller: Address, song_id: SongId, amount: u128) -> Result<Transaction> {
    build_tx(caller, 0, PartyFunction::Vote, &VoteParams { song_id, amount })
}

/// `Party::SetSongFee`
pub fn set_song_fee_tx(caller: Address, fee_bps: u64) -> Result<Transaction> {
    build_tx(caller, 0, PartyFunction::SetSongFee, &SetSongFeeParams { fee_bps })
}

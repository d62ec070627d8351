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

use error::PartyError;

/// Contract errors
pub mod error;

/// Contract data structures and call parameters
pub mod model;

/// `OPVotes` fungible vote token ledger
pub mod votes;

/// `OPSongs` non-fungible song registry
pub mod songs;

/// `OpenParty` voting controller
pub mod party;

/// Transaction building API for clients interacting with the party
pub mod client;

/// One whole vote token (or native coin) in base units
pub const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Basis points denominator, 10000 = 100%
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Default vote tokens credited per unit of payment
pub const DEFAULT_VOTES_RATIO: u128 = 1_000_000;

/// Default song fee, 10%
pub const DEFAULT_SONG_FEE_BPS: u64 = 1000;

/// Default song price, one vote token
pub const DEFAULT_SONG_PRICE: u128 = ONE_TOKEN;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PartyFunction {
    PurchaseVotes = 0x00,
    Approve = 0x01,
    Transfer = 0x02,
    MintSong = 0x03,
    OpenVoting = 0x04,
    CloseVoting = 0x05,
    Vote = 0x06,
    SetSongFee = 0x07,
}

impl TryFrom<u8> for PartyFunction {
    type Error = PartyError;

    fn try_from(x: u8) -> core::result::Result<PartyFunction, Self::Error> {
        match x {
            0x00 => Ok(PartyFunction::PurchaseVotes),
            0x01 => Ok(PartyFunction::Approve),
            0x02 => Ok(PartyFunction::Transfer),
            0x03 => Ok(PartyFunction::MintSong),
            0x04 => Ok(PartyFunction::OpenVoting),
            0x05 => Ok(PartyFunction::CloseVoting),
            0x06 => Ok(PartyFunction::Vote),
            0x07 => Ok(PartyFunction::SetSongFee),
            _ => Err(PartyError::InvalidFunction),
        }
    }
}

impl PartyFunction {
    /// Only purchases accept a native value.
    pub fn is_payable(&self) -> bool {
        matches!(self, PartyFunction::PurchaseVotes)
    }
}

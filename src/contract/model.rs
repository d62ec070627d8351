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

use std::{fmt, str::FromStr};

use darkfi_serial::{SerialDecodable, SerialEncodable};

use crate::{util::time::Timestamp, Error};

/// Length of an [`Address`] in bytes
pub const ADDRESS_LEN: usize = 20;

/// Account identity, displayed as `0x`-prefixed hex.
#[derive(
    Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, SerialEncodable, SerialDecodable,
)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Derive an address from arbitrary seed bytes.
    pub fn from_seed(seed: &[u8]) -> Self {
        let hash = blake3::hash(seed);
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&hash.as_bytes()[..ADDRESS_LEN]);
        Self(bytes)
    }

    /// Address of the `index`-th demo account.
    pub fn account(index: u64) -> Self {
        let mut seed = b"openparty:account:".to_vec();
        seed.extend_from_slice(&index.to_le_bytes());
        Self::from_seed(&seed)
    }

    /// Address of a contract deployed by `deployer` at `nonce`.
    pub fn contract(deployer: &Address, nonce: u64) -> Self {
        let mut seed = b"openparty:contract:".to_vec();
        seed.extend_from_slice(&deployer.0);
        seed.extend_from_slice(&nonce.to_le_bytes());
        Self::from_seed(&seed)
    }

    pub fn inner(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let Ok(bytes) = hex::decode(digits) else {
            return Err(Error::AddressParseError(s.to_string()))
        };

        let Ok(bytes) = <[u8; ADDRESS_LEN]>::try_from(bytes.as_slice()) else {
            return Err(Error::AddressParseError(s.to_string()))
        };

        Ok(Self(bytes))
    }
}

/// Sequential identifier of a song. The first minted song is `1`.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    SerialEncodable,
    SerialDecodable,
)]
pub struct SongId(pub u64);

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SongId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A song entry in the `OPSongs` registry
#[derive(Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub struct Song {
    pub id: SongId,
    pub owner: Address,
    /// Opaque metadata pointer, stored verbatim
    pub uri: String,
    /// Cumulative vote-token amount cast for this song
    pub score: u128,
}

/// A single vote cast, kept for auditability
#[derive(Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub struct VoteRecord {
    pub voter: Address,
    pub song_id: SongId,
    pub amount: u128,
    /// Voting round the vote was cast in
    pub round: u64,
}

/// Voting window state
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Open,
}

/// The global voting session
#[derive(Clone, Debug)]
pub struct VotingSession {
    pub state: SessionState,
    /// Number of times voting has been opened
    pub round: u64,
    pub opened_at: Option<Timestamp>,
    pub closed_at: Option<Timestamp>,
}

impl Default for VotingSession {
    fn default() -> Self {
        Self { state: SessionState::Closed, round: 0, opened_at: None, closed_at: None }
    }
}

impl VotingSession {
    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }
}

/// Constructor parameters of the `OpenParty` contract
#[derive(Copy, Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub struct PartyParams {
    /// Vote token base units credited per base unit of payment
    pub ratio: u128,
    /// Fee charged on song mints, in basis points of `song_price`
    pub song_fee_bps: u64,
    /// Fixed song price in vote token base units
    pub song_price: u128,
}

/// Parameters for `Votes::Approve`
#[derive(Clone, Debug, SerialEncodable, SerialDecodable)]
pub struct ApproveParams {
    pub spender: Address,
    pub amount: u128,
}

/// Parameters for `Votes::Transfer`
#[derive(Clone, Debug, SerialEncodable, SerialDecodable)]
pub struct TransferParams {
    pub recipient: Address,
    pub amount: u128,
}

/// Parameters for `Party::MintSong`
#[derive(Clone, Debug, SerialEncodable, SerialDecodable)]
pub struct MintSongParams {
    pub uri: String,
}

/// Parameters for `Party::Vote`
#[derive(Clone, Debug, SerialEncodable, SerialDecodable)]
pub struct VoteParams {
    pub song_id: SongId,
    pub amount: u128,
}

/// Parameters for `Party::SetSongFee`
#[derive(Clone, Debug, SerialEncodable, SerialDecodable)]
pub struct SetSongFeeParams {
    pub fee_bps: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_display_roundtrip() {
        let addr = Address::account(3);
        let shown = addr.to_string();
        assert!(shown.starts_with("0x"));
        assert_eq!(shown.len(), 2 + ADDRESS_LEN * 2);
        assert_eq!(Address::from_str(&shown).unwrap(), addr);
        assert_eq!(Address::from_str(&shown[2..]).unwrap(), addr);
    }

    #[test]
    fn address_rejects_garbage() {
        assert!(Address::from_str("0x1234").is_err());
        assert!(Address::from_str("not hex at all").is_err());
    }

    #[test]
    fn derived_addresses_are_distinct() {
        let deployer = Address::account(0);
        assert_ne!(Address::account(0), Address::account(1));
        assert_ne!(Address::contract(&deployer, 0), Address::contract(&deployer, 1));
        assert_ne!(Address::contract(&deployer, 0), deployer);
    }
}

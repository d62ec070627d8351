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

/// Result type used by the party contracts
pub type ContractResult<T> = std::result::Result<T, PartyError>;

/// Precondition failures raised by `OPVotes`, `OPSongs` and `OpenParty`.
/// Every one of them is returned before any state is touched.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartyError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Insufficient vote token balance")]
    InsufficientBalance,

    #[error("Insufficient vote token allowance")]
    InsufficientAllowance,

    #[error("Caller is not the party owner")]
    Unauthorized,

    #[error("Voting is already open")]
    AlreadyOpen,

    #[error("Voting is already closed")]
    AlreadyClosed,

    #[error("Voting is not open")]
    VotingNotOpen,

    #[error("Voting is still open")]
    VotingStillOpen,

    #[error("Song does not exist")]
    UnknownSong,

    #[error("Song URI is empty")]
    EmptyURI,

    #[error("No songs have been minted")]
    NoSongs,

    #[error("Fee must be within 0 and 10000 basis points")]
    InvalidFee,

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Unknown contract function")]
    InvalidFunction,
}

impl PartyError {
    /// Stable numeric code for the error, as shown to operators.
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidAmount => 1,
            Self::InsufficientBalance => 2,
            Self::InsufficientAllowance => 3,
            Self::Unauthorized => 4,
            Self::AlreadyOpen => 5,
            Self::AlreadyClosed => 6,
            Self::VotingNotOpen => 7,
            Self::VotingStillOpen => 8,
            Self::UnknownSong => 9,
            Self::EmptyURI => 10,
            Self::NoSongs => 11,
            Self::InvalidFee => 12,
            Self::Overflow => 13,
            Self::InvalidFunction => 14,
        }
    }
}

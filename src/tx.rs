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

use std::fmt;

use darkfi_serial::{deserialize, serialize, Decodable, SerialDecodable, SerialEncodable};

use crate::{
    contract::{model::Address, PartyFunction},
    Error, Result,
};

/// A call into the party contracts, submitted to the host ledger.
#[derive(Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub struct Transaction {
    pub caller: Address,
    /// Native value attached to the call
    pub value: u128,
    /// Function selector byte followed by the serialized call parameters
    pub calldata: Vec<u8>,
}

impl Transaction {
    /// Decode the function selector.
    pub fn function(&self) -> Result<PartyFunction> {
        let Some(selector) = self.calldata.first() else {
            return Err(Error::DecodeError("Empty calldata"))
        };

        Ok(PartyFunction::try_from(*selector)?)
    }

    /// Decode the call parameters following the selector.
    pub fn params<T: Decodable>(&self) -> Result<T> {
        let Some(data) = self.calldata.get(1..) else {
            return Err(Error::DecodeError("Empty calldata"))
        };

        let Ok(params) = deserialize(data) else {
            return Err(Error::DecodeError("Malformed call parameters"))
        };

        Ok(params)
    }

    /// Hash of the transaction as included at `nonce`.
    pub fn hash(&self, nonce: u64) -> TransactionHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&serialize(self));
        hasher.update(&nonce.to_le_bytes());
        TransactionHash(*hasher.finalize().as_bytes())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, SerialEncodable, SerialDecodable)]
pub struct TransactionHash(pub [u8; 32]);

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionHash({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{client, model::VoteParams, model::SongId, error::PartyError};

    #[test]
    fn decode_selector_and_params() {
        let alice = Address::account(1);
        let tx = client::vote_tx(alice, SongId(4), 77).unwrap();

        assert_eq!(tx.function().unwrap(), PartyFunction::Vote);
        let params: VoteParams = tx.params().unwrap();
        assert_eq!(params.song_id, SongId(4));
        assert_eq!(params.amount, 77);
    }

    #[test]
    fn reject_bad_calldata() {
        let alice = Address::account(1);

        let tx = Transaction { caller: alice, value: 0, calldata: vec![] };
        assert!(matches!(tx.function(), Err(Error::DecodeError(_))));

        let tx = Transaction { caller: alice, value: 0, calldata: vec![0xff] };
        assert!(matches!(tx.function(), Err(Error::Contract(PartyError::InvalidFunction))));

        let tx = Transaction { caller: alice, value: 0, calldata: vec![PartyFunction::Vote as u8, 1] };
        assert!(matches!(tx.params::<VoteParams>(), Err(Error::DecodeError(_))));
    }

    #[test]
    fn hash_depends_on_nonce() {
        let tx = client::open_voting_tx(Address::account(0));
        assert_eq!(tx.hash(1), tx.hash(1));
        assert_ne!(tx.hash(1), tx.hash(2));
    }
}

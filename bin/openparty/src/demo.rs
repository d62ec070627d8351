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

use log::{info, warn};

use openparty::{contract::ONE_TOKEN, Result};

use crate::console::Console;

/// Songs minted by the seeded accounts, one each
pub const DEMO_SONGS: [&str; 8] = [
    "bafybeidb3emtxhhsbriksv5qywtw4rh6uie7dzh7qaj25fruw5gx3fir6y",
    "bafybeihxgoyvfnpqvnc2fiffa3ab22jjlnrv7bgtjoryotzc7znylrkk4m",
    "bafybeifgoud5o33ckk54hfthanzazavhudittzq26h3ozezmq6zidej7au",
    "bafybeib2kh7iuziuhhocxre4qfi2q5zje7qafadeu6dybb4tnhylnft454",
    "bafybeiatvogo2vwu7qkvyj4tadx4nzh7z7zeca2lvvjjqjtarbtk7rqdoi",
    "bafybeif4mq3ve4cq5frxj4sfqugupshl37ufzm2uaty3whmews3s7curg4",
    "bafybeibjq4kdgwgql7whhwsqlpnla4dvjim6zy37pcpt4z4gdyvmcppk7m",
    "bafybeidlrnqdjfg7kta24azusk2mxwb7bxpnswfuifdthbqbnuwv7tmlly",
];

/// Vote tokens every seeded account buys
pub const DEMO_TOKENS: u128 = 10_000_000 * ONE_TOKEN;

/// Accounts `1..=8` buy vote tokens and mint one demo song each.
/// Accounts that don't exist are skipped.
pub async fn seed(console: &Console) -> Result<()> {
    for (i, uri) in DEMO_SONGS.iter().enumerate() {
        let index = i + 1;
        if console.account(index).is_err() {
            warn!(target: "openparty::demo", "Account #{index} missing, not seeding it");
            continue
        }

        console.buy(index, DEMO_TOKENS).await?;
        console.mint(index, uri).await?;
    }

    info!(target: "openparty::demo", "Seeded demo accounts with songs");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use openparty::{
        chain::Chain,
        contract::model::{Address, PartyParams, SongId},
    };

    #[test]
    fn seed_mints_one_song_per_account() {
        smol::block_on(async {
            let accounts: Vec<Address> = (0..10).map(Address::account).collect();
            let genesis: Vec<_> = accounts.iter().map(|a| (*a, 10_000 * ONE_TOKEN)).collect();
            let params =
                PartyParams { ratio: 1_000_000, song_fee_bps: 1000, song_price: ONE_TOKEN };
            let chain = Chain::new(accounts[0], params, &genesis).unwrap().into_ptr();
            let console = Console::new(chain.clone(), accounts.clone());

            seed(&console).await.unwrap();

            let chain = chain.read().await;
            let songs = chain.party().songs_token();
            assert_eq!(songs.len(), 8);
            for (i, uri) in DEMO_SONGS.iter().enumerate() {
                let id = SongId(i as u64 + 1);
                assert_eq!(songs.owner_of(id).unwrap(), accounts[i + 1]);
                assert_eq!(songs.uri_of(id).unwrap(), *uri);
            }

            // 10,000,000 bought, 0.1 paid for the song
            let expected = DEMO_TOKENS - ONE_TOKEN / 10;
            assert_eq!(chain.party().votes_token().balance_of(&accounts[3]), expected);
            assert_eq!(chain.native_balance_of(&accounts[3]), 9_990 * ONE_TOKEN);
            assert_eq!(chain.party().votes_token().balance_of(&accounts[9]), 0);
        });
    }
}

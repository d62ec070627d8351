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

use log::info;

use openparty::{
    chain::{CallOutput, ChainPtr, Receipt},
    contract::{
        client,
        model::{Address, Song, SongId},
    },
    tx::Transaction,
    Error, Result,
};

use crate::{
    command::Command,
    common::{fmt_amount, prettytable_accounts, prettytable_songs, table_lines},
};

/// Operator console over the host ledger. Every handler returns the
/// lines to show to the operator.
pub struct Console {
    chain: ChainPtr,
    /// Demo accounts, addressed by index. Index 0 deployed the party.
    accounts: Vec<Address>,
}

impl Console {
    pub fn new(chain: ChainPtr, accounts: Vec<Address>) -> Self {
        Self { chain, accounts }
    }

    pub fn account(&self, index: usize) -> Result<Address> {
        match self.accounts.get(index) {
            Some(address) => Ok(*address),
            None => Err(Error::UnknownAccount(format!("#{index}"))),
        }
    }

    async fn submit(&self, tx: Transaction) -> Result<Receipt> {
        let receipt = self.chain.write().await.execute(&tx)?;
        info!(
            target: "openparty::console",
            "{:?} included at {}", receipt.function, receipt.tx_hash,
        );
        Ok(receipt)
    }

    /// Execute a parsed command.
    pub async fn handle(&self, command: &Command) -> Result<Vec<String>> {
        match command {
            Command::Help => Ok(help()),
            Command::Menu => Ok(menu()),
            Command::Exit => Ok(vec![]),
            Command::Accounts => self.accounts_table().await,
            Command::Balance { account } => self.balance(*account).await,
            Command::Buy { account, amount } => self.buy(*account, *amount).await,
            Command::Mint { account, uri } => self.mint(*account, uri).await,
            Command::Open { account } => self.open(*account).await,
            Command::Close { account } => self.close(*account).await,
            Command::Power { account } => self.power(*account).await,
            Command::Vote { account, song, amount } => self.vote(*account, *song, *amount).await,
            Command::Winner => self.winner().await,
            Command::Fee { account, fee_bps } => self.fee(*account, *fee_bps).await,
            Command::Transfer { from, to, amount } => self.transfer(*from, *to, *amount).await,
            Command::Songs => self.songs().await,
            Command::Status => self.status().await,
        }
    }

    /// Native, vote token and song holdings of an account.
    pub async fn balance(&self, index: usize) -> Result<Vec<String>> {
        let address = self.account(index)?;
        let chain = self.chain.read().await;
        let party = chain.party();

        let native = chain.native_balance_of(&address);
        let votes = party.votes_token().balance_of(&address);
        let mut lines = vec![
            format!("The account {address} has {} native coins", fmt_amount(native)),
            format!("The account {address} has {} OPV", fmt_amount(votes)),
        ];

        let songs = party.songs_token();
        let owned = songs.tokens_of_owner(&address);
        if owned.is_empty() {
            lines.push("The account does not own any songs".to_string());
            return Ok(lines)
        }

        lines.push(format!("The account {address} has {} OPS", songs.balance_of(&address)));
        for id in owned {
            lines.push(format!("The song {id} has the URI {}", songs.uri_of(id)?));
        }

        Ok(lines)
    }

    /// Buy `tokens` vote tokens, paying `tokens / ratio` native coins.
    pub async fn buy(&self, index: usize, tokens: u128) -> Result<Vec<String>> {
        let buyer = self.account(index)?;
        let ratio = self.chain.read().await.party().params().ratio;

        let receipt = self.submit(client::purchase_votes_tx(buyer, tokens / ratio)).await?;
        let CallOutput::Credited(credited) = receipt.output else {
            return Err(Error::ParseFailed("Unexpected purchase output"))
        };

        let mut lines = vec![format!("Bought {} OPV ({})", fmt_amount(credited), receipt.tx_hash)];
        lines.extend(self.balance(index).await?);
        Ok(lines)
    }

    /// Approve the party for the song fee and mint a song.
    pub async fn mint(&self, index: usize, uri: &str) -> Result<Vec<String>> {
        let minter = self.account(index)?;
        let party = self.chain.read().await.party().address();

        self.submit(client::approve_tx(minter, party, u128::MAX)?).await?;
        let receipt = self.submit(client::mint_song_tx(minter, uri)?).await?;
        let CallOutput::Minted(id) = receipt.output else {
            return Err(Error::ParseFailed("Unexpected mint output"))
        };

        let mut lines = vec![format!("Song {id} minted ({})", receipt.tx_hash)];
        lines.extend(self.balance(index).await?);
        Ok(lines)
    }

    pub async fn open(&self, index: usize) -> Result<Vec<String>> {
        let receipt = self.submit(client::open_voting_tx(self.account(index)?)).await?;
        Ok(vec![
            format!("Voting got opened at transaction {}", receipt.tx_hash),
            self.voting_status().await,
        ])
    }

    pub async fn close(&self, index: usize) -> Result<Vec<String>> {
        let receipt = self.submit(client::close_voting_tx(self.account(index)?)).await?;
        Ok(vec![
            format!("Voting got closed at transaction {}", receipt.tx_hash),
            self.voting_status().await,
        ])
    }

    async fn voting_status(&self) -> String {
        let status = if self.chain.read().await.party().votes_open() { "Opened" } else { "Closed" };
        format!("Voting status is {status}")
    }

    pub async fn power(&self, index: usize) -> Result<Vec<String>> {
        let address = self.account(index)?;
        let power = self.chain.read().await.party().voting_power(&address);
        Ok(vec![format!("The account {address} has {} voting power", fmt_amount(power))])
    }

    pub async fn vote(&self, index: usize, song: SongId, amount: u128) -> Result<Vec<String>> {
        let receipt = self.submit(client::vote_tx(self.account(index)?, song, amount)?).await?;
        Ok(vec![
            format!("Voted at transaction {}", receipt.tx_hash),
            format!("Voted for song {song} with {} OPV", fmt_amount(amount)),
        ])
    }

    pub async fn winner(&self) -> Result<Vec<String>> {
        let chain = self.chain.read().await;
        let party = chain.party();
        let id = party.winning_song()?;
        let song = party.songs_token().get(id)?;
        Ok(vec![format!(
            "The winning song is {id} with {} votes, URI {}",
            fmt_amount(song.score),
            song.uri
        )])
    }

    pub async fn fee(&self, index: usize, fee_bps: u64) -> Result<Vec<String>> {
        let receipt = self.submit(client::set_song_fee_tx(self.account(index)?, fee_bps)?).await?;
        let fee = self.chain.read().await.party().song_fee()?;
        Ok(vec![format!(
            "Song fee set to {fee_bps} bps, {} OPV per song ({})",
            fmt_amount(fee),
            receipt.tx_hash
        )])
    }

    pub async fn transfer(&self, from: usize, to: usize, amount: u128) -> Result<Vec<String>> {
        let recipient = self.account(to)?;
        let tx = client::transfer_tx(self.account(from)?, recipient, amount)?;
        let receipt = self.submit(tx).await?;
        Ok(vec![format!("Sent {} OPV to #{to} ({})", fmt_amount(amount), receipt.tx_hash)])
    }

    pub async fn songs(&self) -> Result<Vec<String>> {
        let chain = self.chain.read().await;
        let songs: Vec<Song> = chain.party().songs_token().iter().cloned().collect();
        if songs.is_empty() {
            return Ok(vec!["No songs minted yet".to_string()])
        }

        Ok(table_lines(&prettytable_songs(&songs, &self.accounts)))
    }

    pub async fn accounts_table(&self) -> Result<Vec<String>> {
        let chain = self.chain.read().await;
        let party = chain.party();

        let rows: Vec<_> = self
            .accounts
            .iter()
            .enumerate()
            .map(|(i, a)| {
                (
                    i,
                    *a,
                    chain.native_balance_of(a),
                    party.votes_token().balance_of(a),
                    party.songs_token().balance_of(a),
                )
            })
            .collect();

        Ok(table_lines(&prettytable_accounts(&rows)))
    }

    pub async fn status(&self) -> Result<Vec<String>> {
        let chain = self.chain.read().await;
        let party = chain.party();
        let params = party.params();
        let session = party.session();
        let votes = party.votes_token();

        let opened_at = match session.opened_at {
            Some(t) => t.to_string(),
            None => "-".to_string(),
        };
        let closed_at = match session.closed_at {
            Some(t) => t.to_string(),
            None => "-".to_string(),
        };

        Ok(vec![
            format!("Party contract: {} (owner {})", party.address(), party.owner()),
            format!("Voting open: {} (round {})", party.votes_open(), session.round),
            format!("Opened at: {opened_at}, closed at: {closed_at}"),
            format!("Ratio: {} OPV base units per native base unit", params.ratio),
            format!(
                "Song price: {} OPV, fee {} bps ({} OPV)",
                fmt_amount(params.song_price),
                params.song_fee_bps,
                fmt_amount(party.song_fee()?)
            ),
            format!(
                "Songs minted: {}, votes cast: {}",
                party.songs_token().len(),
                party.vote_records().len()
            ),
            format!(
                "OPV supply: {} (minted {}, burned {})",
                fmt_amount(votes.total_supply()),
                fmt_amount(votes.total_minted()),
                fmt_amount(votes.total_burned())
            ),
            format!(
                "Party native balance: {}",
                fmt_amount(chain.native_balance_of(&party.address()))
            ),
            format!("Transactions executed: {}", chain.nonce()),
        ])
    }
}

pub fn help() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "\thelp: Prints the help message".to_string(),
        "\tmenu: Prints the numbered operations menu".to_string(),
        "\taccounts: Lists every account with its balances".to_string(),
        "\tbalance {index}: Shows the balances and songs of an account".to_string(),
        "\tbuy {index} {tokens}: Buys vote tokens, paying tokens / ratio".to_string(),
        "\tmint {index} {uri}: Approves the song fee and mints a song".to_string(),
        "\topen {index}: Opens voting (owner only)".to_string(),
        "\tclose {index}: Closes voting (owner only)".to_string(),
        "\tpower {index}: Shows the voting power of an account".to_string(),
        "\tvote {index} {song_id} {tokens}: Spends vote tokens on a song".to_string(),
        "\twinner: Shows the winning song once voting is closed".to_string(),
        "\tfee {index} {basis_points}: Changes the song fee (owner only)".to_string(),
        "\ttransfer {from} {to} {tokens}: Sends vote tokens".to_string(),
        "\tsongs: Lists every minted song".to_string(),
        "\tstatus: Shows the party state".to_string(),
        "\texit: Leaves the console".to_string(),
    ]
}

pub fn menu() -> Vec<String> {
    vec![
        "Select operation:".to_string(),
        " [0]: Exit".to_string(),
        " [1]: Print Menu".to_string(),
        " [2]: Display Wallet Balances {index}".to_string(),
        " [3]: Buy Vote Tokens {index} {tokens}".to_string(),
        " [4]: Mint A Song {index} {uri}".to_string(),
        " [5]: Open Voting {index}".to_string(),
        " [6]: Close Voting {index}".to_string(),
        " [7]: Check Voting Power {index}".to_string(),
        " [8]: Vote For Song {index} {song_id} {tokens}".to_string(),
        " [9]: Get Winning Song".to_string(),
        " [10]: Change Song Fee {index} {basis_points}".to_string(),
    ]
}

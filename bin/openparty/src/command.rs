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

use std::str::FromStr;

use openparty::{
    contract::model::SongId,
    util::parse::{decode_base10, DECIMALS},
    Error, Result,
};

/// Console commands. Accounts are referred to by their index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Menu,
    Accounts,
    Balance { account: usize },
    /// Buy `amount` vote tokens, paying `amount / ratio` native coins
    Buy { account: usize, amount: u128 },
    Mint { account: usize, uri: String },
    Open { account: usize },
    Close { account: usize },
    Power { account: usize },
    Vote { account: usize, song: SongId, amount: u128 },
    Winner,
    Fee { account: usize, fee_bps: u64 },
    Transfer { from: usize, to: usize, amount: u128 },
    Songs,
    Status,
    Exit,
}

/// Command words, in completion order
pub const COMMANDS: &[&str] = &[
    "help", "menu", "accounts", "balance", "buy", "mint", "open", "close", "power", "vote",
    "winner", "fee", "transfer", "songs", "status", "exit",
];

/// Menu numbers map onto command words
fn menu_alias(word: &str) -> &str {
    match word {
        "0" => "exit",
        "1" => "menu",
        "2" => "balance",
        "3" => "buy",
        "4" => "mint",
        "5" => "open",
        "6" => "close",
        "7" => "power",
        "8" => "vote",
        "9" => "winner",
        "10" => "fee",
        _ => word,
    }
}

/// Arguments to a command, with the usage line to report on misuse.
struct Args<'a> {
    parts: &'a [&'a str],
    usage: &'static str,
}

impl<'a> Args<'a> {
    fn expect(parts: &'a [&'a str], count: usize, usage: &'static str) -> Result<Self> {
        if parts.len() != count {
            return Err(Error::ParseFailed(usage))
        }
        Ok(Self { parts, usage })
    }

    fn index(&self, i: usize) -> Result<usize> {
        Ok(usize::from_str(self.parts[i])?)
    }

    fn amount(&self, i: usize) -> Result<u128> {
        match decode_base10(self.parts[i], DECIMALS, true) {
            Ok(v) => Ok(v),
            Err(_) => Err(Error::ParseFailed(self.usage)),
        }
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((word, rest)) = parts.split_first() else {
            return Err(Error::ParseFailed("Empty command"))
        };

        let command = match menu_alias(word) {
            "help" => Self::Help,
            "menu" => Self::Menu,
            "accounts" => Self::Accounts,
            "winner" => Self::Winner,
            "songs" => Self::Songs,
            "status" => Self::Status,
            "exit" | "quit" => Self::Exit,

            "balance" => {
                let args = Args::expect(rest, 1, "Usage: balance {index}")?;
                Self::Balance { account: args.index(0)? }
            }

            "buy" => {
                let args = Args::expect(rest, 2, "Usage: buy {index} {tokens}")?;
                Self::Buy { account: args.index(0)?, amount: args.amount(1)? }
            }

            "mint" => {
                // URIs may contain spaces, so join everything after the index
                if rest.len() < 2 {
                    return Err(Error::ParseFailed("Usage: mint {index} {uri}"))
                }
                let account = usize::from_str(rest[0])?;
                Self::Mint { account, uri: rest[1..].join(" ") }
            }

            "open" => {
                let args = Args::expect(rest, 1, "Usage: open {index}")?;
                Self::Open { account: args.index(0)? }
            }

            "close" => {
                let args = Args::expect(rest, 1, "Usage: close {index}")?;
                Self::Close { account: args.index(0)? }
            }

            "power" => {
                let args = Args::expect(rest, 1, "Usage: power {index}")?;
                Self::Power { account: args.index(0)? }
            }

            "vote" => {
                let args = Args::expect(rest, 3, "Usage: vote {index} {song_id} {tokens}")?;
                let song = SongId(u64::from_str(args.parts[1])?);
                Self::Vote { account: args.index(0)?, song, amount: args.amount(2)? }
            }

            "fee" => {
                let args = Args::expect(rest, 2, "Usage: fee {index} {basis_points}")?;
                Self::Fee { account: args.index(0)?, fee_bps: u64::from_str(args.parts[1])? }
            }

            "transfer" => {
                let args = Args::expect(rest, 3, "Usage: transfer {from} {to} {tokens}")?;
                Self::Transfer { from: args.index(0)?, to: args.index(1)?, amount: args.amount(2)? }
            }

            _ => return Err(Error::ParseFailed("Unrecognized command, try `help`")),
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openparty::contract::ONE_TOKEN;

    fn parse(line: &str) -> Command {
        Command::from_str(line).unwrap()
    }

    #[test]
    fn words_and_menu_numbers_agree() {
        assert_eq!(parse("0"), Command::Exit);
        assert_eq!(parse("1"), Command::Menu);
        assert_eq!(parse("2 3"), parse("balance 3"));
        assert_eq!(parse("3 1 10000000"), parse("buy 1 10000000"));
        assert_eq!(parse("4 2 bafy"), parse("mint 2 bafy"));
        assert_eq!(parse("5 0"), Command::Open { account: 0 });
        assert_eq!(parse("6 0"), Command::Close { account: 0 });
        assert_eq!(parse("7 4"), Command::Power { account: 4 });
        assert_eq!(parse("8 1 2 5"), parse("vote 1 2 5"));
        assert_eq!(parse("9"), Command::Winner);
        assert_eq!(parse("10 0 250"), Command::Fee { account: 0, fee_bps: 250 });
    }

    #[test]
    fn amounts_are_base10() {
        assert_eq!(parse("buy 1 9.9"), Command::Buy { account: 1, amount: 99 * ONE_TOKEN / 10 });
        assert_eq!(
            parse("vote 2 3 0.5"),
            Command::Vote { account: 2, song: SongId(3), amount: ONE_TOKEN / 2 }
        );
        assert_eq!(
            parse("transfer 1 2 3"),
            Command::Transfer { from: 1, to: 2, amount: 3 * ONE_TOKEN }
        );
    }

    #[test]
    fn mint_joins_uri_words() {
        assert_eq!(
            parse("mint 1 ipfs://bafy  with spaces"),
            Command::Mint { account: 1, uri: "ipfs://bafy with spaces".to_string() }
        );
    }

    #[test]
    fn malformed_commands() {
        assert!(Command::from_str("").is_err());
        assert!(Command::from_str("dance").is_err());
        assert!(Command::from_str("balance").is_err());
        assert!(Command::from_str("balance x").is_err());
        assert!(Command::from_str("buy 1 1.2.3").is_err());
        assert!(Command::from_str("vote 1 2").is_err());
        assert!(Command::from_str("mint 1").is_err());
        assert!(Command::from_str("fee 0 -1").is_err());
        assert!(Command::from_str("buy 1 é.").is_err());
        assert!(Command::from_str("vote 1 1 é.").is_err());
        assert!(Command::from_str("transfer 0 1 ü.5").is_err());
    }
}

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

use std::fs::{self, File};

use log::{debug, info};
use serde::Deserialize;
use simplelog::{ColorChoice, TermLogger, TerminalMode, WriteLogger};
use structopt::StructOpt;
use structopt_toml::StructOptToml;

use openparty::{
    chain::Chain,
    cli_desc,
    contract::model::{Address, PartyParams},
    util::{
        cli::{get_log_config, get_log_level, spawn_config},
        parse::{decode_base10, DECIMALS},
        path::{expand_path, get_config_path},
    },
    Error, Result,
};

/// Typed console commands and their parser
mod command;

/// Output formatting helpers
mod common;

/// Command handlers over the host ledger
mod console;
use console::Console;

/// Demo account seeding
mod demo;

/// Interactive and batch shells
mod interactive;
use interactive::{batch, interactive};

const CONFIG_FILE: &str = "openparty_config.toml";
const CONFIG_FILE_CONTENTS: &str = include_str!("../openparty_config.toml");

#[derive(Clone, Debug, Deserialize, StructOpt, StructOptToml)]
#[serde(default)]
#[structopt(name = "openparty", about = cli_desc!())]
struct Args {
    #[structopt(short, long)]
    /// Configuration file to use
    config: Option<String>,

    #[structopt(long, default_value = "10")]
    /// Number of demo accounts funded at genesis
    accounts: u64,

    #[structopt(long, default_value = "10000")]
    /// Native coins credited to every demo account
    native_balance: String,

    #[structopt(long, default_value = "1000000")]
    /// Vote token base units credited per native base unit paid
    ratio: u64,

    #[structopt(long, default_value = "1000")]
    /// Song mint fee in basis points of the song price
    song_fee: u64,

    #[structopt(long, default_value = "1")]
    /// Song price in vote tokens
    song_price: String,

    #[structopt(long)]
    /// Skip buying tokens and minting the demo songs
    no_seed: bool,

    #[structopt(long, default_value = "~/.local/share/openparty/history.txt")]
    /// Shell history file
    history: String,

    #[structopt(long)]
    /// Read commands from stdin instead of the interactive shell
    batch: bool,

    #[structopt(short, long)]
    /// Set log file to output into
    log: Option<String>,

    #[structopt(short, parse(from_occurrences))]
    /// Increase verbosity (-vvv supported)
    verbose: u8,
}

fn init_logger(args: &Args) -> Result<()> {
    let log_level = get_log_level(args.verbose as u64);
    let log_config = get_log_config(args.verbose as u64);

    match &args.log {
        Some(path) => {
            let path = expand_path(path)?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            WriteLogger::init(log_level, log_config, File::create(path)?)?;
        }
        None => {
            TermLogger::init(log_level, log_config, TerminalMode::Mixed, ColorChoice::Auto)?
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    // Parse once to find the config file, then again with its contents
    let Ok(args) = Args::from_args_with_toml("") else { return Err(Error::ConfigInvalid) };
    let cfg_path = get_config_path(args.config, CONFIG_FILE)?;
    spawn_config(&cfg_path, CONFIG_FILE_CONTENTS.as_bytes())?;
    let Ok(contents) = fs::read_to_string(&cfg_path) else { return Err(Error::ConfigNotFound) };
    let Ok(args) = Args::from_args_with_toml(&contents) else { return Err(Error::ConfigInvalid) };

    init_logger(&args)?;
    debug!(target: "openparty", "Executing with args: {args:?}");

    if args.accounts == 0 {
        return Err(Error::ParseFailed("At least one account is needed to deploy the party"))
    }

    let params = PartyParams {
        ratio: args.ratio as u128,
        song_fee_bps: args.song_fee,
        song_price: decode_base10(&args.song_price, DECIMALS, true)?,
    };
    let native_balance = decode_base10(&args.native_balance, DECIMALS, true)?;

    let accounts: Vec<Address> = (0..args.accounts).map(Address::account).collect();
    let genesis: Vec<(Address, u128)> = accounts.iter().map(|a| (*a, native_balance)).collect();

    // Account 0 deploys, and so owns, the party
    let chain = Chain::new(accounts[0], params, &genesis)?;
    info!(target: "openparty", "Party deployed at {}", chain.party().address());
    let console = Console::new(chain.into_ptr(), accounts);

    smol::block_on(async {
        if !args.no_seed {
            demo::seed(&console).await?;
        }

        if args.batch {
            return batch(&console).await
        }

        interactive(&console, &args.history).await;
        Ok(())
    })
}

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

use prettytable::{format, row, Table};

use openparty::{
    contract::model::{Address, Song},
    util::parse::{encode_base10, DECIMALS},
};

/// Format a base-unit amount for display
pub fn fmt_amount(amount: u128) -> String {
    encode_base10(amount, DECIMALS)
}

/// Split a rendered table into output lines
pub fn table_lines(table: &Table) -> Vec<String> {
    table.to_string().lines().map(|l| l.to_string()).collect()
}

pub fn prettytable_accounts(accounts: &[(usize, Address, u128, u128, usize)]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(row!["Index", "Address", "Native", "OPV", "OPS"]);
    for (index, address, native, votes, songs) in accounts {
        table.add_row(row![index, address, fmt_amount(*native), fmt_amount(*votes), songs]);
    }

    table
}

pub fn prettytable_songs(songs: &[Song], accounts: &[Address]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(row!["Song ID", "Owner", "URI", "Score"]);
    for song in songs {
        let owner = match accounts.iter().position(|a| a == &song.owner) {
            Some(index) => format!("#{index}"),
            None => song.owner.to_string(),
        };

        table.add_row(row![song.id, owner, song.uri, fmt_amount(song.score)]);
    }

    table
}

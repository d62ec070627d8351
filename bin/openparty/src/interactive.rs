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

use std::{fs, io::ErrorKind, path::Path, str::FromStr};

use libc::{fcntl, F_GETFL, F_SETFL, O_NONBLOCK};
use linenoise_rs::{
    linenoise_history_add, linenoise_history_load, linenoise_history_save,
    linenoise_set_completion_callback, linenoise_set_hints_callback, LinenoiseState,
};
use log::{debug, warn};
use smol::{
    io::{AsyncBufReadExt, BufReader},
    stream::StreamExt,
};

use openparty::{
    cli_desc,
    util::{path::expand_path, time::msleep},
    Error, Result,
};

use crate::{
    command::{Command, COMMANDS},
    console::{help, Console},
};

/// Auxiliary function to define the interactive shell completions.
fn completion(buf: &str, lc: &mut Vec<String>) {
    // Menu numbers don't complete
    if buf.is_empty() || buf.contains(' ') {
        return
    }

    for command in COMMANDS {
        if command.starts_with(buf) {
            lc.push(command.to_string());
        }
    }
}

/// Auxiliary function to define the interactive shell hints.
fn hints(buf: &str) -> Option<(String, i32, bool)> {
    // 35 = magenta
    match buf {
        "balance " | "2 " => Some(("{index}".to_string(), 35, false)),
        "buy " | "3 " => Some(("{index} {tokens}".to_string(), 35, false)),
        "mint " | "4 " => Some(("{index} {uri}".to_string(), 35, false)),
        "open " | "5 " => Some(("{index}".to_string(), 35, false)),
        "close " | "6 " => Some(("{index}".to_string(), 35, false)),
        "power " | "7 " => Some(("{index}".to_string(), 35, false)),
        "vote " | "8 " => Some(("{index} {song_id} {tokens}".to_string(), 35, false)),
        "fee " | "10 " => Some(("{index} {basis_points}".to_string(), 35, false)),
        "transfer " => Some(("{from} {to} {tokens}".to_string(), 35, false)),
        _ => None,
    }
}

/// Parse and run a single line, printing its output.
/// Returns `false` once the operator asked to leave.
async fn handle_line(console: &Console, line: &str) -> bool {
    let command = match Command::from_str(line) {
        Ok(c) => c,
        Err(e) => {
            println!("{e}");
            return true
        }
    };

    if command == Command::Exit {
        return false
    }

    match console.handle(&command).await {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(Error::Contract(e)) => println!("Contract error {}: {e}", e.code()),
        Err(e) => println!("Error while executing {line}: {e}"),
    }

    true
}

/// Auxiliary function to start the console as an interactive shell.
/// Only sane/linenoise terminals are suported.
pub async fn interactive(console: &Console, history_path: &str) {
    // Expand the history file path
    let history_path = match expand_path(history_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error while expanding history file path: {e}");
            return
        }
    };
    let Some(history_file) = history_path.to_str() else {
        eprintln!("History file path is not valid UTF-8");
        return
    };

    // Set the completion callback. This will be called every time the
    // user uses the <tab> key.
    linenoise_set_completion_callback(completion);

    // Set the shell hints
    linenoise_set_hints_callback(hints);

    // Load history from file. The history file is just a plain text file
    // where entries are separated by newlines.
    let _ = linenoise_history_load(history_file);

    println!("{}", cli_desc!());
    for line in help() {
        println!("{line}");
    }

    // Start the interactive shell
    loop {
        // Grab input or end if Ctrl-D or Ctrl-C was pressed
        let Some(line) = listen_for_line().await else { break };

        let line = line.trim();
        if line.is_empty() {
            continue
        }

        // Add line to history
        linenoise_history_add(line);

        if !handle_line(console, line).await {
            break
        }
    }

    // Write history file
    if !create_history_dir(&history_path) {
        return
    }
    if let Err(e) = linenoise_history_save(history_file) {
        warn!(target: "openparty::interactive", "Failed saving history to {history_file}: {e}");
    }
}

/// Create the directory holding the history file.
/// Returns `false` when it could not be created.
fn create_history_dir(history_path: &Path) -> bool {
    let Some(parent) = history_path.parent() else { return true };
    if let Err(e) = fs::create_dir_all(parent) {
        warn!(
            target: "openparty::interactive",
            "Failed creating history directory {}: {e}", parent.display(),
        );
        return false
    }

    true
}

/// Auxiliary function to listen for a linenoise input line.
async fn listen_for_line() -> Option<String> {
    // Generate the linoise state structure
    let mut state = match LinenoiseState::edit_start(-1, -1, "openparty> ") {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error while generating linenoise state: {e}");
            return None
        }
    };

    // Set stdin to non-blocking mode
    let fd = state.get_fd();
    unsafe {
        let flags = fcntl(fd, F_GETFL, 0);
        fcntl(fd, F_SETFL, flags | O_NONBLOCK);
    }

    // Read until we get a line to process
    let mut line = None;
    loop {
        match state.edit_feed() {
            Ok(Some(l)) => {
                line = Some(l);
                break
            }
            Ok(None) => break,
            Err(e) if e.kind() == ErrorKind::Interrupted => break,
            Err(e) if e.kind() == ErrorKind::WouldBlock => {
                // No data available, yield and retry
                msleep(10).await;
                continue
            }
            Err(e) => {
                eprintln!("Error while reading linenoise feed: {e}");
                break
            }
        }
    }

    // Restore blocking mode
    unsafe {
        let flags = fcntl(fd, F_GETFL, 0);
        fcntl(fd, F_SETFL, flags & !O_NONBLOCK);
    }

    let _ = state.edit_stop();
    line
}

/// Run commands read line by line from stdin, without line editing.
/// Lines starting with `#` are skipped.
pub async fn batch(console: &Console) -> Result<()> {
    let lines = BufReader::new(smol::Unblock::new(std::io::stdin())).lines();
    smol::pin!(lines);

    while let Some(line) = lines.next().await {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue
        }

        debug!(target: "openparty::batch", "> {line}");
        println!("> {line}");
        if !handle_line(console, line).await {
            break
        }
    }

    Ok(())
}

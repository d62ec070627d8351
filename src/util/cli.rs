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

use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};

use simplelog::{ConfigBuilder, LevelFilter};

use crate::Result;

/// Build a leaked static description string out of the calling crate's
/// package metadata, for use in `structopt(about = ...)`.
#[macro_export]
macro_rules! cli_desc {
    () => {{
        let desc = format!(
            "{} {}\n{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_DESCRIPTION"),
        );

        Box::leak(desc.into_boxed_str()) as &'static str
    }};
}

/// Map `-v` occurrences to a log level.
pub fn get_log_level(verbosity_level: u64) -> LevelFilter {
    match verbosity_level {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Build a `simplelog` config. Targets can be filtered through the
/// `LOG_TARGETS` environment variable, e.g. `LOG_TARGETS="openparty::party,!openparty::chain"`.
pub fn get_log_config(verbosity_level: u64) -> simplelog::Config {
    let mut cfg = ConfigBuilder::new();

    if verbosity_level < 2 {
        cfg.set_target_level(LevelFilter::Off);
    } else {
        cfg.set_target_level(LevelFilter::Error);
    }

    if let Ok(targets) = std::env::var("LOG_TARGETS") {
        for target in targets.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match target.strip_prefix('!') {
                Some(ignored) => {
                    cfg.add_filter_ignore(ignored.to_string());
                }
                None => {
                    cfg.add_filter_allow(target.to_string());
                }
            }
        }
    }

    cfg.build()
}

/// Write the given default contents to `path` if no file exists there yet.
/// Returns `true` when a new file was spawned.
pub fn spawn_config(path: &Path, contents: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false)
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(contents)?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_to_level() {
        assert_eq!(get_log_level(0), LevelFilter::Info);
        assert_eq!(get_log_level(1), LevelFilter::Debug);
        assert_eq!(get_log_level(5), LevelFilter::Trace);
    }

    #[test]
    fn spawn_config_does_not_overwrite() {
        let dir = std::env::temp_dir().join(format!("openparty-cli-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        assert!(spawn_config(&path, b"ratio = 1\n").unwrap());
        assert!(!spawn_config(&path, b"ratio = 2\n").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "ratio = 1\n");

        let _ = fs::remove_dir_all(&dir);
    }
}

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

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use darkfi_serial::{SerialDecodable, SerialEncodable};

/// Wrapper struct to represent system timestamps, in seconds since
/// the UNIX epoch.
#[derive(
    Hash, Clone, Copy, Debug, SerialEncodable, SerialDecodable, PartialEq, PartialOrd, Ord, Eq,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Generate a `Timestamp` of the current time.
    pub fn current_time() -> Self {
        // A clock set before the epoch yields zero rather than failing
        let secs = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
        Self(secs)
    }

    /// Seconds elapsed since this `Timestamp`.
    pub fn elapsed(&self) -> u64 {
        Self::current_time().0.saturating_sub(self.0)
    }

    /// Return the inner `u64` value.
    pub fn inner(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sleep for any number of milliseconds.
pub async fn msleep(millis: u64) {
    smol::Timer::after(Duration::from_millis(millis)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_never_underflows() {
        let future = Timestamp(Timestamp::current_time().0 + 3600);
        assert_eq!(future.elapsed(), 0);
        assert!(Timestamp(0).elapsed() > 0);
    }
}

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// Slice of the match the statistics were scraped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    FullMatch,
    FirstHalf,
    SecondHalf,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::FullMatch, Period::FirstHalf, Period::SecondHalf];

    pub fn label(self) -> &'static str {
        match self {
            Period::FullMatch => "Full Match",
            Period::FirstHalf => "First Half",
            Period::SecondHalf => "Second Half",
        }
    }

    /// Period code used by the statistics source.
    pub fn code(self) -> &'static str {
        match self {
            Period::FullMatch => "ALL",
            Period::FirstHalf => "1ST",
            Period::SecondHalf => "2ND",
        }
    }

    pub fn csv_file_name(self) -> String {
        format!("matches_{}.csv", self.code())
    }

    pub fn file_stem(self) -> String {
        self.label().to_lowercase().replace(' ', "_")
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = raw.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match key.as_str() {
            "all" | "full" | "full match" => Ok(Period::FullMatch),
            "1st" | "first" | "first half" => Ok(Period::FirstHalf),
            "2nd" | "second" | "second half" => Ok(Period::SecondHalf),
            _ => Err(anyhow!("unknown period `{raw}`")),
        }
    }
}

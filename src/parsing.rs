use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator used by the scraped score strings ("2–1").
pub const RESULT_SEPARATOR: char = '–';

const NOT_AVAILABLE: &str = "N/A";

/// Goals for the first and second side of a score string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedResult {
    pub first: u32,
    pub second: u32,
}

impl ParsedResult {
    pub const fn new(first: u32, second: u32) -> Self {
        Self { first, second }
    }

    pub fn as_tuple(self) -> (u32, u32) {
        (self.first, self.second)
    }
}

impl fmt::Display for ParsedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.first, RESULT_SEPARATOR, self.second)
    }
}

/// Never fails: anything that is not `<int>–<int>` is a 0–0.
pub fn parse_result(raw: &str) -> ParsedResult {
    if raw.contains(NOT_AVAILABLE) {
        return ParsedResult::default();
    }
    let Some((first, second)) = raw.split_once(RESULT_SEPARATOR) else {
        return ParsedResult::default();
    };
    match (first.trim().parse::<u32>(), second.trim().parse::<u32>()) {
        (Ok(first), Ok(second)) => ParsedResult::new(first, second),
        _ => ParsedResult::default(),
    }
}

pub fn invert_result(result: ParsedResult) -> ParsedResult {
    ParsedResult::new(result.second, result.first)
}

pub fn format_result(result: ParsedResult) -> String {
    result.to_string()
}

/// Re-orients a raw score string to the opposite side, e.g. "2–1" -> "1–2".
pub fn invert_result_str(raw: &str) -> String {
    format_result(invert_result(parse_result(raw)))
}

/// Numeric value of one statistic cell. "19/35 (54%)" -> 19, "54%" -> 54,
/// "" or garbage -> 0.
pub fn parse_stat(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let number = match trimmed.split_once('/') {
        Some((numerator, _)) => numerator,
        None => trimmed.trim_end_matches('%'),
    };
    number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

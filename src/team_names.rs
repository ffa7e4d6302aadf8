use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::AliasError;

/// Canonical lowercase, hyphen-separated team identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamSlug(String);

impl TeamSlug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for TeamSlug {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TeamSlug {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

const PREMIER_LEAGUE_ALIASES: &[(&str, &str)] = &[
    ("manchester utd", "man-utd"),
    ("manchester united", "man-utd"),
    ("man utd", "man-utd"),
    ("man united", "man-utd"),
    ("fulham", "fulham"),
    ("ipswich town", "ipswich"),
    ("liverpool", "liverpool"),
    ("newcastle utd", "newcastle"),
    ("newcastle united", "newcastle"),
    ("nott'ham forest", "forest"),
    ("nottingham forest", "forest"),
    ("southampton", "southampton"),
    ("west ham", "west-ham"),
    ("west ham united", "west-ham"),
    ("aston villa", "aston-villa"),
    ("crystal palace", "crystal-palace"),
    ("brentford", "brentford"),
    ("manchester city", "man-city"),
    ("man city", "man-city"),
    ("leicester city", "leicester"),
    ("chelsea", "chelsea"),
    ("everton", "everton"),
    ("tottenham", "tottenham"),
    ("tottenham hotspur", "tottenham"),
    ("wolves", "wolves"),
    ("wolverhampton wanderers", "wolves"),
    ("arsenal", "arsenal"),
    ("brighton", "brighton"),
    ("brighton & hove albion", "brighton"),
    ("brighton-and-hove-albion", "brighton"),
    ("bournemouth", "bournemouth"),
    ("afc bournemouth", "bournemouth"),
];

static PREMIER_LEAGUE: Lazy<AliasTable> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(PREMIER_LEAGUE_ALIASES.len());
    for (raw, slug) in PREMIER_LEAGUE_ALIASES {
        map.insert((*raw).to_string(), (*slug).to_string());
    }
    AliasTable { map }
});

/// Immutable raw-name -> slug lookup. Keys are trimmed and lower-cased,
/// targets are slugs that are fixed points of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    map: HashMap<String, String>,
}

impl AliasTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn premier_league() -> Self {
        PREMIER_LEAGUE.clone()
    }

    /// Builds a table from raw `(name, slug)` pairs. Targets are slugified and
    /// chains (`a -> b`, `b -> c`) are collapsed so every lookup lands on a
    /// slug that normalizes to itself.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, AliasError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = HashMap::new();
        for (key, target) in pairs {
            let key = key.as_ref().trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            let target = slugify(&target.as_ref().trim().to_lowercase());
            if target.is_empty() {
                return Err(AliasError::EmptyTarget { alias: key });
            }
            raw.insert(key, target);
        }

        let mut map = HashMap::with_capacity(raw.len());
        for (key, target) in &raw {
            map.insert(key.clone(), resolve_chain(&raw, key, target)?);
        }
        Ok(Self { map })
    }

    /// Returns a new table with `overrides` layered on top of `self`.
    pub fn merged_with(&self, overrides: &AliasTable) -> Result<Self, AliasError> {
        let pairs = self
            .map
            .iter()
            .filter(|(k, _)| !overrides.map.contains_key(*k))
            .chain(overrides.map.iter())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<Vec<_>>();
        Self::from_pairs(pairs)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let pairs: HashMap<String, String> =
            serde_json::from_str(raw).context("alias file is not a JSON object of strings")?;
        Ok(Self::from_pairs(pairs)?)
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed reading alias file {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("invalid alias file {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }
}

fn resolve_chain(
    raw: &HashMap<String, String>,
    key: &str,
    first: &str,
) -> Result<String, AliasError> {
    let mut current = first.to_string();
    for _ in 0..=raw.len() {
        match raw.get(&current) {
            Some(next) if *next != current => current = next.clone(),
            _ => return Ok(current),
        }
    }
    Err(AliasError::Cycle {
        alias: key.to_string(),
    })
}

fn slugify(lower: &str) -> String {
    lower.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Maps scraped team names onto canonical slugs. Total: any input yields a slug.
#[derive(Debug, Clone, Default)]
pub struct TeamNormalizer {
    aliases: AliasTable,
}

impl TeamNormalizer {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn normalize(&self, raw: &str) -> TeamSlug {
        let lower = raw.trim().to_lowercase();
        if let Some(slug) = self.aliases.get(&lower) {
            return TeamSlug(slug.to_string());
        }
        let slug = slugify(&lower);
        // The slug form may itself be an alias key ("brighton-and-hove-albion").
        match self.aliases.get(&slug) {
            Some(target) => TeamSlug(target.to_string()),
            None => TeamSlug(slug),
        }
    }
}

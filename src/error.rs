use thiserror::Error;

/// Structural problems in scraped rows. Everything else (bad scores, bad stat
/// cells, unknown teams) is tolerated with a fallback value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("malformed input row {row}: missing `{field}` field")]
    MissingField { row: usize, field: &'static str },
    #[error("malformed input row {row}: `{field}` is empty")]
    EmptyField { row: usize, field: &'static str },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AliasError {
    #[error("alias `{alias}` maps to an empty team name")]
    EmptyTarget { alias: String },
    #[error("alias `{alias}` is part of a cycle")]
    Cycle { alias: String },
}

pub mod averages;
pub mod corpus_csv;
pub mod engine;
pub mod error;
pub mod grouping;
pub mod lookup;
pub mod match_rows;
pub mod parsing;
pub mod period;
pub mod report;
pub mod report_export;
pub mod settings;
pub mod stat_fields;
pub mod team_names;

pub use engine::{EngineConfig, ReportEngine};
pub use error::{AliasError, IngestError};
pub use report::Report;

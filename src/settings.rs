use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::engine::EngineConfig;
use crate::lookup::DEFAULT_FORM_LIMIT;
use crate::period::Period;
use crate::team_names::AliasTable;

pub const DATA_DIR_ENV: &str = "H2H_DATA_DIR";
pub const OUTPUT_DIR_ENV: &str = "H2H_OUTPUT_DIR";
pub const ALIASES_PATH_ENV: &str = "H2H_ALIASES_PATH";
pub const FORM_LIMIT_ENV: &str = "H2H_FORM_LIMIT";

/// Runtime settings for the binaries: environment first, then command-line
/// flags on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub team_a: Option<String>,
    pub team_b: Option<String>,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub aliases_path: Option<PathBuf>,
    pub form_limit: usize,
    pub periods: Vec<Period>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            team_a: None,
            team_b: None,
            data_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            aliases_path: None,
            form_limit: DEFAULT_FORM_LIMIT,
            periods: Period::ALL.to_vec(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut out = Self::default();
        if let Some(dir) = non_empty(lookup(DATA_DIR_ENV)) {
            out.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = non_empty(lookup(OUTPUT_DIR_ENV)) {
            out.output_dir = PathBuf::from(dir);
        }
        out.aliases_path = non_empty(lookup(ALIASES_PATH_ENV)).map(PathBuf::from);
        if let Some(limit) = lookup(FORM_LIMIT_ENV).and_then(|v| v.trim().parse::<usize>().ok()) {
            out.form_limit = limit.max(1);
        }
        out
    }

    /// Applies `--flag=value` / `--flag value` arguments. Up to two bare
    /// arguments are taken as team names.
    pub fn apply_args<I, S>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.into_iter().map(Into::into).collect::<Vec<String>>();
        let mut positional = Vec::new();
        let mut idx = 0;
        while idx < args.len() {
            let arg = &args[idx];
            idx += 1;
            let Some(flag) = arg.strip_prefix("--") else {
                positional.push(arg.clone());
                continue;
            };
            let (name, value) = match flag.split_once('=') {
                Some((name, value)) => (name.to_string(), value.to_string()),
                None => {
                    let Some(next) = args.get(idx) else {
                        anyhow::bail!("missing value for --{flag}");
                    };
                    idx += 1;
                    (flag.to_string(), next.clone())
                }
            };
            let value = value.trim().to_string();
            match name.as_str() {
                "team-a" => self.team_a = Some(value),
                "team-b" => self.team_b = Some(value),
                "data-dir" => self.data_dir = PathBuf::from(value),
                "out-dir" => self.output_dir = PathBuf::from(value),
                "aliases" => self.aliases_path = Some(PathBuf::from(value)),
                "form-limit" => {
                    let limit = value
                        .parse::<usize>()
                        .map_err(|_| anyhow::anyhow!("invalid --form-limit `{value}`"))?;
                    self.form_limit = limit.max(1);
                }
                "period" => self.periods = vec![value.parse::<Period>()?],
                other => anyhow::bail!("unknown flag --{other}"),
            }
        }
        let mut positional = positional.into_iter();
        if self.team_a.is_none() {
            self.team_a = positional.next();
        }
        if self.team_b.is_none() {
            self.team_b = positional.next();
        }
        Ok(self)
    }

    pub fn teams(&self) -> Result<(&str, &str)> {
        match (self.team_a.as_deref(), self.team_b.as_deref()) {
            (Some(a), Some(b)) if !a.trim().is_empty() && !b.trim().is_empty() => Ok((a, b)),
            _ => anyhow::bail!("two team names are required (--team-a, --team-b)"),
        }
    }

    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut aliases = AliasTable::premier_league();
        if let Some(path) = &self.aliases_path {
            let overrides = AliasTable::load_json(path)?;
            info!(path = %path.display(), aliases = overrides.len(), "loaded team aliases");
            aliases = aliases.merged_with(&overrides)?;
        }
        Ok(EngineConfig {
            aliases,
            form_limit: self.form_limit,
            ..EngineConfig::default()
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Loads `.env.local` then `.env`; missing files are fine.
pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

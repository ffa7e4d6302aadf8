use std::sync::Arc;

pub const GOALS_SCORED: &str = "Goals scored";
pub const GOALS_CONCEDED: &str = "Goals conceded";

pub const DEFAULT_STAT_FIELDS: [&str; 49] = [
    "Accurate passes",
    "Aerial duels",
    "Ball possession",
    "Big chances",
    "Big chances missed",
    "Big chances scored",
    "Big saves",
    "Blocked shots",
    "Clearances",
    "Corner kicks",
    "Crosses",
    "Dispossessed",
    "Dribbles",
    "Duels",
    "Errors lead to a goal",
    "Errors lead to a shot",
    "Expected goals",
    "Final third entries",
    "Final third phase",
    "Fouled in final third",
    "Fouls",
    "Free kicks",
    "Goal kicks",
    "Goalkeeper saves",
    "Goals prevented",
    "Ground duels",
    "High claims",
    "Hit woodwork",
    "Interceptions",
    "Long balls",
    "Offsides",
    "Passes",
    "Penalty saves",
    "Punches",
    "Recoveries",
    "Red cards",
    "Shots inside box",
    "Shots off target",
    "Shots on target",
    "Shots outside box",
    "Tackles",
    "Tackles won",
    "Through balls",
    "Throw-ins",
    "Total saves",
    "Total shots",
    "Total tackles",
    "Touches in penalty area",
    "Yellow cards",
];

/// Ordered list of statistic columns every match row is read against.
/// Cheap to clone; shared between rows and reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSchema {
    fields: Arc<[String]>,
}

impl Default for StatSchema {
    fn default() -> Self {
        Self::new(DEFAULT_STAT_FIELDS)
    }
}

impl StatSchema {
    /// Duplicate names keep their first position.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !out.contains(&field) {
                out.push(field);
            }
        }
        Self {
            fields: out.into(),
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    /// Same fields in the same order; shared schemas compare by pointer.
    pub fn same_as(&self, other: &StatSchema) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields) || self.fields == other.fields
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Column order of the averages table: the two synthetic goal columns,
    /// then the schema fields.
    pub fn averages_columns(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.fields.len() + 2);
        out.push(GOALS_SCORED);
        out.push(GOALS_CONCEDED);
        out.extend(self.fields.iter().map(String::as_str));
        out
    }
}

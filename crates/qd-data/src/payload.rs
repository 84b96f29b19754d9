//! Result payload types shared by the store and renderers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visualization kinds a result can be rendered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
    Table,
}

impl ChartKind {
    /// All supported kinds, in toggle order
    pub const ALL: [ChartKind; 4] = [ChartKind::Bar, ChartKind::Line, ChartKind::Pie, ChartKind::Table];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Table => "table",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "line" => Ok(ChartKind::Line),
            "pie" => Ok(ChartKind::Pie),
            "table" => Ok(ChartKind::Table),
            other => Err(format!("Unknown chart type '{}'", other)),
        }
    }
}

/// Category-like key of a result row
///
/// Serialized externally tagged so a row flattens to `{"month": "Jan", "value": 42}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKey {
    Month(String),
    Region(String),
    Category(String),
    Label(String),
}

impl RowKey {
    /// Display label regardless of the key kind
    pub fn label(&self) -> &str {
        match self {
            RowKey::Month(label)
            | RowKey::Region(label)
            | RowKey::Category(label)
            | RowKey::Label(label) => label,
        }
    }

    /// Column name used when the row is shown as a table
    pub fn column(&self) -> &'static str {
        match self {
            RowKey::Month(_) => "month",
            RowKey::Region(_) => "region",
            RowKey::Category(_) => "category",
            RowKey::Label(_) => "label",
        }
    }
}

/// A single data point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    #[serde(flatten)]
    pub key: RowKey,
    pub value: u32,
}

impl Row {
    pub fn new(key: RowKey, value: u32) -> Self {
        Self { key, value }
    }

    pub fn label(&self) -> &str {
        self.key.label()
    }
}

/// Everything a renderer needs to show one answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    /// Ordered data rows
    pub rows: Vec<Row>,

    /// Visualization suggested by the query keywords
    pub chart_hint: ChartKind,

    /// Echo of the query text
    pub title: String,

    pub x_axis: String,
    pub y_axis: String,

    /// Unit appended to y-axis ticks, empty or `$`
    pub y_axis_suffix: String,

    /// Generated insight sentence
    pub summary: String,
}

impl ResultPayload {
    /// Largest row value, used to scale bars
    pub fn max_value(&self) -> u32 {
        self.rows.iter().map(|row| row.value).max().unwrap_or(0)
    }

    /// Sum of all row values, used for pie shares
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|row| u64::from(row.value)).sum()
    }

    /// Format a value with the y-axis suffix
    pub fn format_value(&self, value: u32) -> String {
        format!("{}{}", value, self.y_axis_suffix)
    }
}

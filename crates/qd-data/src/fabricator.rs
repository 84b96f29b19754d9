//! Mock fabricator
//! Invents a result payload from keyword matches in the query text

use std::time::Duration;
use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::payload::{ChartKind, ResultPayload, Row, RowKey};
use crate::FabricationError;

/// Simulated backend latency
pub const DEFAULT_FABRICATION_DELAY: Duration = Duration::from_millis(1500);

/// Exclusive upper bound for generated values
const VALUE_RANGE: u32 = 1000;

const MONTHS: [&str; 5] = ["Jan", "Feb", "Mar", "Apr", "May"];
const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
const CATEGORIES: [&str; 3] = ["Product A", "Product B", "Product C"];

/// Trait for anything that can answer a query with a payload
#[async_trait]
pub trait Fabricator: Send + Sync {
    /// Produce a result for the given query text
    async fn fabricate(&self, query: &str) -> Result<ResultPayload, FabricationError>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// Row layout picked from the query keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    Monthly,
    Regional,
    Categorical,
}

impl RowShape {
    /// "monthly" wins over "region"; anything else is categorical
    pub fn classify(query: &str) -> Self {
        let query = query.to_lowercase();
        if query.contains("monthly") {
            RowShape::Monthly
        } else if query.contains("region") {
            RowShape::Regional
        } else {
            RowShape::Categorical
        }
    }

    /// Keys of the rows this shape produces, in order
    pub fn keys(&self) -> Vec<RowKey> {
        match self {
            RowShape::Monthly => MONTHS.iter().map(|m| RowKey::Month(m.to_string())).collect(),
            RowShape::Regional => REGIONS.iter().map(|r| RowKey::Region(r.to_string())).collect(),
            RowShape::Categorical => CATEGORIES.iter().map(|c| RowKey::Category(c.to_string())).collect(),
        }
    }
}

/// Chart hint by keyword, first match wins: trend, compare, distribution
pub fn classify_chart(query: &str) -> ChartKind {
    let query = query.to_lowercase();
    if query.contains("trend") {
        ChartKind::Line
    } else if query.contains("compare") {
        ChartKind::Bar
    } else if query.contains("distribution") {
        ChartKind::Pie
    } else {
        ChartKind::Table
    }
}

/// `$` for revenue questions, nothing otherwise
pub fn y_axis_suffix(query: &str) -> &'static str {
    if query.to_lowercase().contains("revenue") {
        "$"
    } else {
        ""
    }
}

pub fn summarize(query: &str) -> String {
    format!(
        "Analysis based on your query: \"{}\". The data shows significant patterns that might be worth investigating further.",
        query
    )
}

/// Fabricator that generates random values after a fixed delay
pub struct MockFabricator {
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl MockFabricator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic values for a given seed
    pub fn with_seed(delay: Duration, seed: u64) -> Self {
        Self {
            delay,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Build the payload without waiting
    pub fn generate(&self, query: &str) -> ResultPayload {
        let shape = RowShape::classify(query);

        let rows = {
            let mut rng = self.rng.lock();
            shape
                .keys()
                .into_iter()
                .map(|key| Row::new(key, rng.gen_range(0..VALUE_RANGE)))
                .collect()
        };

        ResultPayload {
            rows,
            chart_hint: classify_chart(query),
            title: query.to_string(),
            x_axis: "category".to_string(),
            y_axis: "value".to_string(),
            y_axis_suffix: y_axis_suffix(query).to_string(),
            summary: summarize(query),
        }
    }
}

impl Default for MockFabricator {
    fn default() -> Self {
        Self::new(DEFAULT_FABRICATION_DELAY)
    }
}

#[async_trait]
impl Fabricator for MockFabricator {
    async fn fabricate(&self, query: &str) -> Result<ResultPayload, FabricationError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let payload = self.generate(query);
        debug!(
            rows = payload.rows.len(),
            chart = %payload.chart_hint,
            "Fabricated result for '{}'",
            query
        );
        Ok(payload)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

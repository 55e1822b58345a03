//! Post-ingest statistic identifiers

use serde::{Deserialize, Serialize};

/// Names of the companion statistics queries derived from a specification.
///
/// Every generated result carries all five keys; a metric that does not
/// apply maps to `None`, never to an empty string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatisticName {
    IncomingRecordCount,
    RowsInserted,
    RowsUpdated,
    RowsDeleted,
    RowsTerminated,
}

impl StatisticName {
    /// All statistic names, in map order.
    pub const ALL: [StatisticName; 5] = [
        StatisticName::IncomingRecordCount,
        StatisticName::RowsInserted,
        StatisticName::RowsUpdated,
        StatisticName::RowsDeleted,
        StatisticName::RowsTerminated,
    ];

    /// Column alias used for the metric in its generated query.
    pub fn alias(&self) -> &'static str {
        match self {
            StatisticName::IncomingRecordCount => "incomingRecordCount",
            StatisticName::RowsInserted => "rowsInserted",
            StatisticName::RowsUpdated => "rowsUpdated",
            StatisticName::RowsDeleted => "rowsDeleted",
            StatisticName::RowsTerminated => "rowsTerminated",
        }
    }
}

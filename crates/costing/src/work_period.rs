use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use periodcost_core::WorkPeriodId;

/// Work period (shift or business day) as supplied by the period scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPeriod {
    pub id: WorkPeriodId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl WorkPeriod {
    /// Display label `"<start> - <end>"`, formatted without locale.
    pub fn display_name(&self) -> String {
        const FORMAT: &str = "%Y-%m-%d %H:%M";
        format!(
            "{} - {}",
            self.start_date.format(FORMAT),
            self.end_date.format(FORMAT)
        )
    }
}

use serde::{Deserialize, Serialize};

/// Free-text intention for one calendar week; one row per week key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyFocus {
    pub id: i64,
    /// ISO week key, `YYYY-Www`.
    pub week_key: String,
    pub note: String,
}

#![allow(dead_code)]
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How often a habit is expected to be done.
///
/// Old exports also carried a raw weekday-set form ("days:mon,wed,fri");
/// the repository normalizes that to `Weekly` on read, so the rest of the
/// code only ever sees these two cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly { times_per_week: u8 },
}

impl Recurrence {
    pub fn kind_str(&self) -> &'static str {
        match self {
            Recurrence::Daily => "daily",
            Recurrence::Weekly { .. } => "weekly",
        }
    }

    pub fn times_per_week(&self) -> Option<u8> {
        match self {
            Recurrence::Daily => None,
            Recurrence::Weekly { times_per_week } => Some(*times_per_week),
        }
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recurrence::Daily => write!(f, "every day"),
            Recurrence::Weekly { times_per_week } => write!(f, "{}x per week", times_per_week),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub recurrence: Recurrence,
    /// Completions required in one day before the day counts as done.
    pub daily_target: i32,
    pub sort_order: i32,
    pub created_at: Option<String>,
}

/// One logged instance of doing a habit on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub id: i64,
    pub habit_id: i64,
    /// Day key, `YYYY-MM-DD`.
    pub date: String,
    pub created_at: Option<String>,
}

/// Parses the CLI-facing recurrence argument: "daily" or "weekly:N".
impl FromStr for Recurrence {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Recurrence::Daily),
            other => match other.strip_prefix("weekly:") {
                Some(n) => {
                    let n: u8 = n
                        .parse()
                        .map_err(|_| anyhow::anyhow!("Bad weekly count in '{}'", s))?;
                    if !(1..=7).contains(&n) {
                        return Err(anyhow::anyhow!("Weekly count must be 1-7, got {}", n));
                    }
                    Ok(Recurrence::Weekly { times_per_week: n })
                }
                None => Err(anyhow::anyhow!(
                    "Unknown recurrence '{}'. Use: daily, weekly:N",
                    s
                )),
            },
        }
    }
}

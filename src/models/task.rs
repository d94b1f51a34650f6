#![allow(dead_code)]
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskFrequency {
    Once,
    Weekly,
    TwiceMonthly,
    Monthly,
    Quarterly,
}

impl TaskFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFrequency::Once => "once",
            TaskFrequency::Weekly => "weekly",
            TaskFrequency::TwiceMonthly => "twice-monthly",
            TaskFrequency::Monthly => "monthly",
            TaskFrequency::Quarterly => "quarterly",
        }
    }

    /// Completions allowed within one period of this frequency.
    pub fn allowance(&self) -> i64 {
        match self {
            TaskFrequency::TwiceMonthly => 2,
            _ => 1,
        }
    }

    /// Human label for the period the allowance applies to.
    pub fn period_label(&self) -> &'static str {
        match self {
            TaskFrequency::Once => "ever",
            TaskFrequency::Weekly => "this week",
            TaskFrequency::TwiceMonthly | TaskFrequency::Monthly => "this month",
            TaskFrequency::Quarterly => "this quarter",
        }
    }
}

impl FromStr for TaskFrequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "once" => Ok(TaskFrequency::Once),
            "weekly" => Ok(TaskFrequency::Weekly),
            "twice-monthly" | "biweekly" => Ok(TaskFrequency::TwiceMonthly),
            "monthly" => Ok(TaskFrequency::Monthly),
            "quarterly" => Ok(TaskFrequency::Quarterly),
            _ => Err(anyhow::anyhow!(
                "Unknown frequency '{}'. Use: once, weekly, twice-monthly, monthly, quarterly",
                s
            )),
        }
    }
}

impl std::fmt::Display for TaskFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(anyhow::anyhow!(
                "Unknown difficulty '{}'. Use: easy, medium, hard",
                s
            )),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub frequency: TaskFrequency,
    pub difficulty: Difficulty,
    pub sort_order: i32,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCompletion {
    pub id: i64,
    pub task_id: i64,
    /// Which recurrence instance this completion belongs to
    /// (ISO week, `YYYY-MM`, `YYYY-Qn`, or the sentinel "once").
    pub period_key: String,
    pub created_at: Option<String>,
}

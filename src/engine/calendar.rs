use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{Habit, Recurrence, TaskFrequency};

/// Canonical day key, `YYYY-MM-DD`.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_day_key(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Canonical ISO week key, `YYYY-Www` (weeks start Monday).
pub fn week_key(date: NaiveDate) -> String {
    let iw = date.iso_week();
    format!("{}-W{:02}", iw.year(), iw.week())
}

/// The Monday of the week containing `date`.
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Whether a habit is expected on a given day for streak-walk purposes.
///
/// Count-based weekly habits are treated as due every day here; their real
/// compliance check happens at week level in the reward engine.
pub fn due_on(habit: &Habit, _day: NaiveDate) -> bool {
    match habit.recurrence {
        Recurrence::Daily => true,
        Recurrence::Weekly { .. } => true,
    }
}

/// Key identifying the recurrence instance a task completion belongs to.
pub fn period_key(frequency: TaskFrequency, day: NaiveDate) -> String {
    match frequency {
        TaskFrequency::Once => "once".to_string(),
        TaskFrequency::Weekly => week_key(day),
        TaskFrequency::Monthly | TaskFrequency::TwiceMonthly => {
            format!("{:04}-{:02}", day.year(), day.month())
        }
        TaskFrequency::Quarterly => {
            format!("{:04}-Q{}", day.year(), (day.month() - 1) / 3 + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn day_key_round_trips() {
        let date = d(2026, 3, 7);
        assert_eq!(day_key(date), "2026-03-07");
        assert_eq!(parse_day_key("2026-03-07"), Some(date));
        assert_eq!(parse_day_key("garbage"), None);
    }

    #[test]
    fn week_key_uses_iso_year_at_boundaries() {
        // Dec 31 2020 and Jan 1 2021 share ISO week 2020-W53.
        assert_eq!(week_key(d(2020, 12, 31)), "2020-W53");
        assert_eq!(week_key(d(2021, 1, 1)), "2020-W53");
        // Jan 4 is always in week 1.
        assert_eq!(week_key(d(2026, 1, 4)), "2026-W01");
    }

    #[test]
    fn week_monday_snaps_back_across_month_edges() {
        // 2026-03-01 is a Sunday; its week started Monday Feb 23.
        assert_eq!(week_monday(d(2026, 3, 1)), d(2026, 2, 23));
        // A Monday maps to itself.
        assert_eq!(week_monday(d(2026, 3, 2)), d(2026, 3, 2));
    }

    #[test]
    fn leap_day_arithmetic() {
        let leap = d(2024, 2, 29);
        assert_eq!(day_key(leap.succ_opt().unwrap()), "2024-03-01");
        assert_eq!(week_key(leap), "2024-W09");
    }

    #[test]
    fn period_keys_per_frequency() {
        let day = d(2026, 8, 28);
        assert_eq!(period_key(TaskFrequency::Once, day), "once");
        assert_eq!(period_key(TaskFrequency::Weekly, day), "2026-W35");
        assert_eq!(period_key(TaskFrequency::Monthly, day), "2026-08");
        assert_eq!(period_key(TaskFrequency::TwiceMonthly, day), "2026-08");
        assert_eq!(period_key(TaskFrequency::Quarterly, day), "2026-Q3");
        assert_eq!(period_key(TaskFrequency::Quarterly, d(2026, 1, 15)), "2026-Q1");
        assert_eq!(period_key(TaskFrequency::Quarterly, d(2026, 12, 31)), "2026-Q4");
    }
}

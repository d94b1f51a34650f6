use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::engine::calendar::due_on;
use crate::models::Habit;

/// Safety bound on day-by-day walks; a malformed recurrence rule must not
/// turn the walk into an infinite loop.
pub const STREAK_WALK_CAP: usize = 1000;

/// Consecutive due-days completed, ending at today (or yesterday — a day
/// that isn't over yet doesn't break an in-progress streak).
///
/// `done` holds the days whose completion count met the habit's target.
pub fn current_streak(done: &BTreeSet<NaiveDate>, habit: &Habit, today: NaiveDate) -> u32 {
    if done.is_empty() {
        return 0;
    }

    let mut day = if done.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(d) => d,
            None => return 0,
        }
    };

    let mut streak = 0u32;
    for _ in 0..STREAK_WALK_CAP {
        if due_on(habit, day) {
            if done.contains(&day) {
                streak += 1;
            } else {
                break;
            }
        }
        day = match day.pred_opt() {
            Some(d) => d,
            None => break,
        };
    }
    streak
}

/// Longest run of consecutive due-days completed, scanning forward from the
/// earliest completed day up to today.
///
/// The walk always covers the full `first..=today` span so a run ending at
/// today is never out of reach; the calendar itself bounds the loop.
pub fn best_streak(done: &BTreeSet<NaiveDate>, habit: &Habit, today: NaiveDate) -> u32 {
    let Some(&first) = done.iter().next() else {
        return 0;
    };

    let mut best = 0u32;
    let mut run = 0u32;
    let mut day = first;
    while day <= today {
        if due_on(habit, day) {
            if done.contains(&day) {
                run += 1;
                best = best.max(run);
            } else {
                run = 0;
            }
        }
        day = match day.succ_opt() {
            Some(d) => d,
            None => break,
        };
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recurrence;
    use chrono::Duration;

    fn daily_habit() -> Habit {
        Habit {
            id: 1,
            name: "Meditation".to_string(),
            recurrence: Recurrence::Daily,
            daily_target: 1,
            sort_order: 0,
            created_at: None,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn last_days(today: NaiveDate, offsets: &[i64]) -> BTreeSet<NaiveDate> {
        offsets.iter().map(|o| today - Duration::days(*o)).collect()
    }

    #[test]
    fn empty_set_is_zero() {
        let habit = daily_habit();
        let today = d(2026, 8, 28);
        assert_eq!(current_streak(&BTreeSet::new(), &habit, today), 0);
        assert_eq!(best_streak(&BTreeSet::new(), &habit, today), 0);
    }

    #[test]
    fn exactly_last_k_days_gives_k() {
        let habit = daily_habit();
        let today = d(2026, 8, 28);
        for k in 0..6u32 {
            let offsets: Vec<i64> = (0..k as i64).collect();
            let done = last_days(today, &offsets);
            assert_eq!(current_streak(&done, &habit, today), k, "k={}", k);
        }
    }

    #[test]
    fn uncompleted_today_does_not_break_streak() {
        // Completions on days -1, -2, -3 and nothing yet today.
        let habit = daily_habit();
        let today = d(2026, 8, 28);
        let done = last_days(today, &[1, 2, 3]);
        assert_eq!(current_streak(&done, &habit, today), 3);
    }

    #[test]
    fn missing_today_and_yesterday_is_zero() {
        let habit = daily_habit();
        let today = d(2026, 8, 28);
        let done = last_days(today, &[2, 3, 4]);
        assert_eq!(current_streak(&done, &habit, today), 0);
    }

    #[test]
    fn insensitive_to_completions_beyond_first_gap() {
        let habit = daily_habit();
        let today = d(2026, 8, 28);
        let mut done = last_days(today, &[0, 1, 2]);
        let with_gap_only = current_streak(&done, &habit, today);
        // A disconnected old completion must not change the result.
        done.insert(today - Duration::days(40));
        assert_eq!(current_streak(&done, &habit, today), with_gap_only);
        assert_eq!(with_gap_only, 3);
    }

    #[test]
    fn best_tracks_a_longer_historic_run() {
        let habit = daily_habit();
        let today = d(2026, 8, 28);
        // Five-day run three weeks ago, two-day run now.
        let mut done = last_days(today, &[0, 1]);
        for o in 20..25 {
            done.insert(today - Duration::days(o));
        }
        assert_eq!(current_streak(&done, &habit, today), 2);
        assert_eq!(best_streak(&done, &habit, today), 5);
    }

    #[test]
    fn best_reaches_today_past_an_ancient_completion() {
        let habit = daily_habit();
        let today = d(2026, 8, 28);
        // One stray completion three years back must not push the recent
        // two-day run out of the scan.
        let mut done = last_days(today, &[0, 1]);
        done.insert(today - Duration::days(1100));
        assert_eq!(current_streak(&done, &habit, today), 2);
        assert_eq!(best_streak(&done, &habit, today), 2);
    }

    #[test]
    fn best_is_never_below_current() {
        let habit = daily_habit();
        let today = d(2026, 8, 28);
        let sets = [
            last_days(today, &[]),
            last_days(today, &[0]),
            last_days(today, &[1, 2, 3]),
            last_days(today, &[0, 1, 2, 5, 6, 7, 8]),
            last_days(today, &[2, 4, 6, 8]),
        ];
        for done in &sets {
            assert!(best_streak(done, &habit, today) >= current_streak(done, &habit, today));
        }
    }
}

#![allow(dead_code)]
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::engine::calendar::parse_day_key;
use crate::models::{
    Difficulty, GardenItem, Habit, ItemKind, Rarity, Recurrence, Task, TaskCompletion,
    TaskFrequency, WeeklyFocus,
};

// ─── Habit repo ──────────────────────────────────────────────────────────────

pub struct HabitRepo;

impl HabitRepo {
    pub fn get_all(conn: &Connection) -> Result<Vec<Habit>> {
        let mut stmt = conn.prepare(
            "SELECT id, name, recurrence, times_per_week, weekday_set, daily_target,
                    sort_order, created_at
             FROM habits ORDER BY sort_order, id",
        )?;
        let rows = stmt.query_map([], habit_row)?;
        let mut result = Vec::new();
        for r in rows {
            result.push(r?);
        }
        Ok(result)
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Habit>> {
        conn.query_row(
            "SELECT id, name, recurrence, times_per_week, weekday_set, daily_target,
                    sort_order, created_at
             FROM habits WHERE id = ?1",
            params![id],
            habit_row,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Habit>> {
        let all = Self::get_all(conn)?;
        Ok(all
            .into_iter()
            .find(|h| h.name.to_lowercase() == name.to_lowercase()))
    }

    pub fn insert(
        conn: &Connection,
        name: &str,
        recurrence: Recurrence,
        daily_target: i32,
    ) -> Result<Habit> {
        let max_order: i32 = conn
            .query_row("SELECT COALESCE(MAX(sort_order), 0) FROM habits", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        conn.execute(
            "INSERT INTO habits (name, recurrence, times_per_week, daily_target, sort_order)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                name,
                recurrence.kind_str(),
                recurrence.times_per_week(),
                daily_target,
                max_order + 1,
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(Habit {
            id,
            name: name.to_string(),
            recurrence,
            daily_target,
            sort_order: max_order + 1,
            created_at: None,
        })
    }

    /// Rewrites a habit's name, recurrence and target in place. Logged
    /// completions and earned garden items are untouched; a lingering legacy
    /// weekday list is dropped since the new recurrence supersedes it.
    pub fn update(conn: &Connection, habit: &Habit) -> Result<()> {
        conn.execute(
            "UPDATE habits SET name = ?1, recurrence = ?2, times_per_week = ?3,
                    weekday_set = NULL, daily_target = ?4
             WHERE id = ?5",
            params![
                habit.name,
                habit.recurrence.kind_str(),
                habit.recurrence.times_per_week(),
                habit.daily_target,
                habit.id,
            ],
        )?;
        Ok(())
    }

    /// Deletes a habit and all of its completions. Garden items keep their
    /// cached owner name and survive.
    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        conn.execute("DELETE FROM completions WHERE habit_id = ?1", params![id])?;
        conn.execute("DELETE FROM habits WHERE id = ?1", params![id])?;
        Ok(())
    }
}

pub(crate) fn habit_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Habit> {
    let recurrence: String = row.get(2)?;
    let times_per_week: Option<i32> = row.get(3)?;
    let weekday_set: Option<String> = row.get(4)?;

    // Legacy rows from old exports store an explicit weekday list; normalize
    // to the count-based form so nothing downstream has to know about it.
    let recurrence = match recurrence.as_str() {
        "daily" => Recurrence::Daily,
        "weekly" => Recurrence::Weekly {
            times_per_week: times_per_week.unwrap_or(1).clamp(1, 7) as u8,
        },
        "days" => {
            let n = weekday_set
                .as_deref()
                .map(|s| s.split(',').filter(|p| !p.is_empty()).count())
                .unwrap_or(7);
            Recurrence::Weekly {
                times_per_week: n.clamp(1, 7) as u8,
            }
        }
        other => {
            return Err(rusqlite::Error::InvalidParameterName(format!(
                "Unknown recurrence: {}",
                other
            )));
        }
    };

    Ok(Habit {
        id: row.get(0)?,
        name: row.get(1)?,
        recurrence,
        daily_target: row.get(5)?,
        sort_order: row.get(6)?,
        created_at: row.get(7)?,
    })
}

// ─── Completion repo ─────────────────────────────────────────────────────────

/// Result of toggling a habit for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A completion was logged; holds the new count for the day.
    Added(i64),
    /// The day was already at target; all of its completions were removed.
    Cleared,
}

pub struct CompletionRepo;

impl CompletionRepo {
    pub fn count_for_day(conn: &Connection, habit_id: i64, date: &str) -> Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM completions WHERE habit_id = ?1 AND date = ?2",
            params![habit_id, date],
            |row| row.get(0),
        )
        .map_err(anyhow::Error::from)
    }

    /// Logs one completion, unless the day already reached the habit's
    /// target — then the whole day is cleared (toggle-off).
    pub fn toggle(conn: &Connection, habit: &Habit, date: &str) -> Result<ToggleOutcome> {
        let count = Self::count_for_day(conn, habit.id, date)?;
        if count >= habit.daily_target as i64 {
            conn.execute(
                "DELETE FROM completions WHERE habit_id = ?1 AND date = ?2",
                params![habit.id, date],
            )?;
            Ok(ToggleOutcome::Cleared)
        } else {
            conn.execute(
                "INSERT INTO completions (habit_id, date) VALUES (?1, ?2)",
                params![habit.id, date],
            )?;
            Ok(ToggleOutcome::Added(count + 1))
        }
    }

    /// Distinct days whose completion count met the habit's target. This is
    /// the set the streak calculator walks over.
    pub fn completed_days(conn: &Connection, habit: &Habit) -> Result<BTreeSet<NaiveDate>> {
        let mut stmt = conn.prepare(
            "SELECT date FROM completions WHERE habit_id = ?1
             GROUP BY date HAVING COUNT(*) >= ?2",
        )?;
        let dates = stmt.query_map(params![habit.id, habit.daily_target], |row| {
            row.get::<_, String>(0)
        })?;

        let mut result = BTreeSet::new();
        for date in dates {
            if let Some(d) = parse_day_key(&date?) {
                result.insert(d);
            }
        }
        Ok(result)
    }

    /// Per-day completion counts within an inclusive date range.
    pub fn counts_in_range(
        conn: &Connection,
        habit_id: i64,
        start: &str,
        end: &str,
    ) -> Result<Vec<(String, i64)>> {
        let mut stmt = conn.prepare(
            "SELECT date, COUNT(*) FROM completions
             WHERE habit_id = ?1 AND date >= ?2 AND date <= ?3
             GROUP BY date ORDER BY date",
        )?;
        let rows = stmt.query_map(params![habit_id, start, end], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn clear_all(conn: &Connection) -> Result<()> {
        conn.execute("DELETE FROM completions", [])?;
        Ok(())
    }
}

// ─── Task repo ───────────────────────────────────────────────────────────────

pub struct TaskRepo;

impl TaskRepo {
    pub fn get_all(conn: &Connection) -> Result<Vec<Task>> {
        let mut stmt = conn.prepare(
            "SELECT id, name, frequency, difficulty, sort_order, created_at
             FROM tasks ORDER BY sort_order, id",
        )?;
        let rows = stmt.query_map([], task_row)?;
        let mut result = Vec::new();
        for r in rows {
            result.push(r?);
        }
        Ok(result)
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Task>> {
        conn.query_row(
            "SELECT id, name, frequency, difficulty, sort_order, created_at
             FROM tasks WHERE id = ?1",
            params![id],
            task_row,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Task>> {
        let all = Self::get_all(conn)?;
        Ok(all
            .into_iter()
            .find(|t| t.name.to_lowercase() == name.to_lowercase()))
    }

    pub fn insert(
        conn: &Connection,
        name: &str,
        frequency: TaskFrequency,
        difficulty: Difficulty,
    ) -> Result<Task> {
        let max_order: i32 = conn
            .query_row("SELECT COALESCE(MAX(sort_order), 0) FROM tasks", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        conn.execute(
            "INSERT INTO tasks (name, frequency, difficulty, sort_order)
             VALUES (?1, ?2, ?3, ?4)",
            params![name, frequency.as_str(), difficulty.as_str(), max_order + 1],
        )?;
        Ok(Task {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            frequency,
            difficulty,
            sort_order: max_order + 1,
            created_at: None,
        })
    }

    /// Rewrites a task's name, frequency and difficulty in place. Completions
    /// already logged keep their period keys.
    pub fn update(conn: &Connection, task: &Task) -> Result<()> {
        conn.execute(
            "UPDATE tasks SET name = ?1, frequency = ?2, difficulty = ?3 WHERE id = ?4",
            params![
                task.name,
                task.frequency.as_str(),
                task.difficulty.as_str(),
                task.id,
            ],
        )?;
        Ok(())
    }

    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        conn.execute("DELETE FROM task_completions WHERE task_id = ?1", params![id])?;
        conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(())
    }
}

pub(crate) fn task_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    let frequency: String = row.get(2)?;
    let difficulty: String = row.get(3)?;
    Ok(Task {
        id: row.get(0)?,
        name: row.get(1)?,
        frequency: TaskFrequency::from_str(&frequency)
            .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
        difficulty: Difficulty::from_str(&difficulty)
            .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
        sort_order: row.get(4)?,
        created_at: row.get(5)?,
    })
}

// ─── Task completion repo ────────────────────────────────────────────────────

pub struct TaskCompletionRepo;

impl TaskCompletionRepo {
    pub fn count_for_period(conn: &Connection, task_id: i64, period_key: &str) -> Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM task_completions WHERE task_id = ?1 AND period_key = ?2",
            params![task_id, period_key],
            |row| row.get(0),
        )
        .map_err(anyhow::Error::from)
    }

    pub fn get_by_period(
        conn: &Connection,
        task_id: i64,
        period_key: &str,
    ) -> Result<Vec<TaskCompletion>> {
        let mut stmt = conn.prepare(
            "SELECT id, task_id, period_key, created_at FROM task_completions
             WHERE task_id = ?1 AND period_key = ?2 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![task_id, period_key], |row| {
            Ok(TaskCompletion {
                id: row.get(0)?,
                task_id: row.get(1)?,
                period_key: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn insert(conn: &Connection, task_id: i64, period_key: &str) -> Result<TaskCompletion> {
        conn.execute(
            "INSERT INTO task_completions (task_id, period_key) VALUES (?1, ?2)",
            params![task_id, period_key],
        )?;
        Ok(TaskCompletion {
            id: conn.last_insert_rowid(),
            task_id,
            period_key: period_key.to_string(),
            created_at: None,
        })
    }

    pub fn delete_by_id(conn: &Connection, id: i64) -> Result<()> {
        conn.execute("DELETE FROM task_completions WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub fn clear_all(conn: &Connection) -> Result<()> {
        conn.execute("DELETE FROM task_completions", [])?;
        Ok(())
    }
}

// ─── Garden repo ─────────────────────────────────────────────────────────────

pub struct GardenRepo;

impl GardenRepo {
    pub fn get_all(conn: &Connection) -> Result<Vec<GardenItem>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM garden_items ORDER BY id",
            GARDEN_COLUMNS
        ))?;
        let rows = stmt.query_map([], garden_row)?;
        let mut result = Vec::new();
        for r in rows {
            result.push(r?);
        }
        Ok(result)
    }

    pub fn get_placed(conn: &Connection) -> Result<Vec<GardenItem>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM garden_items WHERE placed = 1 ORDER BY id",
            GARDEN_COLUMNS
        ))?;
        let rows = stmt.query_map([], garden_row)?;
        let mut result = Vec::new();
        for r in rows {
            result.push(r?);
        }
        Ok(result)
    }

    /// Idempotency lookup for the weekly reward engine: at most one item per
    /// (owner, week). First match wins; more than one would mean the mint
    /// guard was bypassed.
    pub fn get_by_owner_and_week(
        conn: &Connection,
        owner_ref: &str,
        week_key: &str,
    ) -> Result<Option<GardenItem>> {
        conn.query_row(
            &format!(
                "SELECT {} FROM garden_items
                 WHERE owner_ref = ?1 AND week_earned = ?2 LIMIT 1",
                GARDEN_COLUMNS
            ),
            params![owner_ref, week_key],
            garden_row,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<GardenItem>> {
        conn.query_row(
            &format!("SELECT {} FROM garden_items WHERE id = ?1", GARDEN_COLUMNS),
            params![id],
            garden_row,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn insert(conn: &Connection, item: &GardenItem) -> Result<GardenItem> {
        conn.execute(
            "INSERT INTO garden_items
                (kind, subtype, rarity, growth_stage, owner_ref, owner_name,
                 week_earned, placed, grid_col, grid_row)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                item.kind.as_str(),
                item.subtype,
                item.rarity.as_str(),
                item.growth_stage,
                item.owner_ref,
                item.owner_name,
                item.week_earned,
                item.placed as i32,
                item.grid_col,
                item.grid_row,
            ],
        )?;
        let mut stored = item.clone();
        stored.id = conn.last_insert_rowid();
        Ok(stored)
    }

    pub fn set_placement(conn: &Connection, id: i64, col: i32, row: i32) -> Result<()> {
        conn.execute(
            "UPDATE garden_items SET placed = 1, grid_col = ?2, grid_row = ?3 WHERE id = ?1",
            params![id, col, row],
        )?;
        Ok(())
    }

    pub fn clear_placement(conn: &Connection, id: i64) -> Result<()> {
        conn.execute(
            "UPDATE garden_items SET placed = 0, grid_col = NULL, grid_row = NULL WHERE id = ?1",
            params![id],
        )?;
        Ok(())
    }

    pub fn clear_all(conn: &Connection) -> Result<()> {
        conn.execute("DELETE FROM garden_items", [])?;
        Ok(())
    }
}

pub(crate) const GARDEN_COLUMNS: &str = "id, kind, subtype, rarity, growth_stage, owner_ref, owner_name, \
                              week_earned, placed, grid_col, grid_row, created_at";

pub(crate) fn garden_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<GardenItem> {
    let kind: String = row.get(1)?;
    let rarity: String = row.get(3)?;
    Ok(GardenItem {
        id: row.get(0)?,
        kind: ItemKind::from_str(&kind)
            .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
        subtype: row.get(2)?,
        rarity: Rarity::from_str(&rarity)
            .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
        growth_stage: row.get(4)?,
        owner_ref: row.get(5)?,
        owner_name: row.get(6)?,
        week_earned: row.get(7)?,
        placed: row.get::<_, i32>(8)? != 0,
        grid_col: row.get(9)?,
        grid_row: row.get(10)?,
        created_at: row.get(11)?,
    })
}

// ─── Weekly focus repo ───────────────────────────────────────────────────────

pub struct FocusRepo;

impl FocusRepo {
    pub fn get_by_week(conn: &Connection, week_key: &str) -> Result<Option<WeeklyFocus>> {
        conn.query_row(
            "SELECT id, week_key, note FROM weekly_focus WHERE week_key = ?1",
            params![week_key],
            |row| {
                Ok(WeeklyFocus {
                    id: row.get(0)?,
                    week_key: row.get(1)?,
                    note: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn upsert(conn: &Connection, week_key: &str, note: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO weekly_focus (week_key, note) VALUES (?1, ?2)
             ON CONFLICT(week_key) DO UPDATE SET note = ?2",
            params![week_key, note],
        )?;
        Ok(())
    }

    pub fn get_all(conn: &Connection) -> Result<Vec<WeeklyFocus>> {
        let mut stmt =
            conn.prepare("SELECT id, week_key, note FROM weekly_focus ORDER BY week_key")?;
        let rows = stmt.query_map([], |row| {
            Ok(WeeklyFocus {
                id: row.get(0)?,
                week_key: row.get(1)?,
                note: row.get(2)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn clear_all(conn: &Connection) -> Result<()> {
        conn.execute("DELETE FROM weekly_focus", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn toggle_walks_up_to_target_then_clears() {
        let conn = test_conn();
        let habit = HabitRepo::insert(&conn, "Water", Recurrence::Daily, 2).unwrap();

        assert_eq!(
            CompletionRepo::toggle(&conn, &habit, "2026-08-28").unwrap(),
            ToggleOutcome::Added(1)
        );
        assert_eq!(
            CompletionRepo::toggle(&conn, &habit, "2026-08-28").unwrap(),
            ToggleOutcome::Added(2)
        );
        // At target: the next toggle wipes the whole day.
        assert_eq!(
            CompletionRepo::toggle(&conn, &habit, "2026-08-28").unwrap(),
            ToggleOutcome::Cleared
        );
        assert_eq!(
            CompletionRepo::count_for_day(&conn, habit.id, "2026-08-28").unwrap(),
            0
        );
    }

    #[test]
    fn completed_days_respects_target() {
        let conn = test_conn();
        let habit = HabitRepo::insert(&conn, "Stretch", Recurrence::Daily, 2).unwrap();
        // One log on the 27th, two on the 28th.
        CompletionRepo::toggle(&conn, &habit, "2026-08-27").unwrap();
        CompletionRepo::toggle(&conn, &habit, "2026-08-28").unwrap();
        CompletionRepo::toggle(&conn, &habit, "2026-08-28").unwrap();

        let days = CompletionRepo::completed_days(&conn, &habit).unwrap();
        assert_eq!(days.len(), 1);
        assert!(days.contains(&parse_day_key("2026-08-28").unwrap()));
    }

    #[test]
    fn legacy_weekday_set_normalizes_to_weekly_count() {
        let conn = test_conn();
        conn.execute(
            "INSERT INTO habits (name, recurrence, weekday_set, daily_target, sort_order)
             VALUES ('Run', 'days', 'mon,wed,fri', 1, 1)",
            [],
        )
        .unwrap();

        let habit = HabitRepo::find_by_name(&conn, "run").unwrap().unwrap();
        assert_eq!(habit.recurrence, Recurrence::Weekly { times_per_week: 3 });
    }

    #[test]
    fn habit_update_rewrites_in_place_and_keeps_completions() {
        let conn = test_conn();
        let mut habit = HabitRepo::insert(&conn, "Gym", Recurrence::Daily, 1).unwrap();
        CompletionRepo::toggle(&conn, &habit, "2026-08-28").unwrap();

        habit.recurrence = Recurrence::Weekly { times_per_week: 3 };
        habit.daily_target = 2;
        habit.name = "Lift".to_string();
        HabitRepo::update(&conn, &habit).unwrap();

        let after = HabitRepo::get_by_id(&conn, habit.id).unwrap().unwrap();
        assert_eq!(after.name, "Lift");
        assert_eq!(after.recurrence, Recurrence::Weekly { times_per_week: 3 });
        assert_eq!(after.daily_target, 2);
        assert_eq!(
            CompletionRepo::count_for_day(&conn, habit.id, "2026-08-28").unwrap(),
            1
        );
    }

    #[test]
    fn task_update_changes_frequency_and_difficulty() {
        let conn = test_conn();
        let mut task =
            TaskRepo::insert(&conn, "Bins", TaskFrequency::Weekly, Difficulty::Easy).unwrap();

        task.frequency = TaskFrequency::Monthly;
        task.difficulty = Difficulty::Hard;
        TaskRepo::update(&conn, &task).unwrap();

        let after = TaskRepo::get_by_id(&conn, task.id).unwrap().unwrap();
        assert_eq!(after.frequency, TaskFrequency::Monthly);
        assert_eq!(after.difficulty, Difficulty::Hard);
        assert_eq!(after.name, "Bins");
    }

    #[test]
    fn habit_delete_cascades_completions_but_keeps_garden_items() {
        let conn = test_conn();
        let habit = HabitRepo::insert(&conn, "Read", Recurrence::Daily, 1).unwrap();
        CompletionRepo::toggle(&conn, &habit, "2026-08-28").unwrap();
        GardenRepo::insert(
            &conn,
            &GardenItem {
                id: 0,
                kind: ItemKind::Plant,
                subtype: "fern".to_string(),
                rarity: Rarity::Common,
                growth_stage: 1,
                owner_ref: habit.id.to_string(),
                owner_name: habit.name.clone(),
                week_earned: "2026-W34".to_string(),
                placed: false,
                grid_col: None,
                grid_row: None,
                created_at: None,
            },
        )
        .unwrap();

        HabitRepo::delete(&conn, habit.id).unwrap();
        assert!(HabitRepo::get_by_id(&conn, habit.id).unwrap().is_none());
        assert_eq!(
            CompletionRepo::count_for_day(&conn, habit.id, "2026-08-28").unwrap(),
            0
        );
        let items = GardenRepo::get_all(&conn).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].owner_name, "Read");
    }

    #[test]
    fn focus_upsert_is_one_row_per_week() {
        let conn = test_conn();
        FocusRepo::upsert(&conn, "2026-W35", "ship the report").unwrap();
        FocusRepo::upsert(&conn, "2026-W35", "rest more").unwrap();
        let all = FocusRepo::get_all(&conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].note, "rest more");
    }

    #[test]
    fn task_completion_counting_by_period() {
        let conn = test_conn();
        let task =
            TaskRepo::insert(&conn, "Deep clean", TaskFrequency::Monthly, Difficulty::Hard)
                .unwrap();
        TaskCompletionRepo::insert(&conn, task.id, "2026-08").unwrap();
        assert_eq!(
            TaskCompletionRepo::count_for_period(&conn, task.id, "2026-08").unwrap(),
            1
        );
        assert_eq!(
            TaskCompletionRepo::count_for_period(&conn, task.id, "2026-09").unwrap(),
            0
        );
    }
}

use anyhow::Result;
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

use crate::db::repository::{
    CompletionRepo, FocusRepo, GardenRepo, TaskCompletionRepo, garden_row, habit_row, task_row,
    GARDEN_COLUMNS,
};
use crate::models::{Completion, GardenItem, Habit, Task, TaskCompletion, WeeklyFocus};

/// The whole database as one serializable document. Collections missing from
/// an imported document are treated as empty, not "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferDoc {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub completions: Vec<Completion>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub task_completions: Vec<TaskCompletion>,
    #[serde(default)]
    pub garden_items: Vec<GardenItem>,
    #[serde(default)]
    pub weekly_focus: Vec<WeeklyFocus>,
}

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("import document is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn parse_document(json: &str) -> Result<TransferDoc, TransferError> {
    Ok(serde_json::from_str(json)?)
}

/// Snapshots all six collections in one read transaction.
pub fn export_document(conn: &mut Connection) -> Result<TransferDoc> {
    let tx = conn.transaction()?;
    let doc = TransferDoc {
        habits: select_habits(&tx)?,
        completions: select_completions(&tx)?,
        tasks: select_tasks(&tx)?,
        task_completions: select_task_completions(&tx)?,
        garden_items: select_garden_items(&tx)?,
        weekly_focus: FocusRepo::get_all(&tx)?,
    };
    tx.commit()?;
    Ok(doc)
}

/// Replaces all six collections from the document, atomically: an error
/// anywhere rolls the whole import back.
pub fn import_document(conn: &mut Connection, doc: &TransferDoc) -> Result<()> {
    let tx = conn.transaction()?;

    CompletionRepo::clear_all(&tx)?;
    TaskCompletionRepo::clear_all(&tx)?;
    GardenRepo::clear_all(&tx)?;
    FocusRepo::clear_all(&tx)?;
    tx.execute("DELETE FROM habits", [])?;
    tx.execute("DELETE FROM tasks", [])?;

    for h in &doc.habits {
        tx.execute(
            "INSERT INTO habits
                (id, name, recurrence, times_per_week, daily_target, sort_order, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, COALESCE(?7, datetime('now')))",
            params![
                h.id,
                h.name,
                h.recurrence.kind_str(),
                h.recurrence.times_per_week(),
                h.daily_target,
                h.sort_order,
                h.created_at,
            ],
        )?;
    }
    for c in &doc.completions {
        tx.execute(
            "INSERT INTO completions (id, habit_id, date, created_at)
             VALUES (?1, ?2, ?3, COALESCE(?4, datetime('now')))",
            params![c.id, c.habit_id, c.date, c.created_at],
        )?;
    }
    for t in &doc.tasks {
        tx.execute(
            "INSERT INTO tasks (id, name, frequency, difficulty, sort_order, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, COALESCE(?6, datetime('now')))",
            params![
                t.id,
                t.name,
                t.frequency.as_str(),
                t.difficulty.as_str(),
                t.sort_order,
                t.created_at,
            ],
        )?;
    }
    for tc in &doc.task_completions {
        tx.execute(
            "INSERT INTO task_completions (id, task_id, period_key, created_at)
             VALUES (?1, ?2, ?3, COALESCE(?4, datetime('now')))",
            params![tc.id, tc.task_id, tc.period_key, tc.created_at],
        )?;
    }
    for item in &doc.garden_items {
        tx.execute(
            "INSERT INTO garden_items
                (id, kind, subtype, rarity, growth_stage, owner_ref, owner_name,
                 week_earned, placed, grid_col, grid_row, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                     COALESCE(?12, datetime('now')))",
            params![
                item.id,
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
                item.created_at,
            ],
        )?;
    }
    for f in &doc.weekly_focus {
        tx.execute(
            "INSERT INTO weekly_focus (id, week_key, note) VALUES (?1, ?2, ?3)",
            params![f.id, f.week_key, f.note],
        )?;
    }

    tx.commit()?;
    Ok(())
}

fn select_habits(conn: &Connection) -> Result<Vec<Habit>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, recurrence, times_per_week, weekday_set, daily_target,
                sort_order, created_at
         FROM habits ORDER BY id",
    )?;
    let rows = stmt.query_map([], habit_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(anyhow::Error::from)
}

fn select_completions(conn: &Connection) -> Result<Vec<Completion>> {
    let mut stmt =
        conn.prepare("SELECT id, habit_id, date, created_at FROM completions ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Completion {
            id: row.get(0)?,
            habit_id: row.get(1)?,
            date: row.get(2)?,
            created_at: row.get(3)?,
        })
    })?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(anyhow::Error::from)
}

fn select_tasks(conn: &Connection) -> Result<Vec<Task>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, frequency, difficulty, sort_order, created_at
         FROM tasks ORDER BY id",
    )?;
    let rows = stmt.query_map([], task_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(anyhow::Error::from)
}

fn select_task_completions(conn: &Connection) -> Result<Vec<TaskCompletion>> {
    let mut stmt = conn
        .prepare("SELECT id, task_id, period_key, created_at FROM task_completions ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
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

fn select_garden_items(conn: &Connection) -> Result<Vec<GardenItem>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM garden_items ORDER BY id",
        GARDEN_COLUMNS
    ))?;
    let rows = stmt.query_map([], garden_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(anyhow::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::db::repository::{
        CompletionRepo, FocusRepo, GardenRepo, HabitRepo, TaskCompletionRepo, TaskRepo,
    };
    use crate::models::{Difficulty, ItemKind, Rarity, Recurrence, TaskFrequency};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn seed(conn: &Connection) {
        let habit = HabitRepo::insert(conn, "Meditate", Recurrence::Daily, 1).unwrap();
        CompletionRepo::toggle(conn, &habit, "2026-08-27").unwrap();
        CompletionRepo::toggle(conn, &habit, "2026-08-28").unwrap();
        let task =
            TaskRepo::insert(conn, "Bills", TaskFrequency::Monthly, Difficulty::Medium).unwrap();
        TaskCompletionRepo::insert(conn, task.id, "2026-08").unwrap();
        GardenRepo::insert(
            conn,
            &GardenItem {
                id: 0,
                kind: ItemKind::Plant,
                subtype: "tulip".to_string(),
                rarity: Rarity::Uncommon,
                growth_stage: 2,
                owner_ref: habit.id.to_string(),
                owner_name: habit.name.clone(),
                week_earned: "2026-W34".to_string(),
                placed: true,
                grid_col: Some(1),
                grid_row: Some(2),
                created_at: None,
            },
        )
        .unwrap();
        FocusRepo::upsert(conn, "2026-W35", "slow mornings").unwrap();
    }

    #[test]
    fn export_import_round_trips_all_collections() {
        let mut conn = test_conn();
        seed(&conn);

        let first = export_document(&mut conn).unwrap();
        assert_eq!(first.habits.len(), 1);
        assert_eq!(first.completions.len(), 2);
        assert_eq!(first.tasks.len(), 1);
        assert_eq!(first.task_completions.len(), 1);
        assert_eq!(first.garden_items.len(), 1);
        assert_eq!(first.weekly_focus.len(), 1);

        // Through JSON and back into a fresh database.
        let json = serde_json::to_string(&first).unwrap();
        let parsed = parse_document(&json).unwrap();
        let mut fresh = test_conn();
        import_document(&mut fresh, &parsed).unwrap();

        let second = export_document(&mut fresh).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn import_replaces_rather_than_merges() {
        let mut conn = test_conn();
        seed(&conn);

        // A document with only habits: every other collection becomes empty.
        let doc = TransferDoc {
            habits: vec![Habit {
                id: 9,
                name: "Only one".to_string(),
                recurrence: Recurrence::Weekly { times_per_week: 2 },
                daily_target: 1,
                sort_order: 1,
                created_at: None,
            }],
            ..Default::default()
        };
        import_document(&mut conn, &doc).unwrap();

        let after = export_document(&mut conn).unwrap();
        assert_eq!(after.habits.len(), 1);
        assert_eq!(after.habits[0].name, "Only one");
        assert!(after.completions.is_empty());
        assert!(after.tasks.is_empty());
        assert!(after.garden_items.is_empty());
        assert!(after.weekly_focus.is_empty());
    }

    #[test]
    fn missing_collections_parse_as_empty() {
        let doc = parse_document(r#"{"habits": []}"#).unwrap();
        assert!(doc.tasks.is_empty());
        assert!(doc.garden_items.is_empty());
    }

    #[test]
    fn malformed_document_is_a_descriptive_error() {
        let err = parse_document("{not json").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn failed_import_leaves_existing_data_intact() {
        let mut conn = test_conn();
        seed(&conn);
        let before = export_document(&mut conn).unwrap();

        // Second task row reuses an id, violating the primary key mid-import.
        let bad = TransferDoc {
            tasks: vec![
                Task {
                    id: 1,
                    name: "A".to_string(),
                    frequency: TaskFrequency::Once,
                    difficulty: Difficulty::Easy,
                    sort_order: 1,
                    created_at: None,
                },
                Task {
                    id: 1,
                    name: "B".to_string(),
                    frequency: TaskFrequency::Once,
                    difficulty: Difficulty::Easy,
                    sort_order: 2,
                    created_at: None,
                },
            ],
            ..Default::default()
        };
        assert!(import_document(&mut conn, &bad).is_err());

        let after = export_document(&mut conn).unwrap();
        assert_eq!(before, after);
    }
}

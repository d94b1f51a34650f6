use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS habits (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            recurrence      TEXT NOT NULL CHECK(recurrence IN ('daily','weekly','days')),
            times_per_week  INTEGER,
            weekday_set     TEXT,
            daily_target    INTEGER NOT NULL DEFAULT 1,
            sort_order      INTEGER DEFAULT 0,
            created_at      TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS completions (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            habit_id   INTEGER NOT NULL REFERENCES habits(id),
            date       TEXT NOT NULL,
            created_at TEXT DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_completions_habit_date
            ON completions(habit_id, date);

        CREATE TABLE IF NOT EXISTS tasks (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL,
            frequency  TEXT NOT NULL
                       CHECK(frequency IN ('once','weekly','twice-monthly','monthly','quarterly')),
            difficulty TEXT NOT NULL CHECK(difficulty IN ('easy','medium','hard')),
            sort_order INTEGER DEFAULT 0,
            created_at TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS task_completions (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            task_id    INTEGER NOT NULL REFERENCES tasks(id),
            period_key TEXT NOT NULL,
            created_at TEXT DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_task_completions_period
            ON task_completions(task_id, period_key);

        CREATE TABLE IF NOT EXISTS garden_items (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            kind         TEXT NOT NULL CHECK(kind IN ('plant','decoration')),
            subtype      TEXT NOT NULL,
            rarity       TEXT NOT NULL
                         CHECK(rarity IN ('common','uncommon','rare','epic','legendary')),
            growth_stage INTEGER NOT NULL,
            owner_ref    TEXT NOT NULL,
            owner_name   TEXT NOT NULL,
            week_earned  TEXT NOT NULL,
            placed       INTEGER DEFAULT 0,
            grid_col     INTEGER,
            grid_row     INTEGER,
            created_at   TEXT DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_garden_owner_week
            ON garden_items(owner_ref, week_earned);
        CREATE INDEX IF NOT EXISTS idx_garden_placed
            ON garden_items(placed);

        CREATE TABLE IF NOT EXISTS weekly_focus (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            week_key TEXT NOT NULL UNIQUE,
            note     TEXT NOT NULL
        );
    ")?;
    Ok(())
}

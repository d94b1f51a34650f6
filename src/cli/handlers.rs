use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::str::FromStr;

use crate::cli::args::{FocusCommands, HabitCommands, TaskCommands};
use crate::config::AppConfig;
use crate::db::repository::{
    CompletionRepo, FocusRepo, GardenRepo, HabitRepo, TaskCompletionRepo, TaskRepo, ToggleOutcome,
};
use crate::db::transfer;
use crate::engine::calendar::{day_key, parse_day_key, period_key, week_key};
use crate::engine::placement::{self, Placement};
use crate::engine::rewards;
use crate::engine::streak;
use crate::models::{CompletionRate, Difficulty, GardenItem, Recurrence, Streak, TaskFrequency};
use crate::utils::format::{item_glyph, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const LEAF: &str = "\x1b[38;2;108;160;84m";

// ─── Habits ──────────────────────────────────────────────────────────────────

pub fn handle_habit(conn: &Connection, action: &HabitCommands, today: NaiveDate) -> Result<()> {
    match action {
        HabitCommands::Add { name, every, target } => {
            if name.trim().is_empty() {
                return Err(anyhow!("Habit name cannot be empty"));
            }
            if *target < 1 {
                return Err(anyhow!("Daily target must be at least 1"));
            }
            let recurrence = Recurrence::from_str(every)?;
            let habit = HabitRepo::insert(conn, name.trim(), recurrence, *target)?;
            println_colored!(GREEN, "  ✓ Added habit: {} ({})", habit.name, habit.recurrence);
        }
        HabitCommands::List => {
            let habits = HabitRepo::get_all(conn)?;
            if habits.is_empty() {
                println_colored!(DIM, "  No habits yet. Try: tend habit add \"Meditate\"");
                return Ok(());
            }
            println!();
            println_colored!(LEAF, "  Habits — {}", day_key(today));
            println!();
            for habit in &habits {
                let count = CompletionRepo::count_for_day(conn, habit.id, &day_key(today))?;
                let status = if count >= habit.daily_target as i64 {
                    format!("{}✓\x1b[0m", GREEN)
                } else if habit.daily_target > 1 {
                    format!("{}/{}", count, habit.daily_target)
                } else {
                    "○".to_string()
                };
                println!("  {:<28} {:<14} {}", habit.name, habit.recurrence.to_string(), status);
            }
            println!();
        }
        HabitCommands::Edit { name, every, target, rename } => {
            let mut habit = HabitRepo::find_by_name(conn, name)?
                .ok_or_else(|| anyhow!("Habit '{}' not found", name))?;
            if let Some(every) = every {
                habit.recurrence = Recurrence::from_str(every)?;
            }
            if let Some(target) = target {
                if *target < 1 {
                    return Err(anyhow!("Daily target must be at least 1"));
                }
                habit.daily_target = *target;
            }
            if let Some(rename) = rename {
                if rename.trim().is_empty() {
                    return Err(anyhow!("Habit name cannot be empty"));
                }
                habit.name = rename.trim().to_string();
            }
            HabitRepo::update(conn, &habit)?;
            println_colored!(
                GREEN,
                "  ✓ Updated habit: {} ({}, target {})",
                habit.name,
                habit.recurrence,
                habit.daily_target
            );
        }
        HabitCommands::Done { name, date } => {
            let habit = HabitRepo::find_by_name(conn, name)?
                .ok_or_else(|| anyhow!("Habit '{}' not found", name))?;
            let day = match date {
                Some(s) => parse_day_key(s)
                    .ok_or_else(|| anyhow!("Bad date '{}', expected YYYY-MM-DD", s))?,
                None => today,
            };
            match CompletionRepo::toggle(conn, &habit, &day_key(day))? {
                ToggleOutcome::Cleared => {
                    println_colored!(DIM, "  ○ {} — {} cleared", habit.name, day_key(day));
                }
                ToggleOutcome::Added(count) if count >= habit.daily_target as i64 => {
                    let done = CompletionRepo::completed_days(conn, &habit)?;
                    let current = streak::current_streak(&done, &habit, today);
                    println_colored!(
                        GREEN,
                        "  ✓ {} — done for {} (streak: {})",
                        habit.name,
                        day_key(day),
                        current
                    );
                }
                ToggleOutcome::Added(count) => {
                    println_colored!(AMBER, "  ◑ {} — {}/{}", habit.name, count, habit.daily_target);
                }
            }
        }
        HabitCommands::Remove { name } => {
            let habit = HabitRepo::find_by_name(conn, name)?
                .ok_or_else(|| anyhow!("Habit '{}' not found", name))?;
            HabitRepo::delete(conn, habit.id)?;
            println_colored!(AMBER, "  Removed habit: {} (its plants stay)", habit.name);
        }
    }
    Ok(())
}

// ─── Tasks ───────────────────────────────────────────────────────────────────

pub fn handle_task(conn: &Connection, action: &TaskCommands, today: NaiveDate) -> Result<()> {
    match action {
        TaskCommands::Add { name, every, difficulty } => {
            if name.trim().is_empty() {
                return Err(anyhow!("Task name cannot be empty"));
            }
            let frequency = TaskFrequency::from_str(every)?;
            let difficulty = Difficulty::from_str(difficulty)?;
            let task = TaskRepo::insert(conn, name.trim(), frequency, difficulty)?;
            println_colored!(
                GREEN,
                "  ✓ Added task: {} ({}, {})",
                task.name,
                task.frequency,
                task.difficulty
            );
        }
        TaskCommands::List => {
            let tasks = TaskRepo::get_all(conn)?;
            if tasks.is_empty() {
                println_colored!(DIM, "  No tasks yet. Try: tend task add \"Water plants\"");
                return Ok(());
            }
            println!();
            println_colored!(LEAF, "  Tasks");
            println!();
            for task in &tasks {
                let key = period_key(task.frequency, today);
                let count = TaskCompletionRepo::count_for_period(conn, task.id, &key)?;
                let status = if count >= task.frequency.allowance() {
                    format!("{}✓\x1b[0m", GREEN)
                } else if task.frequency.allowance() > 1 {
                    format!("{}/{}", count, task.frequency.allowance())
                } else {
                    "○".to_string()
                };
                println!(
                    "  {:<28} {:<14} {:<7} {}",
                    task.name,
                    task.frequency.to_string(),
                    task.difficulty.to_string(),
                    status
                );
            }
            println!();
        }
        TaskCommands::Edit { name, every, difficulty, rename } => {
            let mut task = TaskRepo::find_by_name(conn, name)?
                .ok_or_else(|| anyhow!("Task '{}' not found", name))?;
            if let Some(every) = every {
                task.frequency = TaskFrequency::from_str(every)?;
            }
            if let Some(difficulty) = difficulty {
                task.difficulty = Difficulty::from_str(difficulty)?;
            }
            if let Some(rename) = rename {
                if rename.trim().is_empty() {
                    return Err(anyhow!("Task name cannot be empty"));
                }
                task.name = rename.trim().to_string();
            }
            TaskRepo::update(conn, &task)?;
            println_colored!(
                GREEN,
                "  ✓ Updated task: {} ({}, {})",
                task.name,
                task.frequency,
                task.difficulty
            );
        }
        TaskCommands::Done { name } => {
            let task = TaskRepo::find_by_name(conn, name)?
                .ok_or_else(|| anyhow!("Task '{}' not found", name))?;
            let key = period_key(task.frequency, today);
            let count = TaskCompletionRepo::count_for_period(conn, task.id, &key)?;
            if count >= task.frequency.allowance() {
                println_colored!(
                    AMBER,
                    "  {} is already done {} — nothing logged",
                    task.name,
                    task.frequency.period_label()
                );
                return Ok(());
            }
            TaskCompletionRepo::insert(conn, task.id, &key)?;
            match rewards::task_reward(&task, today, &mut rand::thread_rng()) {
                Some(item) => {
                    let item = GardenRepo::insert(conn, &item)?;
                    println_colored!(GREEN, "  ✓ {} — done", task.name);
                    println_colored!(
                        LEAF,
                        "  🎁 New decoration: {} {} (#{})",
                        item.rarity,
                        item.subtype,
                        item.id
                    );
                }
                None => {
                    println_colored!(GREEN, "  ✓ {} — done ✨", task.name);
                }
            }
        }
        TaskCommands::Undo { name } => {
            let task = TaskRepo::find_by_name(conn, name)?
                .ok_or_else(|| anyhow!("Task '{}' not found", name))?;
            let key = period_key(task.frequency, today);
            let completions = TaskCompletionRepo::get_by_period(conn, task.id, &key)?;
            match completions.last() {
                Some(latest) => {
                    TaskCompletionRepo::delete_by_id(conn, latest.id)?;
                    println_colored!(DIM, "  ○ {} — unmarked for {}", task.name, key);
                }
                None => {
                    println_colored!(DIM, "  {} has nothing logged {}", task.name, task.frequency.period_label());
                }
            }
        }
        TaskCommands::Remove { name } => {
            let task = TaskRepo::find_by_name(conn, name)?
                .ok_or_else(|| anyhow!("Task '{}' not found", name))?;
            TaskRepo::delete(conn, task.id)?;
            println_colored!(AMBER, "  Removed task: {}", task.name);
        }
    }
    Ok(())
}

// ─── Garden ──────────────────────────────────────────────────────────────────

pub fn handle_garden(conn: &Connection, config: &AppConfig, today: NaiveDate) -> Result<()> {
    let minted = rewards::scan_weekly_rewards(conn, today, &mut rand::thread_rng())?;
    println!();
    for item in &minted {
        println_colored!(
            LEAF,
            "  🌱 New plant: {} {} — from '{}' ({})",
            item.rarity,
            item.subtype,
            item.owner_name,
            item.week_earned
        );
    }
    if !minted.is_empty() {
        println!();
    }

    let placed = GardenRepo::get_placed(conn)?;
    println_colored!(LEAF, "  Garden ({}x{})", config.garden.columns, config.garden.rows);
    println!();
    for row in 0..config.garden.rows {
        print!("  ");
        for col in 0..config.garden.columns {
            let cell = placed
                .iter()
                .find(|i| i.grid_col == Some(col) && i.grid_row == Some(row));
            match cell {
                Some(item) => print!("{} ", item_glyph(item)),
                None => print!("{}.\x1b[0m ", DIM),
            }
        }
        println!();
    }

    let shed: Vec<GardenItem> = GardenRepo::get_all(conn)?
        .into_iter()
        .filter(|i| !i.placed)
        .collect();
    println!();
    if shed.is_empty() {
        println_colored!(DIM, "  Shed is empty");
    } else {
        println_colored!(BOLD, "  Shed ({} unplaced)", shed.len());
        for item in &shed {
            println!(
                "    #{:<4} {:<10} {:<12} from '{}'",
                item.id,
                item.rarity.to_string(),
                item.subtype,
                item.owner_name
            );
        }
        println_colored!(DIM, "  Place with: tend place <id> <col> <row>");
    }
    println!();
    Ok(())
}

pub fn handle_place(
    conn: &Connection,
    config: &AppConfig,
    item_id: i64,
    col: i32,
    row: i32,
) -> Result<()> {
    if !(0..config.garden.columns).contains(&col) || !(0..config.garden.rows).contains(&row) {
        println_colored!(
            RED,
            "  ({}, {}) is outside the {}x{} grid",
            col,
            row,
            config.garden.columns,
            config.garden.rows
        );
        return Ok(());
    }
    let item = GardenRepo::get_by_id(conn, item_id)?
        .ok_or_else(|| anyhow!("No collectible with id {}", item_id))?;
    match placement::place(conn, item.id, col, row)? {
        Placement::Placed => {
            println_colored!(GREEN, "  ✓ {} placed at ({}, {})", item.subtype, col, row);
        }
        Placement::CellOccupied => {
            println_colored!(AMBER, "  ({}, {}) is taken — pick another cell", col, row);
        }
    }
    Ok(())
}

pub fn handle_unplace(conn: &Connection, item_id: i64) -> Result<()> {
    let item = GardenRepo::get_by_id(conn, item_id)?
        .ok_or_else(|| anyhow!("No collectible with id {}", item_id))?;
    placement::unplace(conn, item.id)?;
    println_colored!(AMBER, "  {} returned to the shed", item.subtype);
    Ok(())
}

// ─── Weekly focus ────────────────────────────────────────────────────────────

pub fn handle_focus(conn: &Connection, action: &FocusCommands, today: NaiveDate) -> Result<()> {
    let week = week_key(today);
    match action {
        FocusCommands::Set { note } => {
            if note.trim().is_empty() {
                return Err(anyhow!("Focus note cannot be empty"));
            }
            FocusRepo::upsert(conn, &week, note.trim())?;
            println_colored!(GREEN, "  ✓ Focus for {}: {}", week, note.trim());
        }
        FocusCommands::Show => match FocusRepo::get_by_week(conn, &week)? {
            Some(focus) => {
                println_colored!(BOLD, "  {} — {}", focus.week_key, focus.note);
            }
            None => {
                println_colored!(DIM, "  No focus set for {}", week);
            }
        },
    }
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(
    conn: &Connection,
    config: &AppConfig,
    show_week: bool,
    today: NaiveDate,
) -> Result<()> {
    let habits = HabitRepo::get_all(conn)?;
    if habits.is_empty() {
        println_colored!(DIM, "  No habits to report on");
        return Ok(());
    }

    let window = config.stats.window_days;
    println!();
    println_colored!(LEAF, "  Statistics (last {} days)", window);
    println!();
    for habit in &habits {
        let done = CompletionRepo::completed_days(conn, habit)?;
        let streak = Streak {
            current: streak::current_streak(&done, habit, today),
            best: streak::best_streak(&done, habit, today),
        };
        let rate = CompletionRate {
            done_days: (0..window)
                .filter_map(|o| today.checked_sub_days(chrono::Days::new(o as u64)))
                .filter(|d| done.contains(d))
                .count() as u32,
            window_days: window,
        };

        println_colored!(
            BOLD,
            "  {:<28} streak {:>3} (best {:>3})  {} {:>4.0}%",
            habit.name,
            streak.current,
            streak.best,
            progress_bar(rate.done_days, rate.window_days, window as usize),
            rate.ratio() * 100.0
        );
        if show_week {
            print!("  {:<28} ", "");
            for offset in (0..window).rev() {
                let day = today
                    .checked_sub_days(chrono::Days::new(offset as u64))
                    .unwrap_or(today);
                if done.contains(&day) {
                    print!("{}●\x1b[0m ", GREEN);
                } else {
                    print!("{}○\x1b[0m ", DIM);
                }
            }
            println!();
        }
    }

    let items = GardenRepo::get_all(conn)?;
    println!();
    println!("  Garden: {} collectibles ({} placed)",
        items.len(),
        items.iter().filter(|i| i.placed).count()
    );
    println!();
    Ok(())
}

// ─── Export / import ─────────────────────────────────────────────────────────

pub fn handle_export(conn: &mut Connection) -> Result<()> {
    let doc = transfer::export_document(conn)?;
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

pub fn handle_import(conn: &mut Connection, file: &std::path::Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .map_err(|e| anyhow!("Could not read {:?}: {}", file, e))?;
    let doc = transfer::parse_document(&json)?;
    transfer::import_document(conn, &doc)?;
    println_colored!(
        GREEN,
        "  ✓ Imported {} habits, {} completions, {} tasks, {} garden items",
        doc.habits.len(),
        doc.completions.len(),
        doc.tasks.len(),
        doc.garden_items.len()
    );
    Ok(())
}

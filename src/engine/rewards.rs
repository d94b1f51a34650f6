use anyhow::Result;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;
use rusqlite::Connection;

use crate::db::repository::{CompletionRepo, GardenRepo, HabitRepo};
use crate::engine::calendar::{day_key, week_key, week_monday};
use crate::models::{Difficulty, GardenItem, Habit, ItemKind, Rarity, Recurrence, Task};

/// Safety bound on the backward week-by-week compliance walk.
pub const WEEK_WALK_CAP: usize = 200;

// ─── Sub-type pools ──────────────────────────────────────────────────────────
// Small fixed pools per tier; a few species straddle adjacent tiers.

const COMMON_PLANTS: &[&str] = &["sprout", "clover", "daisy", "fern"];
const UNCOMMON_PLANTS: &[&str] = &["fern", "tulip", "marigold"];
const RARE_PLANTS: &[&str] = &["rose", "lavender", "bonsai"];
const EPIC_PLANTS: &[&str] = &["bonsai", "orchid", "lotus"];
const LEGENDARY_PLANTS: &[&str] = &["sakura", "golden-oak"];

const MEDIUM_DECORATIONS: &[&str] = &["pebble-path", "lantern", "birdbath"];
const HARD_DECORATIONS: &[&str] = &["fountain", "stone-arch", "koi-pond"];

pub fn plant_pool(rarity: Rarity) -> &'static [&'static str] {
    match rarity {
        Rarity::Common => COMMON_PLANTS,
        Rarity::Uncommon => UNCOMMON_PLANTS,
        Rarity::Rare => RARE_PLANTS,
        Rarity::Epic => EPIC_PLANTS,
        Rarity::Legendary => LEGENDARY_PLANTS,
    }
}

fn pick(pool: &'static [&'static str], rng: &mut impl Rng) -> String {
    pool.choose(rng).copied().unwrap_or(pool[0]).to_string()
}

// ─── Weekly reward engine ────────────────────────────────────────────────────

/// Scans every habit for full compliance in the most recently completed week
/// and mints at most one plant per (habit, week). Run when the garden view
/// opens; the (owner, week) lookup makes repeat runs no-ops.
pub fn scan_weekly_rewards(
    conn: &Connection,
    today: NaiveDate,
    rng: &mut impl Rng,
) -> Result<Vec<GardenItem>> {
    let last_monday = week_monday(today) - Duration::days(7);
    let last_week = week_key(last_monday);

    let mut minted = Vec::new();
    for habit in HabitRepo::get_all(conn)? {
        if GardenRepo::get_by_owner_and_week(conn, &habit.id.to_string(), &last_week)?.is_some() {
            continue;
        }
        if !week_compliant(conn, &habit, last_monday)? {
            continue;
        }

        let weeks = qualifying_weeks(conn, &habit, last_monday)?;
        let rarity = Rarity::from_streak_weeks(weeks);
        let item = GardenItem {
            id: 0,
            kind: ItemKind::Plant,
            subtype: pick(plant_pool(rarity), rng),
            rarity,
            growth_stage: rarity.growth_stage(),
            owner_ref: habit.id.to_string(),
            owner_name: habit.name.clone(),
            week_earned: last_week.clone(),
            placed: false,
            grid_col: None,
            grid_row: None,
            created_at: None,
        };
        minted.push(GardenRepo::insert(conn, &item)?);
        log::info!(
            "minted {} {} for habit '{}' ({} qualifying weeks)",
            rarity.as_str(),
            item.subtype,
            habit.name,
            weeks
        );
    }
    Ok(minted)
}

/// Whether the habit met its compliance bar in the week starting at `monday`.
///
/// Count-based weekly habits need that many distinct days at target; daily
/// habits need all seven days at target.
pub fn week_compliant(conn: &Connection, habit: &Habit, monday: NaiveDate) -> Result<bool> {
    let sunday = monday + Duration::days(6);
    let counts =
        CompletionRepo::counts_in_range(conn, habit.id, &day_key(monday), &day_key(sunday))?;
    let target = habit.daily_target as i64;
    let days_at_target = counts.iter().filter(|(_, c)| *c >= target).count();

    Ok(match habit.recurrence {
        Recurrence::Daily => days_at_target == 7,
        Recurrence::Weekly { times_per_week } => days_at_target >= times_per_week as usize,
    })
}

/// Consecutive qualifying weeks ending at (and including) the week starting
/// at `qualifying_monday`.
fn qualifying_weeks(conn: &Connection, habit: &Habit, qualifying_monday: NaiveDate) -> Result<u32> {
    let mut weeks = 0u32;
    let mut monday = qualifying_monday;
    for _ in 0..WEEK_WALK_CAP {
        if !week_compliant(conn, habit, monday)? {
            break;
        }
        weeks += 1;
        monday -= Duration::days(7);
    }
    Ok(weeks)
}

// ─── Task reward engine ──────────────────────────────────────────────────────

/// Rolls the decoration for a completed task. Easy tasks earn nothing (the
/// caller shows a small celebration instead); medium and hard always earn a
/// decoration — no week gate, one per completion event.
pub fn task_reward(task: &Task, today: NaiveDate, rng: &mut impl Rng) -> Option<GardenItem> {
    let (rarity, pool) = match task.difficulty {
        Difficulty::Easy => return None,
        Difficulty::Medium => (Rarity::Uncommon, MEDIUM_DECORATIONS),
        Difficulty::Hard => (Rarity::Epic, HARD_DECORATIONS),
    };
    Some(GardenItem {
        id: 0,
        kind: ItemKind::Decoration,
        subtype: pick(pool, rng),
        rarity,
        growth_stage: rarity.growth_stage(),
        owner_ref: format!("task-{}", task.id),
        owner_name: task.name.clone(),
        week_earned: day_key(today),
        placed: false,
        grid_col: None,
        grid_row: None,
        created_at: None,
    })
}

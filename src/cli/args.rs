use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tend", version, about = "A terminal habit and task tracker that grows a virtual garden")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: HabitCommands,
    },
    /// Periodic chores
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Open the garden: collect last week's rewards and show the grid
    Garden,
    /// Place a collectible on the garden grid
    Place {
        /// Collectible id (see `tend garden`)
        item: i64,
        /// Grid column, starting at 0
        col: i32,
        /// Grid row, starting at 0
        row: i32,
    },
    /// Return a collectible to the shed
    Unplace {
        /// Collectible id
        item: i64,
    },
    /// Weekly focus note
    Focus {
        #[command(subcommand)]
        action: FocusCommands,
    },
    /// Show streaks and completion rates
    Stats {
        /// Show a per-day bar for the recent window
        #[arg(long)]
        week: bool,
    },
    /// Dump all data as JSON to stdout
    Export,
    /// Replace all data from a JSON export
    Import {
        /// Path to the exported file
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum HabitCommands {
    /// Add a habit
    Add {
        /// Habit name
        name: String,
        /// Recurrence: daily or weekly:N (N times per week, 1-7)
        #[arg(long, default_value = "daily")]
        every: String,
        /// Completions needed per day before the day counts
        #[arg(long, default_value = "1")]
        target: i32,
    },
    /// List habits with today's progress
    List,
    /// Change a habit's schedule or target
    Edit {
        /// Habit name
        name: String,
        /// New recurrence: daily or weekly:N
        #[arg(long)]
        every: Option<String>,
        /// New per-day completion target
        #[arg(long)]
        target: Option<i32>,
        /// New name
        #[arg(long)]
        rename: Option<String>,
    },
    /// Toggle a completion for a habit (at target, clears the day)
    Done {
        /// Habit name
        name: String,
        /// Day to log, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a habit and its completion history
    Remove {
        /// Habit name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Add a task
    Add {
        /// Task name
        name: String,
        /// Frequency: once, weekly, twice-monthly, monthly, quarterly
        #[arg(long, default_value = "once")]
        every: String,
        /// Difficulty: easy, medium, hard
        #[arg(long, default_value = "medium")]
        difficulty: String,
    },
    /// List tasks with this period's status
    List,
    /// Change a task's frequency or difficulty
    Edit {
        /// Task name
        name: String,
        /// New frequency: once, weekly, twice-monthly, monthly, quarterly
        #[arg(long)]
        every: Option<String>,
        /// New difficulty: easy, medium, hard
        #[arg(long)]
        difficulty: Option<String>,
        /// New name
        #[arg(long)]
        rename: Option<String>,
    },
    /// Complete a task for the current period
    Done {
        /// Task name
        name: String,
    },
    /// Remove the latest completion logged for the current period
    Undo {
        /// Task name
        name: String,
    },
    /// Delete a task and its completion history
    Remove {
        /// Task name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum FocusCommands {
    /// Set this week's focus note
    Set {
        /// Free-text note
        note: String,
    },
    /// Show this week's focus note
    Show,
}

pub mod focus;
pub mod garden;
pub mod habit;
pub mod stats;
pub mod task;

pub use focus::WeeklyFocus;
pub use garden::{GardenItem, ItemKind, Rarity};
pub use habit::{Completion, Habit, Recurrence};
pub use stats::{CompletionRate, Streak};
pub use task::{Difficulty, Task, TaskCompletion, TaskFrequency};

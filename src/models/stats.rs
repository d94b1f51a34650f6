use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

/// Completed days within a recent window, for the stats view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRate {
    pub done_days: u32,
    pub window_days: u32,
}

impl CompletionRate {
    pub fn ratio(&self) -> f64 {
        if self.window_days == 0 {
            0.0
        } else {
            self.done_days as f64 / self.window_days as f64
        }
    }
}

pub mod calendar;
pub mod placement;
pub mod rewards;
pub mod streak;

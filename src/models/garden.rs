#![allow(dead_code)]
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Plant,
    Decoration,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Plant => "plant",
            ItemKind::Decoration => "decoration",
        }
    }
}

impl FromStr for ItemKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plant" => Ok(ItemKind::Plant),
            "decoration" => Ok(ItemKind::Decoration),
            _ => Err(anyhow::anyhow!("Unknown item kind: {}", s)),
        }
    }
}

/// Ordered rarity scale; decorations reuse `Uncommon`/`Epic` so they blend
/// into the same visual palette as plants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    /// Growth stage shown in the garden, common=1 up to legendary=5.
    pub fn growth_stage(&self) -> i32 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 3,
            Rarity::Epic => 4,
            Rarity::Legendary => 5,
        }
    }

    /// Maps consecutive qualifying weeks to a rarity tier.
    pub fn from_streak_weeks(weeks: u32) -> Rarity {
        match weeks {
            w if w >= 12 => Rarity::Legendary,
            w if w >= 8 => Rarity::Epic,
            w if w >= 4 => Rarity::Rare,
            w if w >= 2 => Rarity::Uncommon,
            _ => Rarity::Common,
        }
    }
}

impl FromStr for Rarity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" => Ok(Rarity::Common),
            "uncommon" => Ok(Rarity::Uncommon),
            "rare" => Ok(Rarity::Rare),
            "epic" => Ok(Rarity::Epic),
            "legendary" => Ok(Rarity::Legendary),
            _ => Err(anyhow::anyhow!("Unknown rarity: {}", s)),
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A collectible earned from habit streaks or task completions, placeable
/// on the garden grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenItem {
    pub id: i64,
    pub kind: ItemKind,
    /// Species or decoration tag, e.g. "fern", "koi-pond".
    pub subtype: String,
    pub rarity: Rarity,
    pub growth_stage: i32,
    /// Habit id as text, or "task-<id>" for decorations.
    pub owner_ref: String,
    /// Snapshot of the owner's display name at mint time; the owning habit
    /// or task may be deleted later while this item persists.
    pub owner_name: String,
    /// ISO week key for plants; the mint day key for decorations.
    pub week_earned: String,
    pub placed: bool,
    pub grid_col: Option<i32>,
    pub grid_row: Option<i32>,
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarity_thresholds() {
        assert_eq!(Rarity::from_streak_weeks(1), Rarity::Common);
        assert_eq!(Rarity::from_streak_weeks(2), Rarity::Uncommon);
        assert_eq!(Rarity::from_streak_weeks(4), Rarity::Rare);
        assert_eq!(Rarity::from_streak_weeks(8), Rarity::Epic);
        assert_eq!(Rarity::from_streak_weeks(12), Rarity::Legendary);
    }

    #[test]
    fn rarity_mapping_is_monotonic() {
        let mut last = Rarity::Common;
        for weeks in 0..20 {
            let r = Rarity::from_streak_weeks(weeks);
            assert!(r >= last, "rarity dropped at {} weeks", weeks);
            last = r;
        }
    }

    #[test]
    fn growth_stage_tracks_rarity() {
        assert_eq!(Rarity::Common.growth_stage(), 1);
        assert_eq!(Rarity::Legendary.growth_stage(), 5);
    }
}

use crate::models::{GardenItem, ItemKind, Rarity};

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Single glyph for a garden cell, by kind and maturity.
pub fn item_glyph(item: &GardenItem) -> &'static str {
    match item.kind {
        ItemKind::Decoration => "◆",
        ItemKind::Plant => match item.rarity {
            Rarity::Common => "·",
            Rarity::Uncommon => "❀",
            Rarity::Rare => "✿",
            Rarity::Epic => "❁",
            Rarity::Legendary => "✾",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_fixed_width() {
        assert_eq!(progress_bar(0, 7, 7).chars().count(), 7);
        assert_eq!(progress_bar(7, 7, 7).chars().count(), 7);
        assert_eq!(progress_bar(3, 0, 7).chars().count(), 7);
    }
}

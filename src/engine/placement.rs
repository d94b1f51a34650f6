use anyhow::Result;
use rusqlite::Connection;

use crate::db::repository::GardenRepo;

/// Outcome of a placement attempt. A taken cell is a normal answer, not an
/// error; the caller asks for a different cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Placed,
    CellOccupied,
}

/// Places a collectible at (col, row) unless another placed item already
/// occupies the cell. Occupancy is a linear scan over placed items; the
/// inventory stays small enough that no coordinate index is kept.
pub fn place(conn: &Connection, item_id: i64, col: i32, row: i32) -> Result<Placement> {
    for item in GardenRepo::get_placed(conn)? {
        if item.id != item_id && item.grid_col == Some(col) && item.grid_row == Some(row) {
            return Ok(Placement::CellOccupied);
        }
    }
    GardenRepo::set_placement(conn, item_id, col, row)?;
    Ok(Placement::Placed)
}

/// Returns a collectible to the unplaced inventory.
pub fn unplace(conn: &Connection, item_id: i64) -> Result<()> {
    GardenRepo::clear_placement(conn, item_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{GardenItem, ItemKind, Rarity};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn mint(conn: &Connection, name: &str) -> GardenItem {
        GardenRepo::insert(
            conn,
            &GardenItem {
                id: 0,
                kind: ItemKind::Plant,
                subtype: "fern".to_string(),
                rarity: Rarity::Common,
                growth_stage: 1,
                owner_ref: "1".to_string(),
                owner_name: name.to_string(),
                week_earned: "2026-W34".to_string(),
                placed: false,
                grid_col: None,
                grid_row: None,
                created_at: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn place_then_collide_leaves_state_unchanged() {
        let conn = test_conn();
        let a = mint(&conn, "A");
        let b = mint(&conn, "B");

        assert_eq!(place(&conn, a.id, 2, 3).unwrap(), Placement::Placed);
        assert_eq!(place(&conn, b.id, 2, 3).unwrap(), Placement::CellOccupied);

        let b_after = GardenRepo::get_by_id(&conn, b.id).unwrap().unwrap();
        assert!(!b_after.placed);
        assert_eq!(b_after.grid_col, None);
        let a_after = GardenRepo::get_by_id(&conn, a.id).unwrap().unwrap();
        assert_eq!((a_after.grid_col, a_after.grid_row), (Some(2), Some(3)));
    }

    #[test]
    fn replacing_an_item_on_its_own_cell_is_fine() {
        let conn = test_conn();
        let a = mint(&conn, "A");
        assert_eq!(place(&conn, a.id, 1, 1).unwrap(), Placement::Placed);
        assert_eq!(place(&conn, a.id, 1, 1).unwrap(), Placement::Placed);
        // Moving to a free cell also works.
        assert_eq!(place(&conn, a.id, 4, 4).unwrap(), Placement::Placed);
    }

    #[test]
    fn unplace_frees_the_cell() {
        let conn = test_conn();
        let a = mint(&conn, "A");
        let b = mint(&conn, "B");
        place(&conn, a.id, 0, 0).unwrap();
        unplace(&conn, a.id).unwrap();
        assert_eq!(place(&conn, b.id, 0, 0).unwrap(), Placement::Placed);
    }
}

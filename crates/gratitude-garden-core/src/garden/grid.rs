use std::collections::{BTreeSet, HashMap};

use rand::seq::SliceRandom;
use rand::Rng;

use super::plant::{GridPosition, Plant, PlantType, GRID_SIZE};
use crate::error::GardenError;
use crate::unlocks::{available_plant_types, Unlock};

/// Placeholder for an empty cell in the text grid.
pub const EMPTY_CELL: &str = "·";

/// Plant occupying `position`, if any.
pub fn plant_at(plants: &[Plant], position: GridPosition) -> Option<&Plant> {
    plants.iter().find(|p| p.position == position)
}

/// Refuse a position that already holds a plant.
pub fn ensure_free(plants: &[Plant], position: GridPosition) -> Result<(), GardenError> {
    match plant_at(plants, position) {
        Some(_) => Err(GardenError::CellOccupied(position)),
        None => Ok(()),
    }
}

/// Pick a plant type uniformly among those the unlocks allow.
pub fn choose_plant_type<R: Rng + ?Sized>(unlocked: &BTreeSet<Unlock>, rng: &mut R) -> PlantType {
    available_plant_types(unlocked)
        .choose(rng)
        .copied()
        .unwrap_or(PlantType::Basic)
}

/// Render the garden as rows of glyphs, top row first.
pub fn render_grid(plants: &[Plant]) -> String {
    let by_cell: HashMap<GridPosition, &Plant> = plants.iter().map(|p| (p.position, p)).collect();
    let mut out = String::new();
    for y in 0..GRID_SIZE {
        let row: Vec<&str> = (0..GRID_SIZE)
            .map(|x| {
                by_cell
                    .get(&GridPosition::new(x, y))
                    .map(|p| p.glyph())
                    .unwrap_or(EMPTY_CELL)
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::Entry;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn plant(x: u8, y: u8) -> Plant {
        let now = Utc::now();
        let entry = Entry::new("walks", now).unwrap();
        Plant::new(&entry, PlantType::Basic, GridPosition::new(x, y), now)
    }

    #[test]
    fn occupied_cell_is_refused() {
        let plants = vec![plant(4, 5)];
        assert_eq!(
            ensure_free(&plants, GridPosition::new(4, 5)),
            Err(GardenError::CellOccupied(GridPosition::new(4, 5)))
        );
        assert!(ensure_free(&plants, GridPosition::new(5, 4)).is_ok());
    }

    #[test]
    fn basic_only_without_unlocks() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(choose_plant_type(&BTreeSet::new(), &mut rng), PlantType::Basic);
        }
    }

    #[test]
    fn unlocked_types_can_be_chosen() {
        let mut rng = StdRng::seed_from_u64(11);
        let unlocked: BTreeSet<Unlock> = [Unlock::Tree].into_iter().collect();
        let picks: BTreeSet<&str> = (0..64)
            .map(|_| choose_plant_type(&unlocked, &mut rng).id())
            .collect();
        assert_eq!(picks, ["basic", "tree"].into_iter().collect());
    }

    #[test]
    fn render_places_glyphs() {
        let grid = render_grid(&[plant(0, 0)]);
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), GRID_SIZE as usize);
        assert!(lines[0].starts_with("🌱 ·"));
        assert!(lines[1].chars().all(|c| c == '·' || c == ' '));
    }
}

//! Population registry: the single source of truth for live animals.

use crate::animal::Animal;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use savanna_core::{Error, Position, Result, Species, TickCounts};
use std::collections::HashSet;

/// Ordered collection of animals, each storing its own position.
/// Phases mark animals dead in place (the cell reference is cleared,
/// so occupancy queries skip them) and a single `compact` pass
/// removes the marked entries afterwards.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    animals: Vec<Animal>,
}

impl Registry {
    pub fn with_animals(animals: Vec<Animal>) -> Self {
        Self { animals }
    }

    /// Seed an initial population: positions drawn uniformly without
    /// replacement, zebras first, then lions. Callers must have
    /// validated that the population fits the grid.
    pub fn seed(grid_size: i32, zebras: u32, lions: u32, rng: &mut ChaCha8Rng) -> Self {
        let mut free: Vec<Position> = (0..grid_size)
            .flat_map(|row| (0..grid_size).map(move |col| Position::new(row, col)))
            .collect();

        let mut animals = Vec::with_capacity((zebras + lions) as usize);
        for species in [Species::Zebra, Species::Lion] {
            let count = match species {
                Species::Zebra => zebras,
                Species::Lion => lions,
            };
            for _ in 0..count {
                let position = free.swap_remove(rng.gen_range(0..free.len()));
                animals.push(Animal::new(species, position, false, rng));
            }
        }

        Self { animals }
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    pub fn get(&self, index: usize) -> &Animal {
        &self.animals[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut Animal {
        &mut self.animals[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Animal> {
        self.animals.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Animal> {
        self.animals.iter_mut()
    }

    /// Stable sort into left-to-right, top-to-bottom order (ascending
    /// row, then column).
    pub fn sort_lrtb(&mut self) {
        self.animals.sort_by_key(|a| a.cell);
    }

    /// First entry in registry order occupying `pos`. Duplicate
    /// positions (possible after births) resolve to the first match,
    /// which is the LRTB-smallest index once sorted.
    pub fn occupant_index(&self, pos: Position) -> Option<usize> {
        self.animals.iter().position(|a| a.cell == Some(pos))
    }

    pub fn occupant(&self, pos: Position) -> Option<&Animal> {
        self.occupant_index(pos).map(|i| &self.animals[i])
    }

    /// Positions of all registered animals still holding a cell.
    pub fn occupied_positions(&self) -> HashSet<Position> {
        self.animals.iter().filter_map(|a| a.cell).collect()
    }

    /// Positions held by animals of one species.
    pub fn positions_of(&self, species: Species) -> HashSet<Position> {
        self.animals
            .iter()
            .filter(|a| a.species == species)
            .filter_map(|a| a.cell)
            .collect()
    }

    /// Append offspring created during a reproduction pass.
    pub fn extend(&mut self, children: Vec<Animal>) {
        self.animals.extend(children);
    }

    /// Remove every entry marked dead since the last compaction.
    pub fn compact(&mut self) {
        self.animals.retain(|a| a.alive);
    }

    /// Alive population per species.
    pub fn counts(&self) -> TickCounts {
        let mut counts = TickCounts::default();
        for animal in self.animals.iter().filter(|a| a.alive) {
            match animal.species {
                Species::Zebra => counts.zebras += 1,
                Species::Lion => counts.lions += 1,
            }
        }
        counts
    }

    /// Fail fast on registry corruption: a dead entry keeping its
    /// cell, an alive entry without one, or (when `forbid_overlap`)
    /// two alive animals sharing a position.
    pub fn check_invariants(&self, forbid_overlap: bool) -> Result<()> {
        let mut seen = HashSet::new();
        for animal in &self.animals {
            match (animal.alive, animal.cell) {
                (false, Some(pos)) => {
                    return Err(Error::Invariant(format!(
                        "dead {} still holds cell {}",
                        animal.species, pos
                    )));
                }
                (true, None) => {
                    return Err(Error::Invariant(format!(
                        "alive {} has no cell reference",
                        animal.species
                    )));
                }
                (true, Some(pos)) if forbid_overlap => {
                    if !seen.insert(pos) {
                        return Err(Error::Invariant(format!(
                            "two alive animals share position {}",
                            pos
                        )));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    #[test]
    fn test_seed_population_counts_and_uniqueness() {
        let mut r = rng();
        let registry = Registry::seed(10, 26, 10, &mut r);

        let counts = registry.counts();
        assert_eq!(counts.zebras, 26);
        assert_eq!(counts.lions, 10);

        let positions = registry.occupied_positions();
        assert_eq!(positions.len(), 36);
        for pos in &positions {
            assert!(pos.in_bounds(10));
        }
    }

    #[test]
    fn test_seed_can_fill_the_grid() {
        let mut r = rng();
        let registry = Registry::seed(3, 5, 4, &mut r);
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.occupied_positions().len(), 9);
    }

    #[test]
    fn test_sort_lrtb() {
        let mut r = rng();
        let mut registry = Registry::with_animals(vec![
            Animal::new(Species::Zebra, Position::new(2, 0), true, &mut r),
            Animal::new(Species::Lion, Position::new(0, 1), true, &mut r),
            Animal::new(Species::Zebra, Position::new(0, 0), true, &mut r),
            Animal::new(Species::Lion, Position::new(1, 2), true, &mut r),
        ]);

        registry.sort_lrtb();
        let positions: Vec<Position> =
            registry.iter().filter_map(|a| a.cell).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 2),
                Position::new(2, 0),
            ]
        );
    }

    #[test]
    fn test_dead_animals_do_not_occupy() {
        let mut r = rng();
        let mut registry = Registry::with_animals(vec![Animal::new(
            Species::Zebra,
            Position::new(1, 1),
            true,
            &mut r,
        )]);

        assert!(registry.occupant(Position::new(1, 1)).is_some());
        registry.get_mut(0).set_dead();
        assert!(registry.occupant(Position::new(1, 1)).is_none());
        assert!(registry.occupied_positions().is_empty());
    }

    #[test]
    fn test_compact_removes_marked_entries() {
        let mut r = rng();
        let mut registry = Registry::with_animals(vec![
            Animal::new(Species::Zebra, Position::new(0, 0), true, &mut r),
            Animal::new(Species::Zebra, Position::new(0, 1), true, &mut r),
            Animal::new(Species::Lion, Position::new(0, 2), true, &mut r),
        ]);

        registry.get_mut(1).set_dead();
        registry.compact();

        assert_eq!(registry.len(), 2);
        assert!(registry.iter().all(|a| a.alive));
        assert_eq!(registry.counts(), TickCounts::new(1, 1));
    }

    #[test]
    fn test_occupancy_resolves_first_match() {
        let mut r = rng();
        let mut zebra = Animal::new(Species::Zebra, Position::new(1, 1), true, &mut r);
        let lion = Animal::new(Species::Lion, Position::new(1, 1), true, &mut r);
        zebra.age = 3;

        let registry = Registry::with_animals(vec![zebra, lion]);
        let occupant = registry.occupant(Position::new(1, 1)).unwrap();
        assert_eq!(occupant.species, Species::Zebra);
    }

    #[test]
    fn test_invariant_dead_with_cell() {
        let mut r = rng();
        let mut animal = Animal::new(Species::Lion, Position::new(0, 0), true, &mut r);
        animal.alive = false; // cell left in place

        let registry = Registry::with_animals(vec![animal]);
        assert!(registry.check_invariants(false).is_err());
    }

    #[test]
    fn test_invariant_overlap_detection() {
        let mut r = rng();
        let registry = Registry::with_animals(vec![
            Animal::new(Species::Zebra, Position::new(2, 2), true, &mut r),
            Animal::new(Species::Zebra, Position::new(2, 2), true, &mut r),
        ]);

        assert!(registry.check_invariants(false).is_ok());
        assert!(registry.check_invariants(true).is_err());
    }
}

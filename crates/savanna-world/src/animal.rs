//! Animal state, lifecycle rules, and per-species movement policies.

use crate::grid::Grid;
use crate::registry::Registry;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use savanna_core::{AnimalId, Error, Position, Result, Species};

/// An animal in the simulation. A single entity type carries the
/// species tag; species-specific behavior comes from the constant
/// table on [`Species`] and the movement policy dispatch below.
#[derive(Debug, Clone)]
pub struct Animal {
    pub id: AnimalId,
    pub species: Species,
    pub age: u32,
    /// Per-instance draw from the species range; death is exact equality.
    pub max_age: u32,
    pub reproduction_period: u32,
    pub time_since_last_meal: u32,
    pub time_since_reproduction: u32,
    /// Drawn for lions at creation, never consulted by any rule.
    pub aggressivity: Option<f64>,
    pub alive: bool,
    /// Current cell; cleared once dead so the entry stops matching
    /// occupancy queries until compaction removes it.
    pub cell: Option<Position>,
}

impl Animal {
    /// Create an animal at `cell`. Newborns start at age 0; seeded
    /// animals get a uniform age in `[0, max_age / 2]`.
    pub fn new(species: Species, cell: Position, newborn: bool, rng: &mut ChaCha8Rng) -> Self {
        let params = species.params();
        let max_age = rng.gen_range(params.max_age_range.0..=params.max_age_range.1);
        let reproduction_period =
            rng.gen_range(params.reproduction_range.0..=params.reproduction_range.1);
        let age = if newborn {
            0
        } else {
            rng.gen_range(0..=max_age / 2)
        };
        let aggressivity = match species {
            Species::Lion => Some((rng.gen::<f64>() * 100.0).round() / 100.0),
            Species::Zebra => None,
        };

        Self {
            id: AnimalId::new(),
            species,
            age,
            max_age,
            reproduction_period,
            time_since_last_meal: 0,
            time_since_reproduction: 0,
            aggressivity,
            alive: true,
            cell: Some(cell),
        }
    }

    /// Advance every time-based counter by one tick.
    pub fn time_passes(&mut self) {
        self.age += 1;
        self.time_since_last_meal += 1;
        self.time_since_reproduction += 1;
    }

    /// Exact equality: an animal whose age somehow skips this value
    /// never dies of age.
    pub fn dies_of_old_age(&self) -> bool {
        self.age == self.max_age
    }

    /// Only lions starve, and only at exactly the species hunger
    /// limit. Zebras never die of hunger by rule.
    pub fn dies_of_hunger(&self) -> bool {
        match self.species.params().hunger_limit {
            Some(limit) => self.time_since_last_meal == limit,
            None => false,
        }
    }

    pub fn can_reproduce(&self) -> bool {
        self.time_since_reproduction >= self.reproduction_period
    }

    pub fn can_eat(&self, other: &Animal) -> bool {
        self.species.preys_on(other.species)
    }

    /// Mark dead and release the cell so other animals can move
    /// through it before compaction.
    pub fn set_dead(&mut self) {
        self.alive = false;
        self.cell = None;
    }
}

/// Movement policy: given the animal, pick its destination for this
/// tick. Returning the animal's own cell means "stay in place".
pub type MovementPolicy =
    fn(&Animal, &Grid, &Registry, &mut ChaCha8Rng) -> Result<Position>;

impl Animal {
    pub fn movement_policy(&self) -> MovementPolicy {
        match self.species {
            Species::Zebra => zebra_pick_neighbour,
            Species::Lion => lion_pick_neighbour,
        }
    }
}

fn own_cell(animal: &Animal) -> Result<Position> {
    animal.cell.ok_or_else(|| {
        Error::Invariant(format!("alive {} has no cell reference", animal.species))
    })
}

/// Zebras avoid the positions of all registered animals, of either
/// species. No free distance-1 neighbor means stay in place.
fn zebra_pick_neighbour(
    animal: &Animal,
    grid: &Grid,
    registry: &Registry,
    rng: &mut ChaCha8Rng,
) -> Result<Position> {
    let cell = own_cell(animal)?;
    let avoid = registry.occupied_positions();
    let available = grid.available_neighbors(cell, &avoid, 1);

    let free = &available[0];
    if free.is_empty() {
        Ok(cell)
    } else {
        Ok(free[rng.gen_range(0..free.len())])
    }
}

/// Lions avoid only other lions. Among the remaining distance-1
/// neighbors, a zebra-occupied cell is always preferred over an
/// empty one; no candidate at all means stay in place.
fn lion_pick_neighbour(
    animal: &Animal,
    grid: &Grid,
    registry: &Registry,
    rng: &mut ChaCha8Rng,
) -> Result<Position> {
    let cell = own_cell(animal)?;
    let avoid = registry.positions_of(Species::Lion);
    let available = grid.available_neighbors(cell, &avoid, 1);

    let mut zebra_neighbours = Vec::new();
    let mut empty_neighbours = Vec::new();

    for &pos in &available[0] {
        match registry.occupant(pos) {
            None => empty_neighbours.push(pos),
            Some(other) if other.species == Species::Zebra => zebra_neighbours.push(pos),
            Some(other) => {
                return Err(Error::Invariant(format!(
                    "lion at {} found a {} at {} that is neither prey nor excluded",
                    cell, other.species, pos
                )));
            }
        }
    }

    if !zebra_neighbours.is_empty() {
        Ok(zebra_neighbours[rng.gen_range(0..zebra_neighbours.len())])
    } else if !empty_neighbours.is_empty() {
        Ok(empty_neighbours[rng.gen_range(0..empty_neighbours.len())])
    } else {
        Ok(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn zebra_at(row: i32, col: i32) -> Animal {
        Animal::new(Species::Zebra, Position::new(row, col), true, &mut rng())
    }

    fn lion_at(row: i32, col: i32) -> Animal {
        Animal::new(Species::Lion, Position::new(row, col), true, &mut rng())
    }

    #[test]
    fn test_newborn_starts_at_zero() {
        let animal = zebra_at(2, 2);
        assert_eq!(animal.age, 0);
        assert_eq!(animal.time_since_last_meal, 0);
        assert_eq!(animal.time_since_reproduction, 0);
        assert!(animal.alive);
        assert_eq!(animal.cell, Some(Position::new(2, 2)));
    }

    #[test]
    fn test_seeded_animal_age_within_half_max() {
        let mut r = rng();
        for _ in 0..100 {
            let animal = Animal::new(Species::Zebra, Position::new(0, 0), false, &mut r);
            assert!(animal.age <= animal.max_age / 2);
            assert!((8..=10).contains(&animal.max_age));
            assert!((3..=4).contains(&animal.reproduction_period));
        }
    }

    #[test]
    fn test_lion_carries_aggressivity_zebra_does_not() {
        let lion = lion_at(0, 0);
        let aggressivity = lion.aggressivity.unwrap();
        assert!((0.0..=1.0).contains(&aggressivity));

        assert!(zebra_at(0, 0).aggressivity.is_none());
    }

    #[test]
    fn test_time_passes_increments_all_counters() {
        let mut animal = zebra_at(0, 0);
        animal.time_passes();
        animal.time_passes();
        assert_eq!(animal.age, 2);
        assert_eq!(animal.time_since_last_meal, 2);
        assert_eq!(animal.time_since_reproduction, 2);
    }

    #[test]
    fn test_old_age_is_exact_equality() {
        let mut animal = zebra_at(0, 0);
        animal.max_age = 9;

        animal.age = 8;
        assert!(!animal.dies_of_old_age());
        animal.age = 9;
        assert!(animal.dies_of_old_age());
        // a skipped value never triggers the rule
        animal.age = 10;
        assert!(!animal.dies_of_old_age());
    }

    #[test]
    fn test_hunger_death_is_exact_and_lion_only() {
        let mut lion = lion_at(0, 0);
        lion.time_since_last_meal = 5;
        assert!(!lion.dies_of_hunger());
        lion.time_since_last_meal = 6;
        assert!(lion.dies_of_hunger());
        lion.time_since_last_meal = 7;
        assert!(!lion.dies_of_hunger());

        let mut zebra = zebra_at(0, 0);
        zebra.time_since_last_meal = 6;
        assert!(!zebra.dies_of_hunger());
        zebra.time_since_last_meal = 40;
        assert!(!zebra.dies_of_hunger());
    }

    #[test]
    fn test_reproduction_eligibility() {
        let mut animal = zebra_at(0, 0);
        animal.reproduction_period = 3;

        animal.time_since_reproduction = 2;
        assert!(!animal.can_reproduce());
        animal.time_since_reproduction = 3;
        assert!(animal.can_reproduce());
        animal.time_since_reproduction = 9;
        assert!(animal.can_reproduce());
    }

    #[test]
    fn test_can_eat_is_lion_on_zebra_only() {
        let lion = lion_at(0, 0);
        let zebra = zebra_at(0, 1);
        assert!(lion.can_eat(&zebra));
        assert!(!zebra.can_eat(&lion));
        assert!(!lion.can_eat(&lion));
        assert!(!zebra.can_eat(&zebra));
    }

    #[test]
    fn test_set_dead_clears_cell() {
        let mut animal = zebra_at(1, 1);
        animal.set_dead();
        assert!(!animal.alive);
        assert_eq!(animal.cell, None);
    }

    #[test]
    fn test_surrounded_zebra_stays_in_place() {
        let grid = Grid::build(3);
        let center = Position::new(1, 1);

        let mut animals = vec![zebra_at(1, 1)];
        for &pos in grid.ring(center, 0) {
            animals.push(lion_at(pos.row, pos.col));
        }
        let registry = Registry::with_animals(animals);

        let mut r = rng();
        let zebra = registry.occupant(center).unwrap();
        let destination =
            zebra_pick_neighbour(zebra, &grid, &registry, &mut r).unwrap();
        assert_eq!(destination, center);
    }

    #[test]
    fn test_lion_prefers_zebra_over_empty() {
        let grid = Grid::build(3);
        let animals = vec![lion_at(1, 1), zebra_at(1, 2)];
        let registry = Registry::with_animals(animals);

        let mut r = rng();
        let lion = registry.occupant(Position::new(1, 1)).unwrap();
        for _ in 0..20 {
            let destination =
                lion_pick_neighbour(lion, &grid, &registry, &mut r).unwrap();
            assert_eq!(destination, Position::new(1, 2));
        }
    }

    #[test]
    fn test_lion_surrounded_by_lions_stays() {
        let grid = Grid::build(3);
        let center = Position::new(1, 1);

        let mut animals = vec![lion_at(1, 1)];
        for &pos in grid.ring(center, 0) {
            animals.push(lion_at(pos.row, pos.col));
        }
        let registry = Registry::with_animals(animals);

        let mut r = rng();
        let lion = registry.occupant(center).unwrap();
        let destination = lion_pick_neighbour(lion, &grid, &registry, &mut r).unwrap();
        assert_eq!(destination, center);
    }

    #[test]
    fn test_zebra_never_picks_occupied_cell() {
        let grid = Grid::build(3);
        let animals = vec![zebra_at(1, 1), zebra_at(1, 2), lion_at(0, 0)];
        let registry = Registry::with_animals(animals);

        let mut r = rng();
        let zebra = registry.occupant(Position::new(1, 1)).unwrap();
        for _ in 0..50 {
            let destination =
                zebra_pick_neighbour(zebra, &grid, &registry, &mut r).unwrap();
            assert_ne!(destination, Position::new(1, 2));
            assert_ne!(destination, Position::new(0, 0));
            assert_ne!(destination, Position::new(1, 1));
        }
    }
}

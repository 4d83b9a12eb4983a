//! The per-tick pipeline: aging and death, movement with predation,
//! reproduction.

use crate::animal::Animal;
use crate::grid::Grid;
use crate::registry::Registry;
use crate::snapshot::PopulationSnapshot;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand::SeedableRng;
use savanna_core::{Error, Position, Result, SimulationConfig, TickCounts};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// One run of the ecosystem on a freshly built grid.
pub struct Simulation {
    grid: Grid,
    registry: Registry,
    rng: ChaCha8Rng,
    tick: u32,
}

impl Simulation {
    /// Build the grid and seed the initial population from `config`.
    pub fn new(config: &SimulationConfig, mut rng: ChaCha8Rng) -> Self {
        let grid = Grid::build(config.grid_size);
        let registry = Registry::seed(
            config.grid_size,
            config.initial_zebras,
            config.initial_lions,
            &mut rng,
        );

        Self {
            grid,
            registry,
            rng,
            tick: 0,
        }
    }

    /// The simulation for run `run` of a batch: every run gets its
    /// own deterministically derived seed, so runs are independent
    /// and individually reproducible.
    pub fn for_run(config: &SimulationConfig, run: u32) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(run as u64));
        Self::new(config, rng)
    }

    /// A simulation over a population prepared by the caller.
    pub fn with_population(grid_size: i32, animals: Vec<Animal>, rng: ChaCha8Rng) -> Self {
        Self {
            grid: Grid::build(grid_size),
            registry: Registry::with_animals(animals),
            rng,
            tick: 0,
        }
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Advance the ecosystem one tick. Phase order is fixed: LRTB
    /// sort, age/hunger deaths, movement with predation, LRTB sort
    /// again (movement disturbs ordering), reproduction. Returns the
    /// alive counts at the tick boundary.
    pub fn step(&mut self) -> Result<TickCounts> {
        self.tick += 1;

        self.registry.sort_lrtb();
        self.age_hunger_phase();
        self.movement_phase()?;
        self.registry.sort_lrtb();
        self.reproduction_phase();

        let counts = self.registry.counts();
        trace!(
            tick = self.tick,
            zebras = counts.zebras,
            lions = counts.lions,
            "tick complete"
        );
        Ok(counts)
    }

    /// Age every animal one tick, then remove the ones that reached
    /// their exact death condition.
    fn age_hunger_phase(&mut self) {
        let mut deaths = 0;
        for animal in self.registry.iter_mut() {
            animal.time_passes();
            if animal.dies_of_old_age() || animal.dies_of_hunger() {
                trace!(
                    species = %animal.species,
                    age = animal.age,
                    time_since_last_meal = animal.time_since_last_meal,
                    "death by age or hunger"
                );
                animal.set_dead();
                deaths += 1;
            }
        }
        self.registry.compact();

        if deaths > 0 {
            debug!(tick = self.tick, deaths, "age/hunger phase removed animals");
        }
    }

    /// Move every alive animal in LRTB order, resolving predation
    /// when a destination is occupied, then compact.
    fn movement_phase(&mut self) -> Result<()> {
        let len = self.registry.len();

        for mover in 0..len {
            if !self.registry.get(mover).alive {
                continue;
            }
            let animal = self.registry.get(mover);
            let Some(cell) = animal.cell else {
                return Err(Error::Invariant(format!(
                    "alive {} has no cell reference",
                    animal.species
                )));
            };

            let destination =
                (animal.movement_policy())(animal, &self.grid, &self.registry, &mut self.rng)?;
            if destination == cell {
                continue;
            }

            match self.registry.occupant_index(destination) {
                Some(occupant) => {
                    let mover_eats =
                        self.registry.get(mover).can_eat(self.registry.get(occupant));
                    let occupant_eats =
                        self.registry.get(occupant).can_eat(self.registry.get(mover));

                    if mover_eats {
                        self.registry.get_mut(occupant).set_dead();
                        let eater = self.registry.get_mut(mover);
                        eater.time_since_last_meal = 0;
                        eater.cell = Some(destination);
                        trace!(at = %destination, "lion ate zebra");
                    } else if occupant_eats {
                        self.registry.get_mut(mover).set_dead();
                        self.registry.get_mut(occupant).time_since_last_meal = 0;
                        trace!(at = %destination, "zebra walked into lion");
                    } else {
                        // unreachable under the movement policies
                        return Err(Error::Invariant(format!(
                            "{} moving to {} found a {} it can neither eat nor be eaten by",
                            self.registry.get(mover).species,
                            destination,
                            self.registry.get(occupant).species
                        )));
                    }
                }
                None => {
                    self.registry.get_mut(mover).cell = Some(destination);
                }
            }
        }

        self.registry.compact();
        self.registry.check_invariants(false)
    }

    /// Give every eligible animal, in LRTB order, one reproduction
    /// attempt. Offspring are appended only after all decisions, so
    /// they are invisible as co-parents within the tick.
    fn reproduction_phase(&mut self) {
        let len = self.registry.len();
        let mut children = Vec::new();

        for i in 0..len {
            let animal = self.registry.get(i);
            if !animal.can_reproduce() {
                continue;
            }
            let Some(cell) = animal.cell else { continue };
            let species = animal.species;
            let ring = self.grid.ring(cell, 0);

            // distance-1 neighbors of the same species, also eligible
            let mates: Vec<(usize, Position)> = (0..len)
                .filter(|&j| j != i)
                .filter_map(|j| {
                    let other = self.registry.get(j);
                    match other.cell {
                        Some(pos)
                            if other.species == species
                                && other.can_reproduce()
                                && ring.contains(&pos) =>
                        {
                            Some((j, pos))
                        }
                        _ => None,
                    }
                })
                .collect();

            if mates.is_empty() {
                trace!(species = %species, at = %cell, "no eligible co-parent");
                continue;
            }
            let (mate, mate_cell) = mates[self.rng.gen_range(0..mates.len())];

            // union of both parents' distance-1 neighbors, minus the
            // parents' own cells; occupancy is deliberately not checked
            let mut candidates: BTreeSet<Position> = ring.iter().copied().collect();
            candidates.extend(self.grid.ring(mate_cell, 0).iter().copied());
            candidates.remove(&cell);
            candidates.remove(&mate_cell);

            if candidates.is_empty() {
                trace!(species = %species, at = %cell, "no birth cell available");
                continue;
            }
            let candidates: Vec<Position> = candidates.into_iter().collect();
            let birth_cell = candidates[self.rng.gen_range(0..candidates.len())];

            self.registry.get_mut(i).time_since_reproduction = 0;
            self.registry.get_mut(mate).time_since_reproduction = 0;
            children.push(Animal::new(species, birth_cell, true, &mut self.rng));
            trace!(species = %species, at = %birth_cell, "offspring born");
        }

        if !children.is_empty() {
            debug!(tick = self.tick, births = children.len(), "reproduction phase");
        }
        self.registry.extend(children);
    }

    /// Read-only view of the alive population for external renderers.
    pub fn snapshot(&self) -> PopulationSnapshot {
        PopulationSnapshot::capture(self.grid.size(), &self.registry)
    }
}

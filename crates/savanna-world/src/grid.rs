//! 2D grid topology with precomputed neighbor rings.

use savanna_core::Position;
use std::collections::HashSet;

/// Rings are precomputed out to this Chebyshev distance. Only ring 0
/// (distance 1) is consumed by movement and reproduction.
pub const MAX_RING_DISTANCE: usize = 3;

/// One grid cell and its neighbor rings. `rings[k]` holds the
/// positions at Chebyshev distance exactly `k + 1`, clipped to the
/// grid bounds.
#[derive(Debug, Clone)]
pub struct Cell {
    pub position: Position,
    rings: [Vec<Position>; MAX_RING_DISTANCE],
}

/// A bounded, non-toroidal square grid. Immutable after `build`.
#[derive(Debug, Clone)]
pub struct Grid {
    size: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Construct a `size` x `size` grid and compute every cell's
    /// neighbor rings exactly once.
    pub fn build(size: i32) -> Self {
        let mut cells = Vec::with_capacity((size * size) as usize);

        for row in 0..size {
            for col in 0..size {
                let position = Position::new(row, col);
                let mut rings: [Vec<Position>; MAX_RING_DISTANCE] = Default::default();

                let max_dist = MAX_RING_DISTANCE as i32;
                let start_row = (row - max_dist).max(0);
                let end_row = (row + max_dist + 1).min(size);
                let start_col = (col - max_dist).max(0);
                let end_col = (col + max_dist + 1).min(size);

                for i in start_row..end_row {
                    for j in start_col..end_col {
                        let neighbor = Position::new(i, j);
                        let distance = position.chebyshev_distance(&neighbor);
                        if distance > 0 {
                            rings[(distance - 1) as usize].push(neighbor);
                        }
                    }
                }

                cells.push(Cell { position, rings });
            }
        }

        Self { size, cells }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        (pos.row * self.size + pos.col) as usize
    }

    /// Neighbor rings of `pos`, up to (exclusive) `up_to_distance` rings.
    pub fn rings(&self, pos: Position, up_to_distance: usize) -> &[Vec<Position>] {
        let index = self.pos_to_index(pos);
        &self.cells[index].rings[..up_to_distance.min(MAX_RING_DISTANCE)]
    }

    /// The positions at Chebyshev distance exactly `k + 1` from `pos`.
    pub fn ring(&self, pos: Position, k: usize) -> &[Position] {
        let index = self.pos_to_index(pos);
        &self.cells[index].rings[k]
    }

    /// Per ring up to `up_to_distance`, the neighbor positions not in
    /// `avoid`.
    pub fn available_neighbors(
        &self,
        pos: Position,
        avoid: &HashSet<Position>,
        up_to_distance: usize,
    ) -> Vec<Vec<Position>> {
        self.rings(pos, up_to_distance)
            .iter()
            .map(|ring| {
                ring.iter()
                    .copied()
                    .filter(|p| !avoid.contains(p))
                    .collect()
            })
            .collect()
    }
}

//! ASCII rendering of a population snapshot.

use savanna_core::{Position, Species};
use savanna_world::PopulationSnapshot;

/// Render the grid as a bordered block of `L`, `Z`, and spaces.
pub fn render(snapshot: &PopulationSnapshot) -> String {
    let size = snapshot.grid_size;
    let mut out = String::new();

    out.push_str(&"*".repeat(size as usize + 2));
    out.push('\n');
    for row in 0..size {
        out.push('*');
        for col in 0..size {
            let glyph = match snapshot.species_at(Position::new(row, col)) {
                Some(Species::Lion) => 'L',
                Some(Species::Zebra) => 'Z',
                None => ' ',
            };
            out.push(glyph);
        }
        out.push_str("*\n");
    }
    out.push_str(&"*".repeat(size as usize + 2));
    out
}

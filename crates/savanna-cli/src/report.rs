//! Console reporter: per-tick population averages across runs.

use savanna_core::{CountMatrix, Reporter};
use std::io::{self, Write};

/// Prints the cross-run average zebra and lion count per tick as an
/// aligned table.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, matrix: &CountMatrix) {
        let stdout = io::stdout();
        // stdout write failures are not worth aborting a finished batch
        let _ = write_table(&mut stdout.lock(), matrix);
    }
}

fn write_table<W: Write>(out: &mut W, matrix: &CountMatrix) -> io::Result<()> {
    writeln!(
        out,
        "Simulation of {} time periods, repeated {} time{} and averaged.",
        matrix.duration(),
        matrix.num_runs(),
        if matrix.num_runs() == 1 { "" } else { "s" }
    )?;
    writeln!(out, "{:>6} {:>12} {:>12}", "tick", "avg zebras", "avg lions")?;

    for (tick, avg) in matrix.averages().iter().enumerate() {
        writeln!(out, "{:>6} {:>12.2} {:>12.2}", tick, avg.zebras, avg.lions)?;
    }
    Ok(())
}

// Export in the CPLEX LP format, readable by glpsol, cbc, highs or scip.

use super::{Domain, IndependentSetProblem};
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::Path;

// Terms per line in long expressions
const LINE_TERMS: usize = 16;

impl IndependentSetProblem {
    /// Write the program in the file `filename` in the LP format.
    pub fn write_lp<P: AsRef<Path>>(&self, filename: P) -> io::Result<()> {
        let mut w = BufWriter::new(File::create(filename)?);
        self.print_lp(&mut w)?;
        w.flush()
    }

    pub fn print_lp<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "\\ Maximum independent set ({:?})", self.domain)?;
        writeln!(w, "Maximize")?;
        write!(w, " obj:")?;
        if self.n_vars == 0 {
            write!(w, " 0")?;
        }
        for i in 0..self.n_vars {
            if i > 0 {
                write!(w, " +")?;
                if i % LINE_TERMS == 0 {
                    write!(w, "\n     ")?;
                }
            }
            write!(w, " x{i}")?;
        }
        writeln!(w)?;
        writeln!(w, "Subject To")?;
        for (k, &(u, v)) in self.constraints.iter().enumerate() {
            writeln!(w, " e{k}: x{u} + x{v} <= 1")?;
        }
        match self.domain {
            Domain::Continuous => {
                writeln!(w, "Bounds")?;
                for i in 0..self.n_vars {
                    writeln!(w, " 0 <= x{i} <= 1")?;
                }
            }
            Domain::Binary => {
                writeln!(w, "Binary")?;
                for chunk in (0..self.n_vars).collect::<Vec<_>>().chunks(LINE_TERMS) {
                    for i in chunk {
                        write!(w, " x{i}")?;
                    }
                    writeln!(w)?;
                }
            }
        }
        writeln!(w, "End")
    }
}

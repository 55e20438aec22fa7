//! Text form of a lattice: one line per `x`, one character per `y`,
//! `+` for up and `-` for anything else.

use crate::error::{Result, SimError};
use crate::lattice::Lattice;
use crate::spin::Spin;
use std::fmt;
use std::io::{self, Write};

fn symbol(v: i8) -> char {
    if v == Spin::Up.value() { '+' } else { '-' }
}

/// Write every row of `lattice`, newline-terminated, to `out`.
pub fn write_lattice<W: Write>(lattice: &Lattice, out: &mut W) -> io::Result<()> {
    let mut line = String::with_capacity(lattice.height() + 1);
    for row in lattice.cells().chunks(lattice.height()) {
        line.clear();
        line.extend(row.iter().map(|&v| symbol(v)));
        line.push('\n');
        out.write_all(line.as_bytes())?;
    }
    Ok(())
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells().chunks(self.height()) {
            for &v in row {
                write!(f, "{}", symbol(v))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Inverse of [`write_lattice`]. Blank lines and trailing whitespace are
/// ignored; every remaining line must have the same length.
///
/// Only filled lattices round-trip: an unfilled (zero) cell renders as `-`
/// and comes back as a down spin.
pub fn parse_lattice(text: &str) -> Result<Lattice> {
    let rows: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end()))
        .filter(|(_, l)| !l.is_empty())
        .collect();

    let Some(&(_, first)) = rows.first() else {
        return Err(SimError::EmptyInput);
    };
    let height = first.chars().count();

    let mut lattice = Lattice::allocate(rows.len(), height)?;
    for (x, &(line, row)) in rows.iter().enumerate() {
        let actual = row.chars().count();
        if actual != height {
            return Err(SimError::RaggedRows { line, expected: height, actual });
        }
        for (y, c) in row.chars().enumerate() {
            let spin = Spin::from_symbol(c).ok_or(SimError::Parse {
                line,
                column: y + 1,
                symbol: c,
            })?;
            lattice.set(x as isize, y as isize, spin);
        }
    }
    Ok(lattice)
}

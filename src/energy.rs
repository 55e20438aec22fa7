//! Nearest-neighbour interaction energy and Boltzmann weights.
//!
//! The energy is `E = Σ_site Σ_{4 neighbours} s_site * s_neighbour` with unit
//! coupling. Each bond is visited once from either endpoint, so `E` is twice
//! the usual bond sum: an aligned `w x h` lattice has `E = 4 w h`.

use crate::lattice::Lattice;

/// Toroidal neighbour offsets: right, left, down, up.
pub const NEIGHBOURS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Total interaction energy. Exact integer arithmetic, O(width * height).
pub fn energy(lattice: &Lattice) -> i64 {
    let mut e = 0i64;
    for (x, y) in lattice.sites() {
        let s = lattice.get(x, y) as i64;
        for (dx, dy) in NEIGHBOURS {
            e += s * lattice.get(x + dx, y + dy) as i64;
        }
    }
    e
}

/// Boltzmann weight `exp(-beta * E)` of the whole configuration.
///
/// `beta` is not validated; a negative value favours high energies.
pub fn weight(lattice: &Lattice, beta: f64) -> f64 {
    boltzmann(energy(lattice), beta)
}

/// `exp(-beta * e)` for an already known energy.
#[inline]
pub fn boltzmann(e: i64, beta: f64) -> f64 {
    (-beta * e as f64).exp()
}

/// Exact change of [`energy`] if the spin at `(x, y)` were flipped. O(1).
///
/// Every product involving the site changes sign, and each bond shows up
/// twice, so `ΔE = -4 s Σ s_neighbour`. A neighbour that wraps back onto the
/// site itself (extent 1 along that axis) contributes `s * s`, which a flip
/// leaves unchanged, so it is skipped.
pub fn flip_delta(lattice: &Lattice, x: isize, y: isize) -> i64 {
    let s = lattice.get(x, y) as i64;
    let mut field = 0i64;
    for (dx, dy) in NEIGHBOURS {
        let wraps_onto_self =
            (dx != 0 && lattice.width() == 1) || (dy != 0 && lattice.height() == 1);
        if !wraps_onto_self {
            field += lattice.get(x + dx, y + dy) as i64;
        }
    }
    -4 * s * field
}

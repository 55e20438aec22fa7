//! Toroidal 2-D spin lattice.

use crate::error::{Result, SimError};
use crate::spin::Spin;

/// A `width x height` grid of spins with periodic boundaries.
///
/// `x` runs over `0..width` and `y` over `0..height`; storage is flat with
/// offset `x * height + y`, so iterating `x` outer and `y` inner visits the
/// cells in memory order. Any integer coordinate is accepted and wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    width: usize,
    height: usize,
    cells: Vec<i8>,
}

impl Lattice {
    /// Reserve a zero-filled lattice.
    ///
    /// Zero is not a spin: call [`fill_ground_state`](Self::fill_ground_state)
    /// before reading anything physical out of it.
    pub fn allocate(width: usize, height: usize) -> Result<Self> {
        let n = cell_count(width, height)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(n)
            .map_err(|_| SimError::Allocation { cells: n })?;
        cells.resize(n, 0);
        Ok(Self { width, height, cells })
    }

    /// Allocate and fill with a uniform ground state in one go.
    pub fn new(width: usize, height: usize, ground: Spin) -> Result<Self> {
        let mut lattice = Self::allocate(width, height)?;
        lattice.fill_ground_state(ground);
        Ok(lattice)
    }

    /// Release the backing storage. Consuming `self` makes a second release
    /// or a later use impossible; dropping the lattice does the same.
    pub fn deallocate(self) {}

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of sites.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw cell values in storage order.
    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    /// Canonical storage offset of `(x, y)` after toroidal wrapping.
    #[inline]
    pub fn index(&self, x: isize, y: isize) -> usize {
        let x = x.rem_euclid(self.width as isize) as usize;
        let y = y.rem_euclid(self.height as isize) as usize;
        x * self.height + y
    }

    /// Raw value at `(x, y)`: +1, -1, or 0 if never filled.
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> i8 {
        self.cells[self.index(x, y)]
    }

    /// Typed view of `(x, y)`; `None` only for unfilled storage.
    pub fn spin(&self, x: isize, y: isize) -> Option<Spin> {
        Spin::from_value(self.get(x, y))
    }

    #[inline]
    pub fn set(&mut self, x: isize, y: isize, spin: Spin) {
        let i = self.index(x, y);
        self.cells[i] = spin.value();
    }

    pub fn fill_ground_state(&mut self, spin: Spin) {
        self.cells.fill(spin.value());
    }

    /// Negate the spin at `(x, y)` in place.
    #[inline]
    pub fn flip(&mut self, x: isize, y: isize) {
        let i = self.index(x, y);
        self.cells[i] = -self.cells[i];
    }

    /// All sites in traversal order (`x` outer, `y` inner).
    pub fn sites(&self) -> impl Iterator<Item = (isize, isize)> {
        let (w, h) = (self.width as isize, self.height as isize);
        (0..w).flat_map(move |x| (0..h).map(move |y| (x, y)))
    }

    /// Sum of all spins.
    pub fn magnetization(&self) -> i64 {
        self.cells.iter().map(|&s| s as i64).sum()
    }
}

fn cell_count(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 || width > isize::MAX as usize || height > isize::MAX as usize {
        return Err(SimError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(SimError::InvalidDimensions { width, height })
}

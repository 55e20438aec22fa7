//! Toroidal indexing and in-place flips.

use ising::energy::energy;
use ising::{Lattice, SimError, Spin};
use proptest::prelude::*;

#[test]
fn test_ground_state_fill_overwrites_zeroes() {
    let mut lat = Lattice::allocate(4, 6).unwrap();
    assert_eq!(energy(&lat), 0, "unfilled storage carries no interaction");

    lat.fill_ground_state(Spin::Up);
    assert!(lat.cells().iter().all(|&c| c == 1));
    assert_eq!(lat.magnetization(), 24);
}

#[test]
fn test_every_boundary_wraps() {
    let mut lat = Lattice::new(3, 5, Spin::Down).unwrap();
    lat.set(0, 0, Spin::Up);

    // The same cell seen from each side of the torus.
    for (x, y) in [(3, 0), (0, 5), (-3, 0), (0, -5), (3, 5), (-3, -5), (6, -10)] {
        assert_eq!(lat.spin(x, y), Some(Spin::Up), "({x}, {y})");
    }
    assert_eq!(lat.spin(-1, 0), lat.spin(2, 0));
    assert_eq!(lat.spin(0, -1), lat.spin(0, 4));
}

#[test]
fn test_single_cell_lattice() {
    let mut lat = Lattice::new(1, 1, Spin::Up).unwrap();
    assert_eq!(lat.index(-7, 12), 0);
    assert_eq!(energy(&lat), 4);
    lat.flip(5, 5);
    assert_eq!(lat.spin(0, 0), Some(Spin::Down));
    assert_eq!(energy(&lat), 4);
}

#[test]
fn test_allocation_errors_surface() {
    assert!(matches!(
        Lattice::new(0, 0, Spin::Up),
        Err(SimError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        Lattice::allocate(usize::MAX / 2, 4),
        Err(SimError::InvalidDimensions { .. })
    ));
}

proptest! {
    #[test]
    fn prop_index_invariant_under_period_shifts(
        width in 1usize..12,
        height in 1usize..12,
        x in -50isize..50,
        y in -50isize..50,
        kx in -5isize..5,
        ky in -5isize..5,
    ) {
        let lat = Lattice::allocate(width, height).unwrap();
        let base = lat.index(x, y);
        prop_assert!(base < lat.len());
        prop_assert_eq!(base, lat.index(x + kx * width as isize, y));
        prop_assert_eq!(base, lat.index(x, y + ky * height as isize));
        prop_assert_eq!(base, lat.index(x + kx * width as isize, y + ky * height as isize));
    }

    #[test]
    fn prop_flip_is_an_involution(
        width in 1usize..8,
        height in 1usize..8,
        pattern in proptest::collection::vec(any::<bool>(), 64),
        x in -20isize..20,
        y in -20isize..20,
    ) {
        let mut lat = Lattice::new(width, height, Spin::Up).unwrap();
        for (i, (sx, sy)) in lat.sites().collect::<Vec<_>>().into_iter().enumerate() {
            if pattern[i] {
                lat.flip(sx, sy);
            }
        }
        let before = lat.clone();
        let e = energy(&lat);

        lat.flip(x, y);
        prop_assert_ne!(&lat, &before);
        lat.flip(x, y);
        prop_assert_eq!(&lat, &before);
        prop_assert_eq!(energy(&lat), e);
    }
}

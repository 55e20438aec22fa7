//! Energy functional and Boltzmann weights.

use ising::energy::{energy, flip_delta, weight};
use ising::{Lattice, Spin};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn random_lattice(rng: &mut impl Rng, width: usize, height: usize) -> Lattice {
    let mut lat = Lattice::new(width, height, Spin::Up).unwrap();
    for (x, y) in lat.sites().collect::<Vec<_>>() {
        if rng.gen_bool(0.5) {
            lat.flip(x, y);
        }
    }
    lat
}

#[test]
fn test_ground_states_have_maximal_energy() {
    for (w, h) in [(1, 1), (2, 3), (5, 5), (7, 4), (16, 16)] {
        let up = Lattice::new(w, h, Spin::Up).unwrap();
        let down = Lattice::new(w, h, Spin::Down).unwrap();
        assert_eq!(energy(&up), 4 * (w * h) as i64);
        assert_eq!(energy(&down), 4 * (w * h) as i64);
    }
}

#[test]
fn test_energy_bounds_and_step() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xDEADBEEF);
    for _ in 0..200 {
        let lat = random_lattice(&mut rng, 5, 5);
        let e = energy(&lat);
        assert!((-100..=100).contains(&e), "energy {e} out of range");
        assert_eq!(e.rem_euclid(4), 0, "energy {e} is not a multiple of 4");
    }
}

#[test]
fn test_weight_matches_exp() {
    let mut lat = Lattice::new(3, 3, Spin::Down).unwrap();
    lat.flip(1, 1);
    // 36 - 16
    assert_eq!(energy(&lat), 20);
    assert!((weight(&lat, 0.1) - (-2.0f64).exp()).abs() < 1e-15);
    // Negative beta is not rejected here, it just inverts the preference.
    assert!(weight(&lat, -0.1) > 1.0);
}

proptest! {
    #[test]
    fn prop_weight_is_one_at_zero_beta(seed in any::<u64>(), w in 1usize..7, h in 1usize..7) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let lat = random_lattice(&mut rng, w, h);
        prop_assert_eq!(weight(&lat, 0.0), 1.0);
    }

    #[test]
    fn prop_flip_delta_equals_recomputed_change(
        seed in any::<u64>(),
        w in 1usize..7,
        h in 1usize..7,
        x in 0isize..7,
        y in 0isize..7,
    ) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut lat = random_lattice(&mut rng, w, h);
        let before = energy(&lat);
        let delta = flip_delta(&lat, x, y);
        lat.flip(x, y);
        prop_assert_eq!(energy(&lat), before + delta);
    }
}

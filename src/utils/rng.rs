use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Per-replica deterministic RNG derived from a master seed (splitmix64 mix).
pub fn replica_rng(master: u64, replica: usize) -> Pcg64 {
    let mut x = master ^ (replica as u64).wrapping_mul(0x9E3779B97F4A7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    x ^= x >> 31;
    Pcg64::seed_from_u64(x)
}

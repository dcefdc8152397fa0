//! Ready-made rule sets: hooks and palettes that plug into an
//! [`Automaton`](crate::Automaton).

pub mod life;
pub mod modulo_prime;

use std::hash::Hasher;

use metrohash::MetroHash64;

/// Small deterministic generator for random initial configurations.
#[derive(Debug, Clone)]
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        let mut hasher = MetroHash64::default();
        hasher.write_u64(seed);
        Self(hasher.finish())
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    pub fn coin(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }
}

#[test]
fn test_lcg_is_seeded() {
    let a: Vec<_> = (0..8).scan(Lcg::new(1), |g, _| Some(g.next_u64())).collect();
    let b: Vec<_> = (0..8).scan(Lcg::new(1), |g, _| Some(g.next_u64())).collect();
    let c: Vec<_> = (0..8).scan(Lcg::new(2), |g, _| Some(g.next_u64())).collect();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

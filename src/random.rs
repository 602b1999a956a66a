use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of gameplay-grade randomness for sampling templates and words.
///
/// Not suitable for anything that needs cryptographic unpredictability.
pub trait RandomSource {
    /// Uniform integer in `0..bound`. Callers never pass a zero bound.
    fn next_int(&mut self, bound: usize) -> usize;
}

/// Adapter from any `rand::Rng` to `RandomSource`
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Deterministic source, same output for the same seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded from the thread RNG, for non-deterministic runs
    pub fn from_entropy() -> Self {
        Self::seeded(rand::thread_rng().gen::<u64>())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_int(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Pick a uniformly random element, `None` for an empty slice
pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.next_int(items.len()))
}

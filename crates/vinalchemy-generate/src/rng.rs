use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;

/// Alphabet for reference suffixes and order tokens.
pub const TOKEN_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Deterministic pseudo-random stream built from a single seed.
///
/// All sampling goes through this type; nothing touches an ambient generator.
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent stream reserved for the final shuffle, seeded with `seed + 1`.
    pub fn shuffle_stream(&self) -> Self {
        Self::new(self.seed.wrapping_add(1))
    }

    /// Uniform draw in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform integer in `[low, high]`; collapses to `low` on an empty range.
    pub fn int_range(&mut self, low: i64, high: i64) -> i64 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    /// Uniform pick from `items`.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Weighted pick from `items`. Unusable weights (all zero, negative,
    /// non-finite) degrade to a uniform pick.
    pub fn weighted<'a, T, F>(&mut self, items: &'a [T], weight: F) -> Option<&'a T>
    where
        F: Fn(&T) -> f64,
    {
        match WeightedIndex::<f64>::new(items.iter().map(&weight)) {
            Ok(dist) => items.get(dist.sample(&mut self.rng)),
            Err(_) => self.choose(items),
        }
    }

    /// `amount` distinct items drawn without replacement, in draw order.
    pub fn sample<T: Clone>(&mut self, items: &[T], amount: usize) -> Vec<T> {
        items
            .choose_multiple(&mut self.rng, amount.min(items.len()))
            .cloned()
            .collect()
    }

    /// `amount` distinct indices below `length`, in draw order.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, length, amount.min(length)).into_vec()
    }

    /// One draw from Normal(`mean`, `std_dev`) clipped to `[low, high]`.
    ///
    /// Out-of-range draws land exactly on the bound; there is no resampling.
    /// An invalid `std_dev` yields the clipped mean.
    pub fn clamped_gaussian(&mut self, mean: f64, std_dev: f64, low: f64, high: f64) -> f64 {
        if !(std_dev.is_finite() && std_dev >= 0.0) {
            return clip(mean, low, high);
        }
        let value = match Normal::new(mean, std_dev) {
            Ok(normal) => normal.sample(&mut self.rng),
            Err(_) => mean,
        };
        clip(value, low, high)
    }

    /// Random string of `len` characters from [`TOKEN_ALPHABET`].
    pub fn token(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| {
                let idx = self.rng.random_range(0..TOKEN_ALPHABET.len());
                char::from(TOKEN_ALPHABET[idx])
            })
            .collect()
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

fn clip(value: f64, low: f64, high: f64) -> f64 {
    if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}

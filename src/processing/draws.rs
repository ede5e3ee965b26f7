use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform perturbation draws in [0, 1).
pub trait DrawSource {
    fn next_draw(&mut self) -> f64;
}

/// Draws from any `rand` generator.
pub struct RandomDraws<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomDraws<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDraws<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> DrawSource for RandomDraws<R> {
    fn next_draw(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct FixedDraws {
    values: Vec<f64>,
    position: usize,
}

impl FixedDraws {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl DrawSource for FixedDraws {
    fn next_draw(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.5;
        }
        let value = self.values[self.position];
        self.position = (self.position + 1) % self.values.len();
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_draws_are_reproducible_and_in_range() {
        let mut a = RandomDraws::seeded(7);
        let mut b = RandomDraws::seeded(7);
        for _ in 0..1000 {
            let x = a.next_draw();
            assert_eq!(x, b.next_draw());
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn fixed_draws_cycle() {
        let mut draws = FixedDraws::new(vec![0.1, 0.9]);
        assert_eq!(draws.next_draw(), 0.1);
        assert_eq!(draws.next_draw(), 0.9);
        assert_eq!(draws.next_draw(), 0.1);
    }

    #[test]
    fn empty_fixed_draws_are_centred() {
        let mut draws = FixedDraws::new(Vec::new());
        assert_eq!(draws.next_draw(), 0.5);
    }
}

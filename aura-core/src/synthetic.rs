//! Price generator for the synthetic asset.
//!
//! The price ramps from `floor` towards `ceiling` over a fixed window that
//! starts at `anchor`, following a quadratic ease-in so most of the growth
//! happens late. A small symmetric uniform jitter is added on every sample and
//! the floor is re-applied afterwards.

use crate::config::SyntheticConfig;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticPriceModel {
    anchor: DateTime<Utc>,
    ramp: Duration,
    floor: f64,
    ceiling: f64,
    /// Full width of the jitter range, centred on zero.
    jitter: f64,
}

impl SyntheticPriceModel {
    pub fn new(anchor: DateTime<Utc>, ramp: Duration, floor: f64, ceiling: f64, jitter: f64) -> Self {
        Self {
            anchor,
            ramp,
            floor,
            ceiling,
            jitter,
        }
    }

    pub fn from_config(config: &SyntheticConfig) -> Self {
        Self::new(
            config.anchor(),
            config.ramp(),
            config.floor(),
            config.ceiling(),
            config.jitter(),
        )
    }

    /// Same model without noise. Every sample is then reproducible from `now`.
    pub fn without_jitter(mut self) -> Self {
        self.jitter = 0.0;
        self
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Fraction of the ramp elapsed at `now`, clamped to `[0, 1]`.
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        let total = self.ramp.num_milliseconds() as f64;
        if total <= 0.0 {
            return 1.0;
        }
        let elapsed = (now - self.anchor).num_milliseconds() as f64;
        (elapsed / total).clamp(0.0, 1.0)
    }

    /// Noise-free price at `now`.
    pub fn base_price(&self, now: DateTime<Utc>) -> f64 {
        // floor + (ceiling - floor) * p^2
        let weight = self.progress(now).powi(2);
        self.floor * (1.0 - weight) + self.ceiling * weight
    }

    /// Price at `now` for a given jitter draw. Pure.
    pub fn price_at(&self, now: DateTime<Utc>, jitter: f64) -> f64 {
        (self.base_price(now) + jitter).max(self.floor)
    }

    /// Draws one jitter value uniformly from `[-jitter/2, jitter/2)`.
    pub fn draw_jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.jitter <= 0.0 {
            return 0.0;
        }
        let half = self.jitter / 2.0;
        rng.gen_range(-half..half)
    }

    /// Samples the price at `now` with fresh jitter.
    pub fn sample<R: Rng + ?Sized>(&self, now: DateTime<Utc>, rng: &mut R) -> f64 {
        let jitter = self.draw_jitter(rng);
        self.price_at(now, jitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FLOOR: f64 = 0.0001;
    const CEILING: f64 = 0.10;
    const JITTER: f64 = 0.000015;

    fn anchor() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-02-10T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn model() -> SyntheticPriceModel {
        SyntheticPriceModel::new(anchor(), Duration::days(30), FLOOR, CEILING, JITTER)
    }

    #[test]
    fn test_progress_is_clamped() {
        let m = model();
        assert_eq!(m.progress(anchor() - Duration::days(3)), 0.0);
        assert_eq!(m.progress(anchor()), 0.0);
        assert_eq!(m.progress(anchor() + Duration::days(15)), 0.5);
        assert_eq!(m.progress(anchor() + Duration::days(90)), 1.0);
    }

    #[test]
    fn test_start_of_ramp_is_floor() {
        let m = model();
        let before = anchor() - Duration::hours(1);

        assert_eq!(m.price_at(before, 0.0), FLOOR);
        // Negative excursions are clipped by the floor
        assert_eq!(m.price_at(before, -JITTER / 2.0), FLOOR);
        assert_eq!(m.price_at(before, JITTER / 4.0), FLOOR + JITTER / 4.0);
    }

    #[test]
    fn test_end_of_ramp_is_exactly_ceiling() {
        let m = model();
        assert_eq!(m.price_at(anchor() + Duration::days(30), 0.0), CEILING);
        assert_eq!(m.price_at(anchor() + Duration::days(365), 0.0), CEILING);
    }

    #[test]
    fn test_ramp_is_quadratic() {
        let m = model();
        let mid = m.base_price(anchor() + Duration::days(15));
        let expected = FLOOR + (CEILING - FLOOR) * 0.25;
        assert!((mid - expected).abs() < 1e-12, "mid-ramp price {}", mid);
    }

    #[test]
    fn test_base_price_never_decreases() {
        let m = model();
        let mut previous = 0.0;
        for day in 0..=35 {
            let price = m.base_price(anchor() + Duration::days(day));
            assert!(price >= previous, "day {}: {} < {}", day, price, previous);
            previous = price;
        }
    }

    #[test]
    fn test_samples_stay_within_jitter_band() {
        let m = model();
        let mut rng = StdRng::seed_from_u64(7);
        let now = anchor() + Duration::days(10);
        let base = m.base_price(now);

        for _ in 0..500 {
            let price = m.sample(now, &mut rng);
            assert!(price >= FLOOR);
            assert!((price - base).abs() <= JITTER / 2.0 + 1e-15);
        }
    }

    #[test]
    fn test_without_jitter_is_reproducible() {
        let m = model().without_jitter();
        let mut rng = StdRng::seed_from_u64(1);
        let now = anchor() + Duration::days(20);

        assert_eq!(m.sample(now, &mut rng), m.base_price(now));
        assert_eq!(m.sample(now, &mut rng), m.sample(now, &mut rng));
    }
}

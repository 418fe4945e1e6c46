use enum_dispatch::enum_dispatch;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::UInt;
use crate::market::Market;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum Segment {
    Economy,
    Business,
}

impl Segment {
    pub fn price_sensitivity(&self) -> f64 {
        match self {
            Segment::Economy => 0.002,
            Segment::Business => 0.001,
        }
    }

    /// Exponent applied to the price before scaling by sensitivity.
    pub fn elasticity(&self) -> f64 {
        match self {
            Segment::Economy => 1.2,
            Segment::Business => 0.8,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(0..=1) {
            0 => Segment::Economy,
            1 => Segment::Business,
            _ => unreachable!(),
        }
    }
}

/// How the episode simulator draws the customer segment for each step.
#[enum_dispatch]
pub trait SegmentSampler {
    fn sample(
        &self,
        market: &Market,
        time: UInt,
        seats_left: UInt,
        rng: &mut dyn RngCore,
    ) -> Segment;
}

/// Coin flip between the two segments, ignoring the time of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformSegments;

impl SegmentSampler for UniformSegments {
    fn sample(&self, _: &Market, _: UInt, _: UInt, rng: &mut dyn RngCore) -> Segment {
        Segment::random(rng)
    }
}

/// Draws through [`Market::customer_segment`], favouring late business travellers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BiasedSegments;

impl SegmentSampler for BiasedSegments {
    fn sample(
        &self,
        market: &Market,
        time: UInt,
        seats_left: UInt,
        rng: &mut dyn RngCore,
    ) -> Segment {
        market.customer_segment(time, seats_left, rng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[enum_dispatch(SegmentSampler)]
pub enum SegmentSamplerType {
    Uniform(UniformSegments),
    Biased(BiasedSegments),
}

/// Config switch selecting the sampler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMode {
    #[default]
    Uniform,
    Biased,
}

impl From<SegmentMode> for SegmentSamplerType {
    fn from(mode: SegmentMode) -> Self {
        match mode {
            SegmentMode::Uniform => UniformSegments.into(),
            SegmentMode::Biased => BiasedSegments.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_economy_is_more_price_sensitive() {
        assert!(Segment::Economy.price_sensitivity() > Segment::Business.price_sensitivity());
        assert!(Segment::Economy.elasticity() > Segment::Business.elasticity());
    }

    #[test]
    fn test_uniform_sampler_ignores_scarcity() {
        let market = Market::new(100, 12);
        let sampler = SegmentSamplerType::from(SegmentMode::Uniform);
        let mut rng = StdRng::seed_from_u64(5);
        // Same state that always yields Economy under the biased sampler.
        let business = (0..1000)
            .filter(|_| sampler.sample(&market, 0, 1, &mut rng) == Segment::Business)
            .count();
        assert!((350..650).contains(&business));
    }

    #[test]
    fn test_biased_sampler_uses_market_bias() {
        let market = Market::new(100, 12);
        let sampler = SegmentSamplerType::from(SegmentMode::Biased);
        let mut rng = StdRng::seed_from_u64(5);
        assert!(
            (0..200).all(|_| sampler.sample(&market, 0, 1, &mut rng) == Segment::Economy)
        );
    }

    #[test]
    fn test_mode_serialization() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            mode: SegmentMode,
        }
        let s = toml::to_string(&Wrapper {
            mode: SegmentMode::Biased,
        })
        .unwrap();
        assert_eq!(s, "mode = \"biased\"\n");
        let w: Wrapper = toml::from_str("mode = \"uniform\"").unwrap();
        assert_eq!(w.mode, SegmentMode::Uniform);
    }
}

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::segment::Segment;
use crate::{Price, UInt};

/// Pace at which seats have been selling so far in the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum BookingRate {
    Low,
    Medium,
    High,
}

/// Price band the competition is currently selling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum CompetitorLevel {
    Low,
    Medium,
    High,
}

impl CompetitorLevel {
    const CYCLE: [CompetitorLevel; 3] = [
        CompetitorLevel::Low,
        CompetitorLevel::Medium,
        CompetitorLevel::High,
    ];

    /// Demand multiplier: a cheap competitor draws customers away.
    pub fn demand_multiplier(&self) -> f64 {
        match self {
            CompetitorLevel::Low => 0.75,
            CompetitorLevel::Medium => 1.05,
            CompetitorLevel::High => 1.3,
        }
    }
}

const BASE_DEMAND: f64 = 0.5;
const MIN_DEMAND: f64 = 0.1;
const MAX_DEMAND: f64 = 1.0;
const COMPETITOR_NOISE_STD: f64 = 0.5;

/// Environment dynamics for one flight. Every function is pure apart from
/// the random source handed in by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pub num_seats: UInt,
    pub time_horizon: UInt,
}

impl Market {
    pub fn new(num_seats: UInt, time_horizon: UInt) -> Self {
        Market {
            num_seats,
            time_horizon,
        }
    }

    /// Probability that a customer buys at `price`, in [0.1, 1.0].
    pub fn demand_probability(
        &self,
        price: Price,
        segment: Segment,
        competitor: CompetitorLevel,
    ) -> f64 {
        let price_term =
            (-segment.price_sensitivity() * (price as f64).powf(segment.elasticity())).exp();
        let demand = BASE_DEMAND * (price_term + 0.1) * competitor.demand_multiplier();
        demand.clamp(MIN_DEMAND, MAX_DEMAND)
    }

    /// Boundary below which the booking rate is `Low`.
    pub fn low_rate_threshold(&self) -> f64 {
        self.num_seats as f64 / (4.0 * self.time_horizon as f64)
    }

    /// Boundary below which the booking rate is `Medium`.
    pub fn medium_rate_threshold(&self) -> f64 {
        (3.0 * self.num_seats as f64) / (5.0 * self.time_horizon as f64)
    }

    /// Everything at or above the medium boundary counts as `High`; there is
    /// no separate band above `num_seats / time_horizon`.
    pub fn classify_booking_rate(&self, rate: f64) -> BookingRate {
        if rate < self.low_rate_threshold() {
            BookingRate::Low
        } else if rate < self.medium_rate_threshold() {
            BookingRate::Medium
        } else {
            BookingRate::High
        }
    }

    pub fn booking_rate(&self, seats_sold: UInt, time_elapsed: UInt) -> BookingRate {
        let time_factor = if time_elapsed > 0 {
            (1.0 + time_elapsed as f64).ln()
        } else {
            0.0
        };
        self.classify_booking_rate(seats_sold as f64 / (1.0 + time_factor))
    }

    /// Competitor level cycles Low -> Medium -> High over the day, jittered by
    /// Gaussian noise on the cycle index.
    pub fn competitor_price_level<R: Rng + ?Sized>(
        &self,
        time: UInt,
        rng: &mut R,
    ) -> CompetitorLevel {
        let cycle_len = CompetitorLevel::CYCLE.len() as f64;
        let shift = (time as f64 / self.time_horizon as f64) * cycle_len;
        let noise = match Normal::new(0.0, COMPETITOR_NOISE_STD) {
            Ok(normal) => normal.sample(rng),
            Err(_) => 0.0,
        };
        let idx = ((shift + noise).rem_euclid(cycle_len) as usize).min(2);
        CompetitorLevel::CYCLE[idx]
    }

    /// Customer arriving at `time` with `seats_left` unsold. Business travellers
    /// become likelier as the day runs out, but only once seats are scarce.
    pub fn customer_segment<R: Rng + ?Sized>(
        &self,
        time: UInt,
        seats_left: UInt,
        rng: &mut R,
    ) -> Segment {
        let economy_bias = f64::max(0.2, 1.0 - time as f64 / self.time_horizon as f64);
        if (seats_left as f64) < self.num_seats as f64 / 3.0 {
            if rng.random::<f64>() < 1.0 - economy_bias {
                Segment::Business
            } else {
                Segment::Economy
            }
        } else {
            Segment::random(rng)
        }
    }
}

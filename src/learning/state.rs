use itertools::iproduct;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::UInt;
use crate::market::{BookingRate, CompetitorLevel};
use crate::segment::Segment;

/// What the pricing agent observes before quoting a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub seats_left: UInt,
    pub time_remaining: UInt,
    pub booking_rate: BookingRate,
    pub competitor_level: CompetitorLevel,
    pub segment: Segment,
}

const BOOKING_RATES: usize = 3;
const COMPETITOR_LEVELS: usize = 3;
const SEGMENTS: usize = 2;
const CATEGORIES: usize = BOOKING_RATES * COMPETITOR_LEVELS * SEGMENTS;

// The three categorical fields pack into 18 slots per (seats, time) pair.
fn category_index(state: &State) -> usize {
    (state.booking_rate as usize * COMPETITOR_LEVELS + state.competitor_level as usize) * SEGMENTS
        + state.segment as usize
}

/// All states with `seats_left` in `0..=num_seats` and `time_remaining` in
/// `0..=time_horizon`. States map one-to-one onto `0..len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSpace {
    num_seats: UInt,
    time_horizon: UInt,
}

impl StateSpace {
    pub fn new(num_seats: UInt, time_horizon: UInt) -> Self {
        StateSpace {
            num_seats,
            time_horizon,
        }
    }

    fn time_slots(&self) -> usize {
        self.time_horizon as usize + 1
    }

    pub fn len(&self) -> usize {
        (self.num_seats as usize + 1) * self.time_slots() * CATEGORIES
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, state: &State) -> bool {
        state.seats_left <= self.num_seats && state.time_remaining <= self.time_horizon
    }

    /// Packed index of `state`, or `None` when it falls outside the space.
    pub fn index(&self, state: &State) -> Option<usize> {
        if !self.contains(state) {
            return None;
        }
        let cell = state.seats_left as usize * self.time_slots() + state.time_remaining as usize;
        Some(cell * CATEGORIES + category_index(state))
    }

    /// Inverse of [`StateSpace::index`].
    pub fn state(&self, index: usize) -> Option<State> {
        if index >= self.len() {
            return None;
        }
        let (cell, category) = (index / CATEGORIES, index % CATEGORIES);
        let seats_left = (cell / self.time_slots()) as UInt;
        let time_remaining = (cell % self.time_slots()) as UInt;
        let segment = Segment::iter().nth(category % SEGMENTS)?;
        let competitor_level = CompetitorLevel::iter().nth(category / SEGMENTS % COMPETITOR_LEVELS)?;
        let booking_rate = BookingRate::iter().nth(category / (SEGMENTS * COMPETITOR_LEVELS))?;
        Some(State {
            seats_left,
            time_remaining,
            booking_rate,
            competitor_level,
            segment,
        })
    }

    /// Every state, in index order.
    pub fn iter(&self) -> impl Iterator<Item = State> + use<> {
        iproduct!(
            0..=self.num_seats,
            0..=self.time_horizon,
            BookingRate::iter(),
            CompetitorLevel::iter(),
            Segment::iter()
        )
        .map(
            |(seats_left, time_remaining, booking_rate, competitor_level, segment)| State {
                seats_left,
                time_remaining,
                booking_rate,
                competitor_level,
                segment,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_state_count() {
        let space = StateSpace::new(100, 12);
        assert_eq!(space.len(), 101 * 13 * 3 * 3 * 2);
        assert_eq!(space.iter().count(), space.len());
        assert_eq!(space.iter().unique().count(), space.len());
    }

    #[test]
    fn test_index_matches_enumeration_order() {
        let space = StateSpace::new(10, 3);
        for (i, state) in space.iter().enumerate() {
            assert_eq!(space.index(&state), Some(i));
            assert_eq!(space.state(i), Some(state));
        }
        assert_eq!(space.state(space.len()), None);
    }

    #[test]
    fn test_out_of_range_states() {
        let space = StateSpace::new(10, 3);
        let state = State {
            seats_left: 10,
            time_remaining: 3,
            booking_rate: BookingRate::High,
            competitor_level: CompetitorLevel::High,
            segment: Segment::Business,
        };
        assert_eq!(space.index(&state), Some(space.len() - 1));
        let too_many_seats = State {
            seats_left: 11,
            ..state
        };
        assert_eq!(space.index(&too_many_seats), None);
        let too_late = State {
            time_remaining: 4,
            ..state
        };
        assert!(!space.contains(&too_late));
    }
}

use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::UInt;
use crate::learning::action::ActionSet;
use crate::learning::q_table::QTable;
use crate::learning::reward::Reward;
use crate::learning::state::State;
use crate::learning::transition::Transition;
use crate::market::Market;
use crate::segment::{SegmentSampler, SegmentSamplerType};

/// Parameters of the update rule used while simulating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningRates {
    pub alpha: f64,
    pub gamma: f64,
    pub epsilon: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub total_reward: u64,
    pub seats_sold: UInt,
    pub steps: UInt,
}

/// One selling day, from full inventory until the seats or the time run out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulation {
    pub market: Market,
    pub seats_left: UInt,
    pub seats_sold: UInt,
    pub time: UInt,
    pub time_elapsed: UInt,
}

impl Simulation {
    pub fn new(market: Market) -> Self {
        Simulation {
            market,
            seats_left: market.num_seats,
            seats_sold: 0,
            time: market.time_horizon.saturating_sub(1),
            time_elapsed: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.time == 0 || self.seats_left == 0
    }

    /// Step forward one time unit:
    /// - Observe the market and assemble the state
    /// - Choose a price epsilon-greedily
    /// - Sample whether the customer buys
    /// - Advance the clock and observe the next state
    /// - Back up the observed reward into the table
    pub fn step_forward<R: Rng>(
        &mut self,
        q_table: &mut QTable,
        actions: &ActionSet,
        sampler: &SegmentSamplerType,
        rates: &LearningRates,
        rng: &mut R,
    ) -> Reward {
        let booking_rate = self.market.booking_rate(self.seats_sold, self.time_elapsed);
        let competitor_level = self.market.competitor_price_level(self.time, rng);
        let segment = sampler.sample(&self.market, self.time, self.seats_left, &mut *rng);
        let state = State {
            seats_left: self.seats_left,
            time_remaining: self.time,
            booking_rate,
            competitor_level,
            segment,
        };
        let state_idx = q_table
            .space()
            .index(&state)
            .expect("observed state lies inside the enumerated space");

        let action = q_table.sample_action(state_idx, rates.epsilon, rng);
        let price = actions.price(action);
        let demand = self.market.demand_probability(price, segment, competitor_level);
        let reward = if rng.random_bool(demand) {
            self.seats_left -= 1;
            self.seats_sold += 1;
            Reward::new(price)
        } else {
            Reward::default()
        };

        self.time -= 1;
        self.time_elapsed += 1;

        // The customer segment carries over into the next state.
        let next_state = State {
            seats_left: self.seats_left,
            time_remaining: self.time,
            booking_rate: self.market.booking_rate(self.seats_sold, self.time_elapsed),
            competitor_level: self.market.competitor_price_level(self.time, rng),
            segment,
        };
        trace!(
            "t={} seats_left={} {:?} price={} p(sale)={:.3} reward={}",
            state.time_remaining, state.seats_left, segment, price, demand, reward.val
        );

        q_table.q_learning_update(
            &Transition {
                state,
                action,
                reward,
                next_state,
            },
            rates.alpha,
            rates.gamma,
        );
        reward
    }

    /// Runs the day to completion, learning into `q_table` as it goes.
    pub fn run_episode<R: Rng>(
        &mut self,
        q_table: &mut QTable,
        actions: &ActionSet,
        sampler: &SegmentSamplerType,
        rates: &LearningRates,
        rng: &mut R,
    ) -> EpisodeSummary {
        let mut summary = EpisodeSummary::default();
        while !self.is_done() {
            let reward = self.step_forward(q_table, actions, sampler, rates, rng);
            summary.total_reward += reward.val as u64;
            summary.steps += 1;
        }
        summary.seats_sold = self.seats_sold;
        summary
    }
}

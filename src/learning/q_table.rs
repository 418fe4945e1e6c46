use itertools::Itertools;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::learning::action::ActionSet;
use crate::learning::state::{State, StateSpace};
use crate::learning::transition::Transition;

/// Dense action-value table over the full state space.
///
/// Entries live in one flat vector, one row of `num_actions` values per state,
/// addressed by the packed state index. Every entry exists from construction
/// onwards and none is ever removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    space: StateSpace,
    num_actions: usize,
    tab: Vec<f64>,
}

impl QTable {
    pub fn new(space: StateSpace, actions: &ActionSet) -> Self {
        let num_actions = actions.len();
        QTable {
            space,
            num_actions,
            tab: vec![0.0; space.len() * num_actions],
        }
    }

    pub fn space(&self) -> &StateSpace {
        &self.space
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Total number of (state, action) entries.
    pub fn len(&self) -> usize {
        self.tab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tab.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.tab
    }

    /// Q values of every action in the state at packed index `state_idx`.
    pub fn row(&self, state_idx: usize) -> &[f64] {
        let start = state_idx * self.num_actions;
        &self.tab[start..start + self.num_actions]
    }

    pub fn get(&self, state: &State, action: usize) -> Option<f64> {
        if action >= self.num_actions {
            return None;
        }
        self.space
            .index(state)
            .map(|idx| self.tab[idx * self.num_actions + action])
    }

    pub fn max_value(&self, state_idx: usize) -> f64 {
        self.row(state_idx)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Indices of every action whose value equals the row maximum.
    pub fn best_actions(&self, state_idx: usize) -> Vec<usize> {
        let max_q = self.max_value(state_idx);
        self.row(state_idx)
            .iter()
            .positions(|&q| q == max_q)
            .collect()
    }

    /// Uniform choice among the maximising actions.
    pub fn greedy_action<R: Rng + ?Sized>(&self, state_idx: usize, rng: &mut R) -> usize {
        *self
            .best_actions(state_idx)
            .choose(rng)
            .expect("a non-empty row has at least one maximiser")
    }

    /// Epsilon-greedy: a uniformly random action with probability `epsilon`,
    /// otherwise a greedy one.
    pub fn sample_action<R: Rng + ?Sized>(
        &self,
        state_idx: usize,
        epsilon: f64,
        rng: &mut R,
    ) -> usize {
        let r: f64 = rng.random();
        if r < epsilon {
            rng.random_range(0..self.num_actions)
        } else {
            self.greedy_action(state_idx, rng)
        }
    }

    /// Q-learning backup:
    /// `Q(s,a) += alpha * (r + gamma * max_a' Q(s',a') - Q(s,a))`.
    ///
    /// A next state outside the table bootstraps from zero.
    pub fn q_learning_update(&mut self, transition: &Transition, alpha: f64, gamma: f64) {
        let state_idx = self
            .space
            .index(&transition.state)
            .expect("visited state lies inside the enumerated space");
        let max_future_q = self
            .space
            .index(&transition.next_state)
            .map_or(0.0, |idx| self.max_value(idx));
        let entry = &mut self.tab[state_idx * self.num_actions + transition.action];
        *entry += alpha * (transition.reward.as_f64() + gamma * max_future_q - *entry);
    }
}

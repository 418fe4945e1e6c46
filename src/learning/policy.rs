use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Price;
use crate::learning::action::ActionSet;
use crate::learning::q_table::QTable;
use crate::learning::state::{State, StateSpace};

pub trait Policy {
    fn choose_action(&self, state: &State) -> Option<Price>;
}

/// Price chosen for one state, as written out for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyEntry {
    pub state: State,
    pub price: Price,
}

/// Final state -> price mapping, one maximising action per enumerated state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreedyPolicy {
    space: StateSpace,
    prices: Vec<Price>,
}

impl GreedyPolicy {
    /// Takes the argmax of every row, breaking ties uniformly at random.
    pub fn extract<R: Rng + ?Sized>(q_table: &QTable, actions: &ActionSet, rng: &mut R) -> Self {
        let space = *q_table.space();
        let prices = (0..space.len())
            .map(|idx| actions.price(q_table.greedy_action(idx, rng)))
            .collect();
        GreedyPolicy { space, prices }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = PolicyEntry> + '_ {
        self.space
            .iter()
            .zip(self.prices.iter())
            .map(|(state, &price)| PolicyEntry { state, price })
    }
}

impl Policy for GreedyPolicy {
    fn choose_action(&self, state: &State) -> Option<Price> {
        self.space.index(state).map(|idx| self.prices[idx])
    }
}

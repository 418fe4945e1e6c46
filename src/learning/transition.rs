use serde::{Deserialize, Serialize};

use crate::learning::reward::Reward;
use crate::learning::state::State;

/// One observed step: state, action index, reward, next state. Consumed by a
/// single Q update and then dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub state: State,
    pub action: usize,
    pub reward: Reward,
    pub next_state: State,
}

use serde::{Deserialize, Serialize};

use crate::Price;

/// Revenue collected in one step: the ticket price on a sale, zero otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reward {
    pub val: Price,
}

impl Reward {
    pub fn new(val: Price) -> Self {
        Reward { val }
    }

    pub fn as_f64(&self) -> f64 {
        self.val as f64
    }
}

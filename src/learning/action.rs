use serde::{Deserialize, Serialize};

use crate::Price;
use crate::error::ConfigError;

/// The configured ticket prices, either an explicit list or a stepped grid.
// List must stay first: a three-element array also deserializes as Grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceLevels {
    List(Vec<Price>),
    Grid {
        floor: Price,
        ceiling: Price,
        step: Price,
    },
}

impl Default for PriceLevels {
    fn default() -> Self {
        PriceLevels::Grid {
            floor: 100,
            ceiling: 650,
            step: 20,
        }
    }
}

impl PriceLevels {
    /// Expands the levels in increasing order. The ceiling is included only
    /// when it falls on the grid.
    pub fn expand(&self) -> Vec<Price> {
        match self {
            PriceLevels::Grid {
                floor,
                ceiling,
                step,
            } => (*floor..=*ceiling).step_by(*step as usize).collect(),
            PriceLevels::List(prices) => prices.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let PriceLevels::Grid { step: 0, .. } = self {
            return Err(ConfigError::ZeroPriceStep);
        }
        let prices = self.expand();
        if prices.is_empty() {
            return Err(ConfigError::EmptyPriceLevels);
        }
        if let Some(&zero) = prices.iter().find(|&&p| p == 0) {
            return Err(ConfigError::NonPositivePrice(zero));
        }
        for pair in prices.windows(2) {
            if pair[0] >= pair[1] {
                return Err(ConfigError::UnorderedPriceLevels {
                    prev: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(())
    }
}

/// Ordered, non-empty set of prices the learner can offer. Actions are
/// addressed by their position in the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet {
    prices: Vec<Price>,
}

impl TryFrom<&PriceLevels> for ActionSet {
    type Error = ConfigError;

    fn try_from(levels: &PriceLevels) -> Result<Self, Self::Error> {
        levels.validate()?;
        Ok(ActionSet {
            prices: levels.expand(),
        })
    }
}

impl ActionSet {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn price(&self, action: usize) -> Price {
        self.prices[action]
    }

    pub fn index_of(&self, price: Price) -> Option<usize> {
        self.prices.binary_search(&price).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let prices = PriceLevels::default().expand();
        assert_eq!(prices.len(), 28);
        assert_eq!(prices.first(), Some(&100));
        assert_eq!(prices.last(), Some(&640));
        assert!(prices.iter().all(|p| (p - 100) % 20 == 0));
    }

    #[test]
    fn test_ceiling_on_grid_is_included() {
        let levels = PriceLevels::Grid {
            floor: 100,
            ceiling: 200,
            step: 50,
        };
        assert_eq!(levels.expand(), vec![100, 150, 200]);
    }

    #[test]
    fn test_invalid_levels() {
        let zero_step = PriceLevels::Grid {
            floor: 100,
            ceiling: 200,
            step: 0,
        };
        assert_eq!(zero_step.validate(), Err(ConfigError::ZeroPriceStep));

        let inverted = PriceLevels::Grid {
            floor: 300,
            ceiling: 200,
            step: 10,
        };
        assert_eq!(inverted.validate(), Err(ConfigError::EmptyPriceLevels));

        assert_eq!(
            PriceLevels::List(vec![0, 100]).validate(),
            Err(ConfigError::NonPositivePrice(0))
        );
        assert_eq!(
            PriceLevels::List(vec![100, 300, 200]).validate(),
            Err(ConfigError::UnorderedPriceLevels {
                prev: 300,
                next: 200
            })
        );
        assert!(ActionSet::try_from(&PriceLevels::List(vec![])).is_err());
    }

    #[test]
    fn test_action_lookup() {
        let actions = ActionSet::try_from(&PriceLevels::List(vec![100, 250, 400])).unwrap();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions.price(1), 250);
        assert_eq!(actions.index_of(400), Some(2));
        assert_eq!(actions.index_of(401), None);
    }
}

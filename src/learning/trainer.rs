use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::error::ConfigError;
use crate::learning::action::ActionSet;
use crate::learning::policy::GreedyPolicy;
use crate::learning::q_table::QTable;
use crate::learning::state::StateSpace;
use crate::market::Market;
use crate::segment::SegmentSamplerType;
use crate::simulation::{EpisodeSummary, LearningRates, Simulation};

/// Runs Q-learning episodes one after another against a single shared table.
///
/// The table is fully updated between calls to [`Trainer::run_episode`], so a
/// caller may stop after any episode and still extract a policy.
#[derive(Debug)]
pub struct Trainer<R: Rng = StdRng> {
    pub config: Config,
    market: Market,
    actions: ActionSet,
    sampler: SegmentSamplerType,
    q_table: QTable,
    rng: R,
    reward_history: Vec<EpisodeSummary>,
}

impl Trainer<StdRng> {
    /// Builds the trainer with an RNG seeded from the config, or from the OS
    /// when the config carries no seed.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Trainer::with_rng(config, rng)
    }
}

impl<R: Rng> Trainer<R> {
    pub fn with_rng(config: Config, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let actions = ActionSet::try_from(&config.price_levels)?;
        let space = StateSpace::new(config.num_seats, config.time_horizon);
        let q_table = QTable::new(space, &actions);
        debug!(
            "Initialised Q table: {} states x {} actions",
            space.len(),
            actions.len()
        );
        Ok(Trainer {
            market: Market::new(config.num_seats, config.time_horizon),
            sampler: config.segment_sampling.into(),
            reward_history: Vec::with_capacity(config.rl.episodes),
            config,
            actions,
            q_table,
            rng,
        })
    }

    fn rates(&self) -> LearningRates {
        LearningRates {
            alpha: self.config.rl.alpha,
            gamma: self.config.rl.gamma,
            epsilon: self.config.rl.epsilon,
        }
    }

    /// Number of episodes completed so far.
    pub fn episodes_run(&self) -> usize {
        self.reward_history.len()
    }

    pub fn is_finished(&self) -> bool {
        self.episodes_run() >= self.config.rl.episodes
    }

    pub fn run_episode(&mut self) -> EpisodeSummary {
        let rates = self.rates();
        let mut sim = Simulation::new(self.market);
        let summary = sim.run_episode(
            &mut self.q_table,
            &self.actions,
            &self.sampler,
            &rates,
            &mut self.rng,
        );
        self.reward_history.push(summary);

        let episode = self.episodes_run();
        if self.config.report_every > 0 && episode % self.config.report_every == 0 {
            info!(
                "Episode {}/{}, Total Reward: {}",
                episode, self.config.rl.episodes, summary.total_reward
            );
        }
        summary
    }

    /// Runs the remaining configured episodes.
    pub fn train(&mut self) -> &[EpisodeSummary] {
        while !self.is_finished() {
            self.run_episode();
        }
        &self.reward_history
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    pub fn reward_history(&self) -> &[EpisodeSummary] {
        &self.reward_history
    }

    pub fn extract_policy(&mut self) -> GreedyPolicy {
        GreedyPolicy::extract(&self.q_table, &self.actions, &mut self.rng)
    }
}

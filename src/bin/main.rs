use airfare::{
    Result,
    config::Config,
    learning::{
        policy::{GreedyPolicy, Policy, PolicyEntry},
        state::State,
        trainer::Trainer,
    },
    market::{BookingRate, CompetitorLevel},
    segment::Segment,
};
use itertools::iproduct;
use log::info;
use strum::IntoEnumIterator;

const REPORT_TIME: u32 = 5;

/// Usage: `airfare [config.toml] [policy.json]`
fn main() -> Result<()> {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::default(),
    };
    let policy_path = args.next();

    let mut trainer = Trainer::new(config)?;
    info!(
        "Training for {} episodes: {} seats, horizon {}, {} price levels",
        trainer.config.rl.episodes,
        trainer.config.num_seats,
        trainer.config.time_horizon,
        trainer.actions().len()
    );
    trainer.train();

    let policy = trainer.extract_policy();
    report(&policy, &trainer.config);

    if let Some(path) = policy_path {
        let entries: Vec<PolicyEntry> = policy.entries().collect();
        std::fs::write(&path, serde_json::to_string_pretty(&entries)?)?;
        info!("Wrote {} policy entries to {}", entries.len(), path);
    }
    Ok(())
}

/// Logs the learned prices for economy customers at a fixed time of day.
fn report(policy: &GreedyPolicy, config: &Config) {
    let time_remaining = REPORT_TIME.min(config.time_horizon);
    info!(
        "Optimal pricing policy when time is {} and customer segment is Economy:",
        time_remaining
    );
    for (seats_left, booking_rate, competitor_level) in iproduct!(
        0..=config.num_seats,
        BookingRate::iter(),
        CompetitorLevel::iter()
    ) {
        let state = State {
            seats_left,
            time_remaining,
            booking_rate,
            competitor_level,
            segment: Segment::Economy,
        };
        if let Some(price) = policy.choose_action(&state) {
            info!(
                "Seats left: {}, Booking rate: {:?}, Competitor price: {:?}, Optimal price: {}",
                seats_left, booking_rate, competitor_level, price
            );
        }
    }
}

pub mod config;
pub mod error;
pub mod learning;
pub mod market;
pub mod segment;
pub mod simulation;

pub use error::{ConfigError, Error, Result};

pub type UInt = u32;
/// Ticket price in whole currency units.
pub type Price = UInt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Rejected configuration values. Raised before any table is allocated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("number of seats must be positive")]
    NoSeats,

    #[error("time horizon must be positive")]
    NoTimeHorizon,

    #[error("number of episodes must be positive")]
    NoEpisodes,

    #[error("price level set is empty")]
    EmptyPriceLevels,

    #[error("price levels must be positive, found {0}")]
    NonPositivePrice(u32),

    #[error("price levels must be strictly increasing ({prev} followed by {next})")]
    UnorderedPriceLevels { prev: u32, next: u32 },

    #[error("price step must be positive")]
    ZeroPriceStep,

    #[error("{name} must lie in [0, 1], found {value}")]
    ParameterOutOfRange { name: &'static str, value: f64 },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

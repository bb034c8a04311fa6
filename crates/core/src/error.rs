use thiserror::Error;

/// Top-level error type used across the battery monitor.
#[derive(Debug, Error)]
pub enum BatError {
    #[error("config error: {0}")]
    Config(String),

    /// Reading the power-supply source for a battery failed for a reason
    /// other than the battery simply not being there (permissions, hot-plug race).
    #[error("sensor error on battery {index}: {source}")]
    Sensor {
        index: u32,
        #[source]
        source: std::io::Error,
    },
}

impl BatError {
    /// `true` for failures the scheduler should swallow and retry next tick.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Sensor { .. })
    }
}

pub type Result<T, E = BatError> = std::result::Result<T, E>;

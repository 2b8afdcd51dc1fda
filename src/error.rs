/// Error types for schedule generation and calendar navigation.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Invalid status: '{0}'. Must be one of: confirmed, pending, cancelled")]
    UnknownStatus(String),

    #[error("Invalid granularity: '{0}'. Must be one of: day, week, month, year")]
    UnknownGranularity(String),

    #[error("Invalid direction: '{0}'. Must be one of: prev, next, today")]
    UnknownDirection(String),

    #[error("Invalid role: '{0}'. Must be one of: admin, hospital, doctor, patient")]
    UnknownRole(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

impl ScheduleError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        ScheduleError::InvalidConfig(message.into())
    }
}

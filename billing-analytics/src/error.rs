use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid date range: {0}")]
    InvalidRange(String),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

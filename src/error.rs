use thiserror::Error;

pub type Result<T> = std::result::Result<T, HoursError>;

#[derive(Error, Debug)]
pub enum HoursError {
    #[error("Git error: {0}")]
    Git(String),
    #[error("Cannot analyze a shallow clone; run `git fetch --unshallow` to retrieve the full history first")]
    ShallowRepository,
    #[error("Invalid date: {0} (expected always|today|yesterday|thisweek|lastweek|yyyy-mm-dd)")]
    InvalidDate(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

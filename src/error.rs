use std::fmt;

#[derive(Debug)]
pub enum SearchError {
    MissingField(&'static str),
    InvalidAirport(String),
    InvalidDate(String),
    Validation(String),
    /// Generic failure path kept for API shape with a real search backend.
    /// The in-process generator never produces it on its own.
    Unknown,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required search field: {field}"),
            Self::InvalidAirport(code) => write!(
                f,
                "invalid airport code \"{code}\" — must be exactly 3 letters (e.g. JFK, LHR, ORD)"
            ),
            Self::InvalidDate(date) => write!(
                f,
                "invalid date \"{date}\" — must be YYYY-MM-DD format (e.g. 2026-05-01)"
            ),
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::Unknown => write!(f, "an unknown error occurred while searching for flights"),
        }
    }
}

impl std::error::Error for SearchError {}

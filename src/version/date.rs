use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// `May25` -> `May 25`
static LETTER_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z])([0-9])").unwrap());

/// Release date of a single build, as precise as the source allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseDate {
    /// Full calendar date
    Exact(NaiveDate),
    /// Only month and year were given ("May 2024")
    Month { year: i32, month: u32 },
    /// Could not be parsed; holds the display text
    Unknown(String),
}

impl ReleaseDate {
    /// Parse a date cell using the fallback chain
    /// `Month Day, Year` -> `Month, Year` / `Month Year` -> unknown.
    pub fn parse(cell: &str) -> Self {
        let cell = LETTER_DIGIT_RE.replace_all(cell.trim(), "$1 $2");

        // %B also takes "Feb", so abbreviated months count as exact dates
        if let Ok(date) = NaiveDate::parse_from_str(&cell, "%B %d, %Y") {
            return ReleaseDate::Exact(date);
        }

        let first_of_month = format!("1 {}", cell);
        for format in ["%d %B, %Y", "%d %B %Y"] {
            if let Ok(date) = NaiveDate::parse_from_str(&first_of_month, format) {
                return ReleaseDate::Month {
                    year: date.year(),
                    month: date.month(),
                };
            }
        }

        ReleaseDate::Unknown(format!("Unknown: {}", cell))
    }

    /// The exact date, if known to the day.
    pub fn exact(&self) -> Option<NaiveDate> {
        match self {
            ReleaseDate::Exact(date) => Some(*date),
            _ => None,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, ReleaseDate::Exact(_))
    }

    /// Display text for dates that are not exact, `None` for exact ones.
    pub fn fallback_text(&self) -> Option<String> {
        match self {
            ReleaseDate::Exact(_) => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseDate::Exact(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            ReleaseDate::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            ReleaseDate::Unknown(text) => f.write_str(text),
        }
    }
}

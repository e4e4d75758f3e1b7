use chrono::NaiveDate;
use std::fmt;

/// Which end of a lifespan an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRole {
    Birth,
    Death,
}

impl fmt::Display for DateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRole::Birth => f.write_str("birth"),
            DateRole::Death => f.write_str("death"),
        }
    }
}

/// Failures while reading a biography page. Each one ends the current
/// lookup; none of them ends the process.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("could not read a date from `{input}`: {reason}")]
    DateParse { input: String, reason: String },

    #[error("the infobox has no {0} date")]
    MissingDate(DateRole),

    #[error("computed age {computed} does not match the page's stated age {stated}")]
    AgeMismatch { computed: u32, stated: u32 },

    #[error("the page has no infobox matching `{selector}`")]
    InfoboxNotFound { selector: String },

    #[error("no `(aged N)` marker in `{0}`")]
    AgeNotStated(String),

    #[error("death date {death} precedes birth date {birth}")]
    DeathBeforeBirth { birth: NaiveDate, death: NaiveDate },

    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
}

/// Failure of one end-to-end lookup.
#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    #[error("browser error: {0:#}")]
    Browser(#[from] anyhow::Error),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

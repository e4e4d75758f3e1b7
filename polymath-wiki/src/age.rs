//! Age at death, checked against the age the page itself states.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::ScanError;

/// Whole years are counted as 365-day blocks, leap days included. The
/// page's `(aged N)` marker is the authority this estimate must agree with.
pub const DAYS_PER_YEAR: i64 = 365;

static AGED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*aged\s+(\d+)\s*\)").expect("aged regex is valid"));

/// `floor(days(death - birth) / 365)`.
pub fn age_in_years(birth: NaiveDate, death: NaiveDate) -> Result<u32, ScanError> {
    let days = (death - birth).num_days();
    if days < 0 {
        return Err(ScanError::DeathBeforeBirth { birth, death });
    }
    Ok((days / DAYS_PER_YEAR) as u32)
}

/// `N` from the first `(aged N)` marker in `text`.
pub fn stated_age(text: &str) -> Result<u32, ScanError> {
    AGED_MARKER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| ScanError::AgeNotStated(text.to_string()))
}

/// Render the marker a page would carry for `age`.
pub fn age_marker(age: u32) -> String {
    format!("(aged {age})")
}

/// Compute the age and require it to equal the one stated in `died_row_text`.
pub fn verified_age(
    birth: NaiveDate,
    death: NaiveDate,
    died_row_text: &str,
) -> Result<u32, ScanError> {
    let computed = age_in_years(birth, death)?;
    let stated = stated_age(died_row_text)?;
    if computed != stated {
        return Err(ScanError::AgeMismatch { computed, stated });
    }
    Ok(computed)
}

//! Biography lookup: scraping a scientist's encyclopedia page for an
//! introduction and a verified age.
//!
//! - [`dates`]: parenthesized date extraction and natural-language parsing
//! - [`age`]: elapsed years and the `(aged N)` cross-check
//! - [`scanner`]: infobox walking and first-paragraph extraction (`scraper`)
//! - [`subjects`]: the immutable registry of selectable scientists
//! - [`browser`]: browser session traits and the Fantoccini-backed launcher
//! - [`lookup`]: the orchestrator that drives one lookup end to end

pub mod age;
pub mod browser;
pub mod dates;
pub mod error;
pub mod lookup;
pub mod scanner;
pub mod subjects;

pub use error::{DateRole, LookupError, ScanError};
pub use lookup::{BiographySummary, LookupOrchestrator, LookupSettings};
pub use scanner::{BiographyPageScanner, INTRODUCTION_NOT_FOUND};
pub use subjects::{Subject, SubjectId, SubjectRegistry};

//! Reading a rendered biography page.
//!
//! The page is parsed once with `scraper`; the infobox rows feed
//! [`read_lifespan`] and the paragraphs feed the introduction.

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::age::verified_age;
use crate::dates::extract_date;
use crate::error::{DateRole, ScanError};

/// Introduction reported when the page has no paragraph with text.
pub const INTRODUCTION_NOT_FOUND: &str = "First Paragraph not found!";

/// One infobox row: `th` texts joined with `_`, `td` texts joined with a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRow {
    pub header: String,
    pub value: String,
}

impl PageRow {
    pub fn new(header: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedDates {
    pub born: Option<NaiveDate>,
    pub died: Option<NaiveDate>,
}

/// Everything a scan yields for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedBiography {
    pub dates: ParsedDates,
    pub age: u32,
    pub introduction: String,
}

pub struct BiographyPageScanner {
    infobox_css: String,
    infobox: Selector,
    row: Selector,
    header_cell: Selector,
    value_cell: Selector,
    paragraph: Selector,
}

fn parse_selector(css: &str) -> Result<Selector, ScanError> {
    Selector::parse(css).map_err(|e| ScanError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

impl BiographyPageScanner {
    /// Scanner recognising the infobox by the CSS selector `infobox_css`.
    pub fn new(infobox_css: &str) -> Result<Self, ScanError> {
        Ok(Self {
            infobox_css: infobox_css.to_string(),
            infobox: parse_selector(infobox_css)?,
            row: parse_selector("tr")?,
            header_cell: parse_selector("th")?,
            value_cell: parse_selector("td")?,
            paragraph: parse_selector("p")?,
        })
    }

    pub fn infobox_selector(&self) -> &str {
        &self.infobox_css
    }

    /// Verified lifespan and introduction of the page in `html`.
    pub fn scan(&self, html: &str) -> Result<ScannedBiography, ScanError> {
        let document = Html::parse_document(html);
        let rows = self.infobox_rows(&document)?;
        let (dates, age) = read_lifespan(&rows)?;
        let introduction = self.introduction(&document);
        debug!(
            target: "wiki.scanner",
            rows = rows.len(),
            ?dates,
            age,
            "scanned biography page"
        );
        Ok(ScannedBiography {
            dates,
            age,
            introduction,
        })
    }

    /// Rows of the first matching infobox, in document order.
    pub fn infobox_rows(&self, document: &Html) -> Result<Vec<PageRow>, ScanError> {
        let table = document
            .select(&self.infobox)
            .next()
            .ok_or_else(|| ScanError::InfoboxNotFound {
                selector: self.infobox_css.clone(),
            })?;

        Ok(table
            .select(&self.row)
            .map(|row| {
                let header = row
                    .select(&self.header_cell)
                    .map(element_text)
                    .collect::<Vec<_>>()
                    .join("_");
                let value = row
                    .select(&self.value_cell)
                    .map(element_text)
                    .collect::<Vec<_>>()
                    .join(" ");
                PageRow { header, value }
            })
            .collect())
    }

    /// Trimmed text of the first paragraph that has any.
    pub fn introduction(&self, document: &Html) -> String {
        document
            .select(&self.paragraph)
            .map(element_text)
            .find(|text| !text.is_empty())
            .unwrap_or_else(|| INTRODUCTION_NOT_FOUND.to_string())
    }
}

/// Walk `rows` for the first `Born…` and first `Died…` entries.
///
/// A birth row that fails to parse is only reported once a death row asks
/// for it. Rows after the first `Died…` row are never examined.
pub fn read_lifespan(rows: &[PageRow]) -> Result<(ParsedDates, u32), ScanError> {
    let mut birth: Option<Result<NaiveDate, ScanError>> = None;

    for row in rows {
        if row.header.starts_with("Born") {
            if birth.is_none() {
                birth = Some(extract_date(&row.value));
            }
        } else if row.header.starts_with("Died") {
            let died = extract_date(&row.value)?;
            let born = birth.ok_or(ScanError::MissingDate(DateRole::Birth))??;
            let age = verified_age(born, died, &row.value)?;
            return Ok((
                ParsedDates {
                    born: Some(born),
                    died: Some(died),
                },
                age,
            ));
        }
    }

    Err(ScanError::MissingDate(DateRole::Death))
}
